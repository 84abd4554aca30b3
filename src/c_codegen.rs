use tracing::{debug, trace};

use crate::ast::{ClassDecl, Declaration, FunctionDecl, Program};
use crate::codegen::types::{method_name, method_param_list, param_list, typed_name};
use crate::codegen::{Emitter, StatementCompiler};

/// Standard headers emitted once at the top of every translation unit.
pub const PRELUDE: &str = "#include <stdio.h>\n#include <stdlib.h>\n#include <string.h>\n\n";

pub const DEFAULT_INDENT_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

/// Lowers a parsed [`Program`] to C. Never fails and never mutates the tree.
pub struct CCodeGen {
    options: GeneratorOptions,
}

impl CCodeGen {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn generate(&self, program: &Program) -> String {
        let mut emitter = Emitter::new(self.options.indent_width);
        emitter.write(PRELUDE);
        self.compile_declarations(&mut emitter, program);

        debug!(bytes = emitter.output_len(), "code generation finished");
        emitter.finish()
    }

    /// Everything after the prelude.
    pub fn generate_declarations(&self, program: &Program) -> String {
        let mut emitter = Emitter::new(self.options.indent_width);
        self.compile_declarations(&mut emitter, program);
        emitter.finish()
    }

    fn compile_declarations(&self, emitter: &mut Emitter, program: &Program) {
        for declaration in &program.declarations {
            match declaration {
                Declaration::Function(function) => self.compile_function(emitter, function),
                Declaration::Class(class) => self.compile_class(emitter, class),
            }
        }
    }

    fn compile_function(&self, emitter: &mut Emitter, function: &FunctionDecl) {
        trace!(name = %function.name, "emitting function");
        let signature = format!(
            "{} {}({}) {{",
            function.return_type,
            function.name,
            param_list(&function.params)
        );
        self.compile_function_body(emitter, &signature, function);
    }

    // A class becomes a typedef'd struct holding its fields, followed by one
    // free function per method taking the struct by pointer.
    fn compile_class(&self, emitter: &mut Emitter, class: &ClassDecl) {
        trace!(name = %class.name, parent = ?class.parent, "emitting class");

        emitter.line(&format!("typedef struct {} {{", class.name));
        emitter.indented(|e| {
            for field in class.fields() {
                e.line(&format!("{};", typed_name(&field.var_type, &field.name)));
            }
        });
        emitter.line(&format!("}} {};", class.name));
        emitter.blank_line();

        for method in class.methods() {
            let signature = format!(
                "{} {}({}) {{",
                method.return_type,
                method_name(&class.name, &method.name),
                method_param_list(&class.name, &method.params)
            );
            self.compile_function_body(emitter, &signature, method);
        }
    }

    fn compile_function_body(&self, emitter: &mut Emitter, signature: &str, function: &FunctionDecl) {
        emitter.line(signature);
        emitter.indented(|e| StatementCompiler::new(e).compile_body(&function.body));
        emitter.line("}");
        emitter.blank_line();
    }
}

impl Default for CCodeGen {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

/// Generates C with the default options.
pub fn generate(program: &Program) -> String {
    CCodeGen::default().generate(program)
}
