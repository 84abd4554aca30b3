use super::emitter::Emitter;
use super::types::typed_name;
use crate::ast::{Expression, Statement, VarDecl};

pub struct StatementCompiler<'a> {
    pub emitter: &'a mut Emitter,
}

impl<'a> StatementCompiler<'a> {
    pub fn new(emitter: &'a mut Emitter) -> Self {
        Self { emitter }
    }

    pub fn compile_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::VarDecl(decl) => self.compile_var_decl(decl),
            Statement::Expression(expr) => self.compile_expression_statement(expr),
        }
    }

    /// `type name [= default];`
    pub fn compile_var_decl(&mut self, decl: &VarDecl) {
        let mut line = typed_name(&decl.var_type, &decl.name);
        if let Some(default) = &decl.default {
            line.push_str(" = ");
            line.push_str(&default.literal);
        }
        line.push(';');
        self.emitter.line(&line);
    }

    pub fn compile_expression_statement(&mut self, expr: &Expression) {
        self.emitter.line(&format!("{};", expr.literal));
    }

    pub fn compile_body(&mut self, body: &[Statement]) {
        for statement in body {
            self.compile_statement(statement);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(statements: &[Statement]) -> String {
        let mut emitter = Emitter::new(4);
        StatementCompiler::new(&mut emitter).compile_body(statements);
        emitter.finish()
    }

    #[test]
    fn test_var_decl_without_default() {
        let decl = VarDecl {
            var_type: "int".to_string(),
            name: "count".to_string(),
            default: None,
        };
        assert_eq!(compile(&[Statement::VarDecl(decl)]), "int count;\n");
    }

    #[test]
    fn test_var_decl_keeps_string_escapes() {
        let decl = VarDecl {
            var_type: "string".to_string(),
            name: "s".to_string(),
            default: Some(Expression::new(r#""a\"b\n""#)),
        };
        assert_eq!(
            compile(&[Statement::VarDecl(decl)]),
            "string s = \"a\\\"b\\n\";\n"
        );
    }

    #[test]
    fn test_expression_statements_follow_indent() {
        let mut emitter = Emitter::new(4);
        emitter.indented(|e| {
            StatementCompiler::new(e).compile_body(&[
                Statement::Expression(Expression::new("1.5")),
                Statement::Expression(Expression::new("x")),
            ]);
        });
        assert_eq!(emitter.finish(), "    1.5;\n    x;\n");
    }
}
