//! Translator from a small C-like language with classes to plain C.
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → CCodeGen → C text
//! ```
//!
//! 1. [`lexer`] splits source text into [`lexer::Token`]s with line/column.
//! 2. [`parser`] builds an [`ast::Program`] by recursive descent.
//! 3. [`c_codegen`] walks the tree and writes C: functions map directly,
//!    classes become a struct plus `Class_method` free functions.
//!
//! The first lexing or parsing fault aborts the run; code generation has no
//! failure path.

pub mod ast;
pub mod c_codegen;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;

use tracing::debug;

use ast::Program;
use c_codegen::{CCodeGen, GeneratorOptions};
use error::CompileResult;
use lexer::Token;

/// Lexes and parses `source` into a tree.
pub fn parse_source(source: &str) -> CompileResult<Program> {
    let tokens = lexer::tokenize(source)?;
    let program = parser::parse(tokens)?;
    Ok(program)
}

/// Runs the whole pipeline with default options.
pub fn compile(source: &str) -> CompileResult<String> {
    compile_with_options(source, &GeneratorOptions::default())
}

pub fn compile_with_options(source: &str, options: &GeneratorOptions) -> CompileResult<String> {
    debug!(bytes = source.len(), "compiling");
    let program = parse_source(source)?;
    Ok(CCodeGen::new(options.clone()).generate(&program))
}

/// Pretty JSON of the token stream, EOF included.
pub fn dump_tokens(source: &str) -> CompileResult<String> {
    let tokens: Vec<Token> = lexer::tokenize(source)?;
    Ok(serde_json::to_string_pretty(&tokens)?)
}

/// Pretty JSON of the parsed tree.
pub fn dump_ast(source: &str) -> CompileResult<String> {
    let program = parse_source(source)?;
    Ok(serde_json::to_string_pretty(&program)?)
}
