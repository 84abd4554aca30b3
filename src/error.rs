use std::fmt;

use thiserror::Error;

/// Line is 1-based, column is a 0-based byte offset from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}, col {}", self.line, self.column)
    }
}

// Lexer Errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("{location}: Unexpected character {character:?}")]
    UnexpectedCharacter {
        character: char,
        location: SourceLocation,
    },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::UnexpectedCharacter { location, .. } => *location,
        }
    }
}

// Parser Errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{location}: Expected {expected} but got {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        location: SourceLocation,
    },
    #[error("{location}: Unexpected end of file, expected {expected}")]
    UnexpectedEof {
        expected: String,
        location: SourceLocation,
    },
    #[error("{location}: Unexpected token in expression: {found}")]
    InvalidExpression {
        found: String,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::UnexpectedToken { location, .. }
            | ParseError::UnexpectedEof { location, .. }
            | ParseError::InvalidExpression { location, .. } => *location,
        }
    }
}

// Compilation Errors
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Lexing error: {0}")]
    Lex(#[from] LexError),
    #[error("Parsing error: {0}")]
    Parse(#[from] ParseError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

// Result types
pub type LexResult<T> = Result<T, LexError>;
pub type ParseResult<T> = Result<T, ParseError>;
pub type CompileResult<T> = Result<T, CompileError>;
