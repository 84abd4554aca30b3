use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::error::{LexError, LexResult, SourceLocation};

/// Token categories. Declaration order is significant: when several
/// categories could match at the same position, the earlier one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    String,
    Id,
    Op,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LAngle,
    RAngle,
    Colon,
    Semicolon,
    Comma,
    Newline,
    Skip,
    Mismatch,
    Eof,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Id => "ID",
            TokenKind::Op => "OP",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LAngle => "LANGLE",
            TokenKind::RAngle => "RANGLE",
            TokenKind::Colon => "COLON",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Skip => "SKIP",
            TokenKind::Mismatch => "MISMATCH",
            TokenKind::Eof => "EOF",
        }
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

// EOF has no pattern; it is appended once the scan completes.
const TOKEN_SPECS: &[(TokenKind, &str)] = &[
    (TokenKind::Number, r"[0-9]+(?:\.[0-9]*)?"),
    (TokenKind::String, r#""(?:[^"\\]|\\.)*""#),
    (TokenKind::Id, r"[A-Za-z_][A-Za-z0-9_]*"),
    (TokenKind::Op, r"[+\-*/=<>!]"),
    (TokenKind::LParen, r"\("),
    (TokenKind::RParen, r"\)"),
    (TokenKind::LBrace, r"\{"),
    (TokenKind::RBrace, r"\}"),
    (TokenKind::LAngle, r"<"),
    (TokenKind::RAngle, r">"),
    (TokenKind::Colon, r":"),
    (TokenKind::Semicolon, r";"),
    (TokenKind::Comma, r","),
    (TokenKind::Newline, r"\n"),
    (TokenKind::Skip, r"[ \t]+"),
    (TokenKind::Mismatch, r"."),
];

fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    TOKEN_REGEX.get_or_init(|| {
        let pattern = TOKEN_SPECS
            .iter()
            .map(|(kind, regex)| format!("(?P<{}>{})", kind.name(), regex))
            .collect::<Vec<_>>()
            .join("|");
        // Constant input; `test_token_pattern_compiles` exercises this build.
        Regex::new(&pattern).expect("token pattern is a valid regular expression")
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.text)
    }
}

pub struct Lexer<'a> {
    input: &'a str,
    line: usize,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            line: 1,
            line_start: 0,
        }
    }

    /// Scans the whole input in one pass. Whitespace and newlines are
    /// dropped; the first unrecognised character aborts the scan.
    pub fn tokenize(mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();

        for caps in token_regex().captures_iter(self.input) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let Some(kind) = TOKEN_SPECS
                .iter()
                .map(|(kind, _)| *kind)
                .find(|kind| caps.name(kind.name()).is_some())
            else {
                continue;
            };
            let column = whole.start() - self.line_start;

            match kind {
                TokenKind::Skip => {}
                TokenKind::Newline => {
                    self.line += 1;
                    self.line_start = whole.end();
                }
                TokenKind::Mismatch => {
                    let character = whole.as_str().chars().next().unwrap_or_default();
                    return Err(LexError::UnexpectedCharacter {
                        character,
                        location: SourceLocation::new(self.line, column),
                    });
                }
                _ => {
                    trace!(kind = %kind, text = whole.as_str(), line = self.line, column, "token");
                    tokens.push(Token {
                        kind,
                        text: whole.as_str().to_string(),
                        line: self.line,
                        column,
                    });
                }
            }
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            text: String::new(),
            line: self.line,
            column: 0,
        });

        debug!(tokens = tokens.len(), lines = self.line, "lexing finished");
        Ok(tokens)
    }
}

/// Convenience wrapper around [`Lexer::tokenize`].
pub fn tokenize(input: &str) -> LexResult<Vec<Token>> {
    Lexer::new(input).tokenize()
}
