use tracing::{debug, trace};

use crate::ast::{
    ClassDecl, ClassMember, Declaration, Expression, FunctionDecl, Param, Program, Statement,
    VarDecl,
};
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Token, TokenKind};

/// What `consume` accepts: a token kind, or an exact piece of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Kind(TokenKind),
    Text(&'static str),
}

impl Expected {
    fn matches(self, token: &Token) -> bool {
        match self {
            Expected::Kind(kind) => token.kind == kind,
            Expected::Text(text) => token.text == text,
        }
    }

    fn describe(expected: &[Expected]) -> String {
        let names: Vec<String> = expected
            .iter()
            .map(|e| match e {
                Expected::Kind(kind) => kind.name().to_string(),
                Expected::Text(text) => format!("'{}'", text),
            })
            .collect();
        names.join(" or ")
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // Lookahead and `current()` rely on a trailing EOF.
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                line,
                column: 0,
            });
        }
        Self { tokens, current: 0 }
    }

    pub fn parse(&mut self) -> ParseResult<Program> {
        let mut declarations = Vec::new();

        while !self.current().is(TokenKind::Eof) {
            let declaration = if self.current().text == "class" {
                Declaration::Class(self.parse_class()?)
            } else {
                Declaration::Function(self.parse_function()?)
            };
            declarations.push(declaration);
        }

        debug!(declarations = declarations.len(), "parsing finished");
        Ok(Program { declarations })
    }

    fn current(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.current + offset).min(last)]
    }

    /// Advances one token. With a non-empty `expected`, the token must match
    /// at least one entry or the whole parse fails.
    fn consume(&mut self, expected: &[Expected]) -> ParseResult<Token> {
        let token = self.current().clone();

        if !expected.is_empty() && !expected.iter().any(|e| e.matches(&token)) {
            let expected = Expected::describe(expected);
            return Err(if token.is(TokenKind::Eof) {
                ParseError::UnexpectedEof {
                    expected,
                    location: token.location(),
                }
            } else {
                ParseError::UnexpectedToken {
                    expected,
                    found: token.to_string(),
                    location: token.location(),
                }
            });
        }

        self.current += 1;
        Ok(token)
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        self.consume(&[Expected::Kind(kind)])
    }

    fn expect_identifier(&mut self) -> ParseResult<String> {
        Ok(self.expect(TokenKind::Id)?.text)
    }

    // retType name ( params ) { body }
    fn parse_function(&mut self) -> ParseResult<FunctionDecl> {
        let return_type = self.expect_identifier()?;
        let name = self.expect_identifier()?;
        self.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;

        trace!(%name, params = params.len(), statements = body.len(), "parsed function");
        Ok(FunctionDecl {
            return_type,
            name,
            params,
            body,
        })
    }

    fn parse_params(&mut self) -> ParseResult<Vec<Param>> {
        let mut params = Vec::new();
        if self.current().is(TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            let param_type = self.expect_identifier()?;
            let name = self.expect_identifier()?;
            params.push(Param { param_type, name });

            if self.current().is(TokenKind::Comma) {
                self.expect(TokenKind::Comma)?;
            } else {
                break;
            }
        }

        Ok(params)
    }

    fn parse_block(&mut self) -> ParseResult<Vec<Statement>> {
        self.expect(TokenKind::LBrace)?;
        let mut statements = Vec::new();
        while !self.current().is(TokenKind::RBrace) {
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(statements)
    }

    fn starts_var_decl(&self) -> bool {
        self.current().is(TokenKind::Id) && self.peek_at(1).is(TokenKind::Id)
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        if self.starts_var_decl() {
            return Ok(Statement::VarDecl(self.parse_var_decl()?));
        }

        let expression = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Statement::Expression(expression))
    }

    // type name [= expr] ;
    fn parse_var_decl(&mut self) -> ParseResult<VarDecl> {
        let var_type = self.expect_identifier()?;
        let name = self.expect_identifier()?;

        let mut default = None;
        if self.current().text == "=" {
            self.expect(TokenKind::Op)?;
            default = Some(self.parse_expression()?);
        }
        self.expect(TokenKind::Semicolon)?;

        Ok(VarDecl {
            var_type,
            name,
            default,
        })
    }

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        let token = self.consume(&[])?;
        match token.kind {
            TokenKind::Number | TokenKind::String | TokenKind::Id => {
                Ok(Expression::new(token.text))
            }
            TokenKind::Eof => Err(ParseError::UnexpectedEof {
                expected: "expression".to_string(),
                location: token.location(),
            }),
            _ => Err(ParseError::InvalidExpression {
                found: token.to_string(),
                location: token.location(),
            }),
        }
    }

    // class Name [: Parent] { members }
    fn parse_class(&mut self) -> ParseResult<ClassDecl> {
        self.consume(&[Expected::Text("class")])?;
        let name = self.expect_identifier()?;

        let mut parent = None;
        if self.current().is(TokenKind::Colon) {
            self.expect(TokenKind::Colon)?;
            parent = Some(self.expect_identifier()?);
        }

        self.expect(TokenKind::LBrace)?;
        let mut members = Vec::new();
        while !self.current().is(TokenKind::RBrace) {
            members.push(self.parse_member()?);
        }
        self.expect(TokenKind::RBrace)?;

        trace!(%name, members = members.len(), "parsed class");
        Ok(ClassDecl {
            name,
            parent,
            members,
        })
    }

    // Same dispatch as a block statement, except `type name (` opens a method.
    fn parse_member(&mut self) -> ParseResult<ClassMember> {
        if self.current().is(TokenKind::Eof) {
            return Err(ParseError::UnexpectedEof {
                expected: "RBRACE".to_string(),
                location: self.current().location(),
            });
        }
        if self.current().is(TokenKind::Id) && self.peek_at(1).is(TokenKind::Eof) {
            return Err(ParseError::UnexpectedEof {
                expected: "ID".to_string(),
                location: self.peek_at(1).location(),
            });
        }

        if !self.starts_var_decl() {
            let statement = self.parse_statement()?;
            return Ok(ClassMember::Statement { statement });
        }

        if self.peek_at(2).is(TokenKind::LParen) {
            Ok(ClassMember::Method(self.parse_function()?))
        } else {
            Ok(ClassMember::Field(self.parse_var_decl()?))
        }
    }
}

/// Convenience wrapper around [`Parser::parse`].
pub fn parse(tokens: Vec<Token>) -> ParseResult<Program> {
    Parser::new(tokens).parse()
}
