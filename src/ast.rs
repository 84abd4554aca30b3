use serde::Serialize;

/// A single literal or identifier, kept as its raw source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expression {
    pub literal: String,
}

impl Expression {
    pub fn new(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub param_type: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarDecl {
    pub var_type: String,
    pub name: String,
    pub default: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Statement {
    VarDecl(VarDecl),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDecl {
    pub return_type: String,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum ClassMember {
    Field(VarDecl),
    Method(FunctionDecl),
    // Bare expression in a class body; parsed but never emitted.
    Statement { statement: Statement },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDecl {
    pub name: String,
    pub parent: Option<String>, // Only set when `: Parent` was written
    pub members: Vec<ClassMember>,
}

impl ClassDecl {
    pub fn fields(&self) -> impl Iterator<Item = &VarDecl> {
        self.members.iter().filter_map(|member| match member {
            ClassMember::Field(field) => Some(field),
            ClassMember::Method(_) | ClassMember::Statement { .. } => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.members.iter().filter_map(|member| match member {
            ClassMember::Method(method) => Some(method),
            ClassMember::Field(_) | ClassMember::Statement { .. } => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Declaration {
    Function(FunctionDecl),
    Class(ClassDecl),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}
