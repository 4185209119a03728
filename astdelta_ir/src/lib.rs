//! Syntax tree model and statement-level parser for structural source diffing.
//!
//! This crate provides:
//! - a tree model (`Program`, `Node`, `NodeKind`) with byte spans and
//!   line/column locations kept outside the kind payload
//! - a conservative statement-level parser (`parse`, `parse_module`)
//!
//! The parser is intentionally conservative:
//! - it recognizes the statement forms the diff engine reasons about
//!   (function declarations, variable declarations, return statements, and
//!   call-shaped expression statements)
//! - any other well-delimited statement is preserved as an unknown node
//!   carrying its normalized token text
//! - malformed input fails with a structured [`ParseError`]
//!
//! # Example
//!
//! ```rust
//! use astdelta_ir::parse_module;
//!
//! let program = parse_module("function greet() { return 1; }\n").expect("well-formed input");
//! assert_eq!(program.body.len(), 1);
//! ```

mod lexer;
mod parser;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Byte range `[start, end)` into the original source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Human-oriented location: 1-based line, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loc {
    pub line: usize,
    pub column: usize,
}

/// Structured parse failure with the offending location.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Declaration keyword for a variable statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKeyword {
    Let,
    Const,
    Var,
}

impl DeclKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclKeyword::Let => "let",
            DeclKeyword::Const => "const",
            DeclKeyword::Var => "var",
        }
    }
}

/// One `name [= init]` binding in a variable declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declarator {
    pub name: String,
    pub init: Option<Node>,
}

/// Body of an arrow function: a statement block or a bare expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form")]
pub enum ArrowBody {
    Block { statements: Vec<Node> },
    Expression { expression: Box<Node> },
}

/// Closed set of node kinds produced by the parser.
///
/// Positional data never lives in a kind payload, so the payload alone is a
/// position-free description of the node's structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    FunctionDecl {
        name: String,
        params: Vec<String>,
        body: Vec<Node>,
    },
    VariableDecl {
        keyword: DeclKeyword,
        declarators: Vec<Declarator>,
    },
    ExpressionStmt {
        expression: Box<Node>,
    },
    ReturnStmt {
        argument: Option<Box<Node>>,
    },
    /// Statement form the parser does not model; normalized token text kept.
    UnknownStmt {
        text: String,
    },
    Call {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    Identifier {
        name: String,
    },
    Member {
        object: Box<Node>,
        property: Box<Node>,
    },
    Literal {
        raw: String,
        value: String,
    },
    FunctionExpr {
        name: Option<String>,
        params: Vec<String>,
        body: Vec<Node>,
    },
    ArrowFunctionExpr {
        params: Vec<String>,
        body: ArrowBody,
    },
    /// Expression form the parser does not model; normalized token text kept.
    UnknownExpr {
        text: String,
    },
}

impl NodeKind {
    /// Stable display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::FunctionDecl { .. } => "FunctionDeclaration",
            NodeKind::VariableDecl { .. } => "VariableDeclaration",
            NodeKind::ExpressionStmt { .. } => "ExpressionStatement",
            NodeKind::ReturnStmt { .. } => "ReturnStatement",
            NodeKind::UnknownStmt { .. } => "UnknownStatement",
            NodeKind::Call { .. } => "CallExpression",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::Member { .. } => "MemberExpression",
            NodeKind::Literal { .. } => "Literal",
            NodeKind::FunctionExpr { .. } => "FunctionExpression",
            NodeKind::ArrowFunctionExpr { .. } => "ArrowFunctionExpression",
            NodeKind::UnknownExpr { .. } => "UnknownExpression",
        }
    }
}

/// One parsed syntax node: a kind payload plus positional metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub loc: Loc,
}

/// Source classification passed to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Module,
    Script,
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    pub syntax_version: u32,
    pub source_kind: SourceKind,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            syntax_version: 2020,
            source_kind: SourceKind::Module,
        }
    }
}

/// Program metadata recorded at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramMetadata {
    pub source_kind: SourceKind,
    pub syntax_version: u32,
    pub original_bytes: usize,
    pub line_count: usize,
}

/// Parsed program: ordered top-level statements plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub metadata: ProgramMetadata,
    pub body: Vec<Node>,
}

/// Parse source text with explicit options.
pub fn parse(source: &str, options: ParseOptions) -> Result<Program, ParseError> {
    parser::parse_program(source, options)
}

/// Parse source text as a module with default options.
pub fn parse_module(source: &str) -> Result<Program, ParseError> {
    parse(source, ParseOptions::default())
}
