//! # Sprig expression language - Abstract Syntax Tree
//!
//! This module defines the token kinds and AST node types for the Sprig
//! expression language, a small dynamically-typed language embedded in
//! template text and configuration by a host data-binding system.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical token kinds produced by the tokenizer
//! - **[operators]** - Unary/binary operators and the precedence table
//! - **[nodes]** - Expression nodes and the free-variable query
//!
//! ## Core Concepts
//!
//! ### Expressions
//!
//! ```text
//! a.b[0] + 1
//! price * quantity > limit && !archived
//! user.name | capitalize
//! ```
//!
//! ### Interpolated templates
//!
//! Template text with `{{ expr }}` regions parses into an alternating
//! sequence of static fragments and expressions:
//!
//! ```text
//! Hello {{ user.name }}, you have {{ unread }} messages.
//! ```
//!
//! ### Iteration headers
//!
//! `name in expr` and `key, value in expr` parse into iteration-header
//! nodes that an external renderer expands; this core never executes the
//! iteration itself.
//!
//! ### Dependency tracking
//!
//! Every node reports its free variables - the root context names it may
//! read - so the host can re-evaluate only the expressions affected by a
//! data change:
//!
//! ```
//! use sprig_lang::parser::Parser;
//!
//! let node = Parser::parse_str("a.b[i + 1] + a.c").unwrap();
//! assert_eq!(node.free(), vec!["a", "i"]);
//! ```
pub mod nodes;
pub mod operators;
pub mod tokens;

pub use nodes::{Node, PathComponent};
pub use operators::{Assoc, BinOp, Level, UnaryOp, PRECEDENCE};
pub use tokens::Token;
