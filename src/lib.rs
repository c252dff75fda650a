//! Expression language for templating and data binding.
//!
//! Text flows one way: source → tokens → AST → compiled evaluator. The
//! host parses an expression once (or a whole template via
//! [`Parser::interpolate`]), asks the AST which context names it reads via
//! [`Node::free`], and then calls the compiled form repeatedly with fresh
//! context values.
//!
//! ```
//! use std::collections::HashMap;
//! use sprig_lang::{compile, Parser, Value};
//!
//! let node = Parser::parse_str("price * qty").unwrap();
//! assert_eq!(node.free(), vec!["price", "qty"]);
//!
//! let ctx = HashMap::from([
//!     ("price".to_string(), Value::Number(2.5)),
//!     ("qty".to_string(), Value::Number(4.0)),
//! ]);
//! assert_eq!(compile(node).call(&ctx).unwrap(), Value::Number(10.0));
//! ```

pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{BinOp, Node, PathComponent, Token, UnaryOp};
pub use compiler::{compile, CompiledExpr, DiagnosticSink, TracingSink};
pub use error::ParseError;
pub use evaluator::{eval, EvalError};
pub use lexer::Tokenizer;
pub use output::{from_json, to_json, to_json_string, to_json_string_pretty};
pub use parser::Parser;
pub use value::{Context, NativeFn, Value};
