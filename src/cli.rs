//! CLI support for sprig-lang.
//!
//! The binary in `main.rs` is a thin argument-parsing shell; the work of
//! each subcommand lives here so it can be driven programmatically too.

use std::collections::HashMap;
use std::io;

use thiserror::Error;

use crate::compiler::compile;
use crate::output::{from_json, to_json_string, to_json_string_pretty};
use crate::parser::Parser;
use crate::value::{Context, Value};

/// Errors that can occur while running a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),
    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::EvalError),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Output coercion selected with `--as`. Mirrors the safe call forms on
/// [`crate::CompiledExpr`]; absent means strict evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Bool,
    Int,
    Number,
    String,
    List,
    Map,
}

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// The expression to evaluate
    pub expr: String,
    /// JSON object supplying the context
    pub input: Option<String>,
    /// Safe coercion to apply to the result
    pub coerce: Option<Coercion>,
    /// Pretty-print the output
    pub pretty: bool,
}

fn parse_context(input: Option<&str>) -> Result<Context, CliError> {
    let Some(text) = input else {
        return Ok(HashMap::new());
    };
    let json: serde_json::Value = serde_json::from_str(text)?;
    match from_json(json) {
        Value::Map(map) => Ok(map),
        // A non-object document becomes the context entry `it`.
        other => Ok(HashMap::from([("it".to_string(), other)])),
    }
}

/// Parses, compiles, and evaluates one expression against a JSON context.
pub fn execute_eval(options: &EvalOptions) -> Result<String, CliError> {
    let node = Parser::parse_str(&options.expr)?;
    let compiled = compile(node);
    let ctx = parse_context(options.input.as_deref())?;

    let value = match options.coerce {
        None => compiled.call(&ctx)?,
        Some(Coercion::Bool) => Value::Boolean(compiled.call_bool(&ctx)),
        Some(Coercion::Int) => Value::Number(compiled.call_int(&ctx) as f64),
        Some(Coercion::Number) => Value::Number(compiled.call_number(&ctx)),
        Some(Coercion::String) => Value::String(compiled.call_string(&ctx)),
        Some(Coercion::List) => Value::List(compiled.call_list(&ctx)),
        Some(Coercion::Map) => Value::Map(compiled.call_map(&ctx)),
    };

    Ok(if options.pretty {
        to_json_string_pretty(&value)
    } else {
        to_json_string(&value)
    })
}

/// Renders template text with `{{ expr }}` regions against a JSON context.
pub fn execute_template(text: &str, input: Option<&str>) -> Result<String, CliError> {
    let node = Parser::interpolate(text)?;
    let ctx = parse_context(input)?;
    Ok(compile(node).call(&ctx)?.as_string())
}

/// Lists the context names an expression depends on, one per line.
pub fn execute_deps(expr: &str) -> Result<String, CliError> {
    let node = Parser::parse_str(expr)?;
    Ok(node.free().join("\n"))
}

/// Parses an iteration header and describes it.
pub fn execute_iteration(header: &str) -> Result<String, CliError> {
    use crate::ast::Node;

    let node = Parser::parse_iteration(header)?;
    let free = node.free().join(", ");
    Ok(match node {
        Node::CollectionIteration { name, .. } => {
            format!("collection iteration binding '{name}'; depends on: {free}")
        }
        Node::DictionaryIteration {
            key_name,
            value_name,
            ..
        } => format!("dictionary iteration binding '{key_name}', '{value_name}'; depends on: {free}"),
        _ => return Err(CliError::Parse(crate::ParseError::Internal(
            "iteration parse produced a non-iteration node".to_string(),
        ))),
    })
}
