// tests/compiler_tests.rs

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sprig_lang::compiler::{compile, CompiledExpr, DiagnosticSink};
use sprig_lang::evaluator::EvalError;
use sprig_lang::parser::Parser;
use sprig_lang::value::{Context, Value};

fn compiled(input: &str) -> CompiledExpr {
    compile(Parser::parse_str(input).unwrap())
}

fn ctx(entries: &[(&str, Value)]) -> Context {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Counts reports so tests can assert the one-report-per-call contract.
struct CountingSink(AtomicUsize);

impl CountingSink {
    fn new() -> Arc<CountingSink> {
        Arc::new(CountingSink(AtomicUsize::new(0)))
    }

    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl DiagnosticSink for CountingSink {
    fn report(&self, _error: &EvalError) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Strict evaluation
// ============================================================================

#[test]
fn test_call_returns_raw_value() {
    let ctx = ctx(&[("n", Value::Number(3.0))]);
    assert_eq!(
        compiled("n * 2 + 1").call(&ctx).unwrap(),
        Value::Number(7.0)
    );
}

#[test]
fn test_call_propagates_errors() {
    let ctx = ctx(&[("n", Value::Number(3.0))]);
    let err = compiled("n.field").call(&ctx).unwrap_err();
    assert!(matches!(err, EvalError::AccessError(_)));
}

#[test]
fn test_literal_round_trips() {
    let empty = HashMap::new();
    assert_eq!(
        compiled("undefined").call(&empty).unwrap(),
        Value::Undefined
    );
    assert_eq!(
        compiled("true").call(&empty).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        compiled("false").call(&empty).unwrap(),
        Value::Boolean(false)
    );
    assert_eq!(compiled("42").call(&empty).unwrap(), Value::Number(42.0));
    assert_eq!(
        compiled("'hi'").call(&empty).unwrap(),
        Value::String("hi".to_string())
    );
}

// ============================================================================
// Safe coercion forms: success paths
// ============================================================================

#[test]
fn test_call_bool_truthiness() {
    let empty = HashMap::new();
    assert!(compiled("1 < 2").call_bool(&empty));
    assert!(!compiled("0").call_bool(&empty));
    assert!(!compiled("''").call_bool(&empty));
    assert!(!compiled("missing").call_bool(&empty));
}

#[test]
fn test_call_int_truncates_toward_zero() {
    let empty = HashMap::new();
    assert_eq!(compiled("7 / 2").call_int(&empty), 3);
    assert_eq!(compiled("-7 / 2").call_int(&empty), -3);
    // Non-finite results collapse to zero.
    assert_eq!(compiled("1 / 0").call_int(&empty), 0);
}

#[test]
fn test_call_number_keeps_successful_nan() {
    let empty = HashMap::new();
    assert!(compiled("undefined + 1").call_number(&empty).is_nan());
    assert_eq!(compiled("'3' * 2").call_number(&empty), 6.0);
}

#[test]
fn test_call_string_formats_numbers() {
    let empty = HashMap::new();
    assert_eq!(compiled("1 + 1").call_string(&empty), "2");
    assert_eq!(compiled("7 / 2").call_string(&empty), "3.5");
}

#[test]
fn test_call_list_wraps_scalars() {
    let ctx = ctx(&[(
        "items",
        Value::List(vec![Value::Number(1.0), Value::Number(2.0)]),
    )]);
    assert_eq!(
        compiled("items").call_list(&ctx),
        vec![Value::Number(1.0), Value::Number(2.0)]
    );
    assert_eq!(compiled("5").call_list(&ctx), vec![Value::Number(5.0)]);
}

#[test]
fn test_call_map_passthrough_and_default() {
    let map = HashMap::from([("a".to_string(), Value::Number(1.0))]);
    let ctx = ctx(&[("m", Value::Map(map.clone()))]);
    assert_eq!(compiled("m").call_map(&ctx), map);
    // Non-map results become an empty map, without error.
    assert!(compiled("5").call_map(&ctx).is_empty());
}

// ============================================================================
// Safe coercion forms: failure paths and sink contract
// ============================================================================

#[test]
fn test_failures_yield_defaults() {
    let ctx = ctx(&[("n", Value::Number(3.0))]);
    // `n.field` is an access error on a scalar.
    assert!(!compiled("n.field").call_bool(&ctx));
    assert_eq!(compiled("n.field").call_int(&ctx), 0);
    assert_eq!(compiled("n.field").call_number(&ctx), 0.0);
    assert_eq!(compiled("n.field").call_string(&ctx), "");
    assert!(compiled("n.field").call_list(&ctx).is_empty());
    assert!(compiled("n.field").call_map(&ctx).is_empty());
}

#[test]
fn test_sink_reported_once_per_failed_call() {
    let sink = CountingSink::new();
    let node = Parser::parse_str("n.field").unwrap();
    let expr = CompiledExpr::with_sink(node, sink.clone());
    let ctx = ctx(&[("n", Value::Number(3.0))]);

    expr.call_string(&ctx);
    assert_eq!(sink.count(), 1);
    expr.call_string(&ctx);
    expr.call_int(&ctx);
    assert_eq!(sink.count(), 3);
}

#[test]
fn test_sink_silent_on_success() {
    let sink = CountingSink::new();
    let node = Parser::parse_str("1 + 1").unwrap();
    let expr = CompiledExpr::with_sink(node, sink.clone());
    let empty = HashMap::new();

    assert_eq!(expr.call_int(&empty), 2);
    expr.call_string(&empty);
    assert_eq!(sink.count(), 0);
}

#[test]
fn test_strict_call_bypasses_sink() {
    let sink = CountingSink::new();
    let node = Parser::parse_str("n.field").unwrap();
    let expr = CompiledExpr::with_sink(node, sink.clone());
    let ctx = ctx(&[("n", Value::Number(3.0))]);

    assert!(expr.call(&ctx).is_err());
    assert_eq!(sink.count(), 0);
}

// ============================================================================
// Reuse across contexts
// ============================================================================

#[test]
fn test_compiled_expression_is_reusable() {
    let expr = compiled("x + 1");
    for i in 0..5 {
        let ctx = ctx(&[("x", Value::Number(i as f64))]);
        assert_eq!(expr.call(&ctx).unwrap(), Value::Number(i as f64 + 1.0));
    }
}

#[test]
fn test_free_matches_parse() {
    let expr = compiled("a.b + c[d]");
    assert_eq!(expr.free(), vec!["a", "c", "d"]);
}
