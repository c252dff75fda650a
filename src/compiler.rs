use std::collections::HashMap;
use std::sync::Arc;

use crate::ast::Node;
use crate::evaluator::{eval, EvalError};
use crate::value::{Context, Value};

/// Receives evaluation failures caught by the safe call forms.
///
/// The default sink logs through `tracing`; hosts that want to surface
/// failures differently (collect them, count them, abort) install their own
/// via [`CompiledExpr::with_sink`]. A sink is notified exactly once per
/// failed invocation.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, error: &EvalError);
}

/// Default sink: emits a warning event.
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, error: &EvalError) {
        tracing::warn!(%error, "expression evaluation failed");
    }
}

/// A parsed expression packaged for repeated evaluation.
///
/// Holds the immutable AST and a diagnostic sink; carries no mutable state,
/// so one compiled expression may be called repeatedly and concurrently with
/// different contexts.
///
/// [`CompiledExpr::call`] is the strict form and propagates failures. The
/// `call_*` forms never fail: they report the error to the sink and return
/// the target type's neutral default instead.
pub struct CompiledExpr {
    node: Node,
    sink: Arc<dyn DiagnosticSink>,
}

/// Packages a parsed node for evaluation with the default sink.
pub fn compile(node: Node) -> CompiledExpr {
    CompiledExpr::new(node)
}

impl CompiledExpr {
    pub fn new(node: Node) -> Self {
        CompiledExpr {
            node,
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_sink(node: Node, sink: Arc<dyn DiagnosticSink>) -> Self {
        CompiledExpr { node, sink }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Names the expression reads from the context, in first-use order.
    pub fn free(&self) -> Vec<String> {
        self.node.free()
    }

    /// Strict evaluation: the raw value, or the failure.
    pub fn call(&self, ctx: &Context) -> Result<Value, EvalError> {
        eval(&self.node, ctx)
    }

    fn guarded(&self, ctx: &Context) -> Option<Value> {
        match eval(&self.node, ctx) {
            Ok(value) => Some(value),
            Err(error) => {
                self.sink.report(&error);
                None
            }
        }
    }

    /// Truthiness of the result; `false` on failure.
    pub fn call_bool(&self, ctx: &Context) -> bool {
        self.guarded(ctx).map(|v| v.is_truthy()).unwrap_or(false)
    }

    /// Numeric result truncated toward zero; `0` on failure or a non-finite
    /// result.
    pub fn call_int(&self, ctx: &Context) -> i64 {
        match self.guarded(ctx) {
            Some(value) => {
                let n = value.as_number();
                if n.is_finite() {
                    n.trunc() as i64
                } else {
                    0
                }
            }
            None => 0,
        }
    }

    /// Numeric result; `0.0` on failure. A successful evaluation that
    /// coerces to NaN is kept as NaN, not replaced.
    pub fn call_number(&self, ctx: &Context) -> f64 {
        self.guarded(ctx).map(|v| v.as_number()).unwrap_or(0.0)
    }

    /// String form of the result; empty on failure.
    pub fn call_string(&self, ctx: &Context) -> String {
        self.guarded(ctx).map(|v| v.as_string()).unwrap_or_default()
    }

    /// The result as a sequence: lists pass through, scalars become a
    /// single-element list, failure becomes an empty list.
    pub fn call_list(&self, ctx: &Context) -> Vec<Value> {
        self.guarded(ctx).map(Value::into_list).unwrap_or_default()
    }

    /// The result if it is a mapping; empty otherwise or on failure.
    pub fn call_map(&self, ctx: &Context) -> HashMap<String, Value> {
        match self.guarded(ctx) {
            Some(Value::Map(map)) => map,
            _ => HashMap::new(),
        }
    }
}
