use crate::ast::{BinOp, UnaryOp};
use crate::value::Value;

/// One step of a reference chain.
#[derive(Debug, Clone, PartialEq)]
pub enum PathComponent {
    /// Static field access (`.name`)
    Field(String),

    /// Computed subscript access (`[expr]`)
    ///
    /// The index expression is evaluated against the same context as the
    /// reference itself, so dynamic indices like `items[cursor + 1]` work.
    Subscript(Box<Node>),
}

/// Abstract Syntax Tree node for a parsed expression.
///
/// Nodes are immutable once built. Each exposes [`Node::free`], the set of
/// root context names the subtree may read, which the host consumes for
/// change detection.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Fixed scalar captured at parse time: `undefined`, a boolean, a
    /// number, or a string.
    Literal(Value),

    /// Root name plus zero or more field/subscript accesses
    ///
    /// # Examples
    /// ```text
    /// user
    /// a.b[0].c
    /// items[cursor + 1]
    /// ```
    Reference {
        root: String,
        path: Vec<PathComponent>,
    },

    /// Unary operation (`+x`, `-x`, `!x`)
    Unary { op: UnaryOp, operand: Box<Node> },

    /// Binary operation
    Binary {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// Call-like node: a name resolved dynamically from the context at
    /// evaluation time, applied to the argument values in order.
    ///
    /// Not produced by the expression grammar; hosts construct these when
    /// wiring handlers.
    Bind { name: String, args: Vec<Node> },

    /// Applies the value of `right` (as a callable) to the value of `left`
    ///
    /// # Example
    /// ```text
    /// user.name | capitalize
    /// ```
    Pipe { left: Box<Node>, right: Box<Node> },

    /// Literal template text between interpolation regions
    StaticFragment(String),

    /// Alternating static/expression fragments of a template string; always
    /// starts and ends with a (possibly empty) `StaticFragment`.
    Interpolated(Vec<Node>),

    /// Parsed `name in expr` iteration header; expanded by the renderer,
    /// never evaluated here.
    CollectionIteration { name: String, source: Box<Node> },

    /// Parsed `key, value in expr` iteration header
    DictionaryIteration {
        key_name: String,
        value_name: String,
        source: Box<Node>,
    },
}

impl Node {
    /// The root context names this expression may read during evaluation,
    /// de-duplicated, in order of first occurrence.
    pub fn free(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_free(&mut names);
        names
    }

    fn collect_free(&self, names: &mut Vec<String>) {
        match self {
            Node::Literal(_) | Node::StaticFragment(_) => {}
            Node::Reference { root, path } => {
                push_unique(names, root);
                for component in path {
                    if let PathComponent::Subscript(index) = component {
                        index.collect_free(names);
                    }
                }
            }
            Node::Unary { operand, .. } => operand.collect_free(names),
            Node::Binary { left, right, .. } | Node::Pipe { left, right } => {
                left.collect_free(names);
                right.collect_free(names);
            }
            Node::Bind { name, args } => {
                push_unique(names, name);
                for arg in args {
                    arg.collect_free(names);
                }
            }
            Node::Interpolated(fragments) => {
                for fragment in fragments {
                    fragment.collect_free(names);
                }
            }
            Node::CollectionIteration { source, .. }
            | Node::DictionaryIteration { source, .. } => source.collect_free(names),
        }
    }
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}
