/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Numeric coercion (`+`)
    Plus,
    /// Numeric negation (`-`)
    Minus,
    /// Logical not (`!`)
    Not,
}

impl UnaryOp {
    pub fn from_label(label: &str) -> Option<UnaryOp> {
        match label {
            "+" => Some(UnaryOp::Plus),
            "-" => Some(UnaryOp::Minus),
            "!" => Some(UnaryOp::Not),
            _ => None,
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Remainder (`%`)
    Modulo,
    /// Exponentiation (`**`), right-associative
    Power,

    // Bitwise shifts (32-bit integer conversion)
    /// Left shift (`<<`)
    ShiftLeft,
    /// Sign-propagating right shift (`>>`)
    ShiftRight,
    /// Zero-fill right shift (`>>>`)
    ShiftRightUnsigned,

    // Comparison
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,

    // Equality
    /// Coercing equality (`==`)
    Equal,
    /// Coercing inequality (`!=`)
    NotEqual,
    /// Strict equality (`===`)
    StrictEqual,
    /// Strict inequality (`!==`)
    StrictNotEqual,

    // Logical (short-circuiting)
    /// Logical AND (`&&`), returns an operand value
    And,
    /// Logical OR (`||`), returns an operand value
    Or,
    /// Undefined-coalescing (`??`)
    Nullish,

    /// Membership test (`in`)
    In,
}

impl BinOp {
    pub fn from_label(label: &str) -> Option<BinOp> {
        match label {
            "+" => Some(BinOp::Add),
            "-" => Some(BinOp::Subtract),
            "*" => Some(BinOp::Multiply),
            "/" => Some(BinOp::Divide),
            "%" => Some(BinOp::Modulo),
            "**" => Some(BinOp::Power),
            "<<" => Some(BinOp::ShiftLeft),
            ">>" => Some(BinOp::ShiftRight),
            ">>>" => Some(BinOp::ShiftRightUnsigned),
            "<" => Some(BinOp::LessThan),
            "<=" => Some(BinOp::LessEqual),
            ">" => Some(BinOp::GreaterThan),
            ">=" => Some(BinOp::GreaterEqual),
            "==" => Some(BinOp::Equal),
            "!=" => Some(BinOp::NotEqual),
            "===" => Some(BinOp::StrictEqual),
            "!==" => Some(BinOp::StrictNotEqual),
            "&&" => Some(BinOp::And),
            "||" => Some(BinOp::Or),
            "??" => Some(BinOp::Nullish),
            "in" => Some(BinOp::In),
            _ => None,
        }
    }
}

/// Associativity of one precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// One binary-operator precedence level: the operator labels it accepts and
/// how they associate.
#[derive(Debug, Clone, Copy)]
pub struct Level {
    pub ops: &'static [&'static str],
    pub assoc: Assoc,
}

/// Binary-operator precedence table, loosest binding first.
///
/// Shared, read-only configuration for every parser instance. Each level
/// parses its operands at the next level down; `**` is the only
/// right-associative level.
pub const PRECEDENCE: &[Level] = &[
    Level { ops: &["??"], assoc: Assoc::Left },
    Level { ops: &["||"], assoc: Assoc::Left },
    Level { ops: &["&&"], assoc: Assoc::Left },
    Level { ops: &["==", "!=", "===", "!=="], assoc: Assoc::Left },
    Level { ops: &["<", "<=", ">", ">=", "in"], assoc: Assoc::Left },
    Level { ops: &["<<", ">>", ">>>"], assoc: Assoc::Left },
    Level { ops: &["+", "-"], assoc: Assoc::Left },
    Level { ops: &["*", "/", "%"], assoc: Assoc::Left },
    Level { ops: &["**"], assoc: Assoc::Right },
];
