/// Lexical token kinds.
///
/// The tokenizer pairs each kind with the matched text (the "label"); the
/// kind alone drives the parser's decisions, while the label carries the
/// identifier name, number digits, quoted string, or operator spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Initial state before the first `next()`; never produced afterwards.
    Begin,

    /// End of input. Terminal; `next()` keeps returning it.
    End,

    /// The `undefined` keyword
    Undefined,

    /// The `true` keyword
    True,

    /// The `false` keyword
    False,

    /// The `in` keyword (membership operator)
    ///
    /// # Examples
    /// ```text
    /// "id" in user
    /// k, v in items
    /// ```
    In,

    /// Identifier
    ///
    /// Starts with a letter or underscore, followed by letters, digits, or
    /// underscores. Keywords are matched before identifiers.
    Name,

    /// Dot for field access
    Dot,

    /// Integer literal (a run of ASCII digits)
    Number,

    /// Single- or double-quoted string literal
    ///
    /// The label keeps the raw text including quotes and escapes; the parser
    /// decodes it.
    Str,

    /// Unary or binary operator; the label says which one
    ///
    /// # Examples
    /// ```text
    /// + - * ** === >>> ??
    /// ```
    Operator,

    /// Comma separating the names of a dictionary-iteration header
    Comma,

    /// Left parenthesis
    Left,

    /// Right parenthesis
    Right,

    /// Left bracket opening a subscript
    LeftSquare,

    /// Right bracket
    RightSquare,

    /// Pipe, applies the right-hand callable to the left-hand value
    Pipe,
}
