use thiserror::Error;

/// Errors raised while tokenizing or parsing an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Malformed token stream or grammar violation. Carries the original
    /// input text, untouched, for diagnostics.
    #[error("syntax error in expression: {input}")]
    Syntax { input: String },

    /// Invariant violation inside the parser itself. Indicates a defect in
    /// this crate, not malformed user input.
    #[error("internal parser error: {0}")]
    Internal(String),
}

impl ParseError {
    pub fn syntax(input: &str) -> ParseError {
        ParseError::Syntax {
            input: input.to_string(),
        }
    }
}
