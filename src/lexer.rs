use crate::ast::Token;
use crate::error::ParseError;

/// Operator spellings, longest tier first so `===` wins over `==` and `=`
/// never matches at all.
const OPERATOR_TIERS: &[&[&str]] = &[
    &[">>>", "===", "!=="],
    &["**", "==", "!=", "<=", ">=", "&&", "||", "??", "<<", ">>"],
    &["+", "-", "*", "/", "%", "<", ">", "!"],
];

/// On-demand tokenizer over one expression string.
///
/// Holds exactly one current token/label pair. Starts in [`Token::Begin`];
/// the first [`Tokenizer::next`] produces the first real token, and
/// [`Token::End`] is terminal once the input is exhausted.
pub struct Tokenizer {
    source: String,
    input: Vec<char>,
    position: usize,
    token: Token,
    label: String,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Tokenizer {
            source: input.to_string(),
            input: input.chars().collect(),
            position: 0,
            token: Token::Begin,
            label: String::new(),
        }
    }

    /// The current token kind.
    pub fn token(&self) -> Token {
        self.token
    }

    /// The matched text of the current token.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The original input, untouched, for diagnostics.
    pub fn source(&self) -> &str {
        &self.source
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn matches_at(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(i, ch)| self.input.get(self.position + i) == Some(&ch))
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_number(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads a quoted string literal, keeping the raw text (quotes and
    /// escapes included); the parser decodes it. A backslash always takes
    /// the next character with it, so escaped quotes never end the literal.
    fn read_string(&mut self, quote: char) -> Result<String, ParseError> {
        let mut result = String::new();
        result.push(quote);
        self.advance();

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    result.push(c);
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    result.push('\\');
                    self.advance();
                    match self.current_char() {
                        Some(escaped) => {
                            result.push(escaped);
                            self.advance();
                        }
                        None => return Err(ParseError::syntax(&self.source)),
                    }
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        // Unterminated literal
        Err(ParseError::syntax(&self.source))
    }

    fn set(&mut self, token: Token, label: &str) {
        self.token = token;
        self.label = label.to_string();
    }

    /// Advances to the next token, trying the lexical rules in fixed
    /// priority order: keywords/identifiers, dot, number, string, operators
    /// longest-first, punctuation. Fails if input remains but nothing
    /// matches.
    pub fn next(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            self.token = Token::End;
            self.label.clear();
            return Ok(());
        };

        if ch.is_alphabetic() || ch == '_' {
            let ident = self.read_identifier();
            self.token = match ident.as_str() {
                "undefined" => Token::Undefined,
                "true" => Token::True,
                "false" => Token::False,
                "in" => Token::In,
                _ => Token::Name,
            };
            self.label = ident;
            return Ok(());
        }

        if ch == '.' {
            self.advance();
            self.set(Token::Dot, ".");
            return Ok(());
        }

        if ch.is_ascii_digit() {
            self.label = self.read_number();
            self.token = Token::Number;
            return Ok(());
        }

        if ch == '"' || ch == '\'' {
            self.label = self.read_string(ch)?;
            self.token = Token::Str;
            return Ok(());
        }

        // `||` is in the operator tiers, so it wins over pipe punctuation.
        for tier in OPERATOR_TIERS {
            for op in *tier {
                if self.matches_at(op) {
                    self.position += op.chars().count();
                    self.set(Token::Operator, op);
                    return Ok(());
                }
            }
        }

        let punctuation = match ch {
            ',' => Some(Token::Comma),
            '(' => Some(Token::Left),
            ')' => Some(Token::Right),
            '[' => Some(Token::LeftSquare),
            ']' => Some(Token::RightSquare),
            '|' => Some(Token::Pipe),
            _ => None,
        };
        if let Some(token) = punctuation {
            self.advance();
            self.set(token, &ch.to_string());
            return Ok(());
        }

        Err(ParseError::syntax(&self.source))
    }

    /// Returns the current label and advances in one call.
    pub fn step(&mut self) -> Result<String, ParseError> {
        let label = std::mem::take(&mut self.label);
        self.next()?;
        Ok(label)
    }

    /// Accepts only if the current token is one of `expected`, then behaves
    /// like [`Tokenizer::step`].
    pub fn expect(&mut self, expected: &[Token]) -> Result<String, ParseError> {
        if expected.contains(&self.token) {
            self.step()
        } else {
            Err(ParseError::syntax(&self.source))
        }
    }
}

#[test]
fn test_keywords_and_names() {
    let mut tokenizer = Tokenizer::new("undefined true false in index");
    tokenizer.next().unwrap();
    assert_eq!(tokenizer.token(), Token::Undefined);
    tokenizer.next().unwrap();
    assert_eq!(tokenizer.token(), Token::True);
    tokenizer.next().unwrap();
    assert_eq!(tokenizer.token(), Token::False);
    tokenizer.next().unwrap();
    assert_eq!(tokenizer.token(), Token::In);
    tokenizer.next().unwrap();
    assert_eq!(tokenizer.token(), Token::Name);
    assert_eq!(tokenizer.label(), "index");
    tokenizer.next().unwrap();
    assert_eq!(tokenizer.token(), Token::End);
}

#[test]
fn test_longest_operator_wins() {
    let mut tokenizer = Tokenizer::new("a === b >>> 2");
    tokenizer.next().unwrap();
    tokenizer.next().unwrap();
    assert_eq!(tokenizer.token(), Token::Operator);
    assert_eq!(tokenizer.label(), "===");
    tokenizer.next().unwrap();
    tokenizer.next().unwrap();
    assert_eq!(tokenizer.label(), ">>>");
}

#[test]
fn test_pipe_vs_or() {
    let mut tokenizer = Tokenizer::new("a | b || c");
    tokenizer.next().unwrap();
    tokenizer.next().unwrap();
    assert_eq!(tokenizer.token(), Token::Pipe);
    tokenizer.next().unwrap();
    tokenizer.next().unwrap();
    assert_eq!(tokenizer.token(), Token::Operator);
    assert_eq!(tokenizer.label(), "||");
}
