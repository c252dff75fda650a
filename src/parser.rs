use crate::ast::{Assoc, BinOp, Level, Node, PathComponent, Token, UnaryOp, PRECEDENCE};
use crate::error::ParseError;
use crate::lexer::Tokenizer;
use crate::value::Value;

/// Recursive-descent parser over a [`Tokenizer`].
///
/// Construction primes the tokenizer, so the current token is always defined
/// (`Begin` exists only before that first advance). Binary operators climb
/// the constant [`PRECEDENCE`] table; everything tighter than the table
/// (unary operators, literals, parentheses, references) has a dedicated
/// grammar function.
pub struct Parser {
    tokenizer: Tokenizer,
}

impl Parser {
    pub fn new(input: &str) -> Result<Self, ParseError> {
        let mut tokenizer = Tokenizer::new(input);
        tokenizer.next()?;
        Ok(Parser { tokenizer })
    }

    /// Parses `input` as one complete expression.
    pub fn parse_str(input: &str) -> Result<Node, ParseError> {
        Parser::new(input)?.parse()
    }

    /// Parses one full expression and requires the input to be exhausted;
    /// trailing tokens are a syntax error rather than a silent partial
    /// parse.
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_expression()?;
        self.require_end()?;
        Ok(node)
    }

    /// Parses template text with `{{ expr }}` interpolation regions into an
    /// [`Node::Interpolated`] fragment sequence.
    ///
    /// Scans characters directly rather than going through the tokenizer: a
    /// lone `{` is literal text (emitted together with the character after
    /// it), `{{` opens an expression region, and inside a region a lone `}`
    /// is likewise literal. Reaching end of input inside an open region is a
    /// syntax error.
    pub fn interpolate(text: &str) -> Result<Node, ParseError> {
        let chars: Vec<char> = text.chars().collect();
        let mut fragments = Vec::new();
        let mut buffer = String::new();
        let mut i = 0;

        while i < chars.len() {
            if chars[i] == '{' && chars.get(i + 1) == Some(&'{') {
                fragments.push(Node::StaticFragment(std::mem::take(&mut buffer)));
                i += 2;

                let mut expression = String::new();
                loop {
                    if i >= chars.len() {
                        return Err(ParseError::syntax(text));
                    }
                    if chars[i] == '}' && chars.get(i + 1) == Some(&'}') {
                        i += 2;
                        break;
                    }
                    if chars[i] == '}' {
                        expression.push('}');
                        i += 1;
                        if let Some(&next) = chars.get(i) {
                            expression.push(next);
                            i += 1;
                        }
                        continue;
                    }
                    expression.push(chars[i]);
                    i += 1;
                }

                // Syntax failures inside a region report the whole template,
                // not the extracted slice.
                let node = Parser::parse_str(&expression).map_err(|e| match e {
                    ParseError::Internal(_) => e,
                    ParseError::Syntax { .. } => ParseError::syntax(text),
                })?;
                fragments.push(node);
            } else if chars[i] == '{' {
                buffer.push('{');
                i += 1;
                if let Some(&next) = chars.get(i) {
                    buffer.push(next);
                    i += 1;
                }
            } else {
                buffer.push(chars[i]);
                i += 1;
            }
        }

        fragments.push(Node::StaticFragment(buffer));
        Ok(Node::Interpolated(fragments))
    }

    /// Parses an iteration header: `name in expr` (collection) or
    /// `key, value in expr` (dictionary). The header describes an iteration
    /// for the external renderer; it is never evaluated here.
    pub fn parse_iteration(input: &str) -> Result<Node, ParseError> {
        let mut parser = Parser::new(input)?;
        let first = parser.tokenizer.expect(&[Token::Name])?;

        match parser.tokenizer.token() {
            Token::Comma => {
                parser.tokenizer.step()?;
                let second = parser.tokenizer.expect(&[Token::Name])?;
                parser.tokenizer.expect(&[Token::In])?;
                let source = parser.parse_expression()?;
                parser.require_end()?;
                Ok(Node::DictionaryIteration {
                    key_name: first,
                    value_name: second,
                    source: Box::new(source),
                })
            }
            Token::In => {
                parser.tokenizer.step()?;
                let source = parser.parse_expression()?;
                parser.require_end()?;
                Ok(Node::CollectionIteration {
                    name: first,
                    source: Box::new(source),
                })
            }
            _ => Err(parser.syntax_error()),
        }
    }

    fn syntax_error(&self) -> ParseError {
        ParseError::syntax(self.tokenizer.source())
    }

    fn require_end(&self) -> Result<(), ParseError> {
        if self.tokenizer.token() == Token::End {
            Ok(())
        } else {
            Err(self.syntax_error())
        }
    }

    /// Outermost expression level: binary operators, then left-to-right
    /// pipe folding (`a | f | g` applies `f` to `a`, then `g` to that).
    fn parse_expression(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_binary(0)?;
        while self.tokenizer.token() == Token::Pipe {
            self.tokenizer.step()?;
            let right = self.parse_binary(0)?;
            left = Node::Pipe {
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// The current token as a binary operator of the given level, if it is
    /// one. `in` is a keyword token but participates as an operator.
    fn level_operator(&self, level: &Level) -> Option<BinOp> {
        let label = match self.tokenizer.token() {
            Token::Operator | Token::In => self.tokenizer.label(),
            _ => return None,
        };
        if level.ops.iter().any(|op| *op == label) {
            BinOp::from_label(label)
        } else {
            None
        }
    }

    /// Precedence climbing over [`PRECEDENCE`]. Left-associative levels
    /// fold operands into a left-leaning tree; the right-associative level
    /// (`**`) recurses at its own level for the right operand.
    fn parse_binary(&mut self, index: usize) -> Result<Node, ParseError> {
        let Some(level) = PRECEDENCE.get(index) else {
            return self.parse_unary();
        };

        let mut left = self.parse_binary(index + 1)?;

        match level.assoc {
            Assoc::Left => {
                while let Some(op) = self.level_operator(level) {
                    self.tokenizer.step()?;
                    let right = self.parse_binary(index + 1)?;
                    left = Node::Binary {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    };
                }
            }
            Assoc::Right => {
                if let Some(op) = self.level_operator(level) {
                    self.tokenizer.step()?;
                    let right = self.parse_binary(index)?;
                    left = Node::Binary {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    };
                }
            }
        }

        Ok(left)
    }

    /// Unary `+ - !`; binds tighter than any binary operator and recurses,
    /// so chains like `!!x` work.
    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        if self.tokenizer.token() == Token::Operator {
            if let Some(op) = UnaryOp::from_label(self.tokenizer.label()) {
                self.tokenizer.step()?;
                let operand = self.parse_unary()?;
                return Ok(Node::Unary {
                    op,
                    operand: Box::new(operand),
                });
            }
        }
        self.parse_value()
    }

    /// Primary values: keyword literals, numbers, strings, parenthesized
    /// expressions; anything else must start a reference.
    fn parse_value(&mut self) -> Result<Node, ParseError> {
        match self.tokenizer.token() {
            Token::Undefined => {
                self.tokenizer.step()?;
                Ok(Node::Literal(Value::Undefined))
            }
            Token::True => {
                self.tokenizer.step()?;
                Ok(Node::Literal(Value::Boolean(true)))
            }
            Token::False => {
                self.tokenizer.step()?;
                Ok(Node::Literal(Value::Boolean(false)))
            }
            Token::Number => {
                let label = self.tokenizer.step()?;
                let number = label.parse::<f64>().map_err(|_| {
                    ParseError::Internal(format!("unparseable number literal '{label}'"))
                })?;
                Ok(Node::Literal(Value::Number(number)))
            }
            Token::Str => {
                let raw = self.tokenizer.step()?;
                let decoded = self.decode_string(&raw)?;
                Ok(Node::Literal(Value::String(decoded)))
            }
            Token::Left => {
                self.tokenizer.step()?;
                let node = self.parse_expression()?;
                self.tokenizer.expect(&[Token::Right])?;
                Ok(node)
            }
            _ => self.parse_reference(),
        }
    }

    /// Reference chain: a root name, then any mix of `.name` field accesses
    /// and `[expr]` subscripts (the index is a full nested expression).
    fn parse_reference(&mut self) -> Result<Node, ParseError> {
        let root = self.tokenizer.expect(&[Token::Name])?;
        let mut path = Vec::new();

        loop {
            match self.tokenizer.token() {
                Token::Dot => {
                    self.tokenizer.step()?;
                    let name = self.tokenizer.expect(&[Token::Name])?;
                    path.push(PathComponent::Field(name));
                }
                Token::LeftSquare => {
                    self.tokenizer.step()?;
                    let index = self.parse_expression()?;
                    self.tokenizer.expect(&[Token::RightSquare])?;
                    path.push(PathComponent::Subscript(Box::new(index)));
                }
                _ => break,
            }
        }

        Ok(Node::Reference { root, path })
    }

    /// Decodes a raw quoted literal: strips the delimiters and resolves the
    /// conventional escapes `\n \t \r \\ \' \"`. Anything else after a
    /// backslash is a syntax error.
    fn decode_string(&self, raw: &str) -> Result<String, ParseError> {
        let chars: Vec<char> = raw.chars().collect();
        let mut result = String::new();
        let mut i = 1;

        while i + 1 < chars.len() {
            if chars[i] == '\\' {
                i += 1;
                result.push(match chars[i] {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '\\' => '\\',
                    '\'' => '\'',
                    '"' => '"',
                    _ => return Err(self.syntax_error()),
                });
            } else {
                result.push(chars[i]);
            }
            i += 1;
        }

        Ok(result)
    }
}
