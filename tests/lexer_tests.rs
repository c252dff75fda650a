// tests/lexer_tests.rs

use sprig_lang::ast::Token;
use sprig_lang::error::ParseError;
use sprig_lang::lexer::Tokenizer;

fn all_tokens(input: &str) -> Vec<(Token, String)> {
    let mut tokenizer = Tokenizer::new(input);
    let mut tokens = Vec::new();
    loop {
        tokenizer.next().unwrap();
        if tokenizer.token() == Token::End {
            break;
        }
        tokens.push((tokenizer.token(), tokenizer.label().to_string()));
    }
    tokens
}

// ============================================================================
// Basic token stream
// ============================================================================

#[test]
fn test_starts_in_begin_state() {
    let tokenizer = Tokenizer::new("1 + 2");
    assert_eq!(tokenizer.token(), Token::Begin);
    assert_eq!(tokenizer.label(), "");
}

#[test]
fn test_end_is_terminal() {
    let mut tokenizer = Tokenizer::new("  ");
    tokenizer.next().unwrap();
    assert_eq!(tokenizer.token(), Token::End);
    assert_eq!(tokenizer.label(), "");
    tokenizer.next().unwrap();
    assert_eq!(tokenizer.token(), Token::End);
}

#[test]
fn test_arithmetic_stream() {
    let tokens = all_tokens("a + 12 * (b.c)");
    let kinds: Vec<Token> = tokens.iter().map(|(t, _)| *t).collect();
    assert_eq!(
        kinds,
        vec![
            Token::Name,
            Token::Operator,
            Token::Number,
            Token::Operator,
            Token::Left,
            Token::Name,
            Token::Dot,
            Token::Name,
            Token::Right,
        ]
    );
    assert_eq!(tokens[2].1, "12");
}

#[test]
fn test_keywords_not_captured_as_names() {
    let tokens = all_tokens("undefined true false in indeed");
    let kinds: Vec<Token> = tokens.iter().map(|(t, _)| *t).collect();
    assert_eq!(
        kinds,
        vec![
            Token::Undefined,
            Token::True,
            Token::False,
            Token::In,
            Token::Name,
        ]
    );
    // `indeed` starts with `in` but is still a single name.
    assert_eq!(tokens[4].1, "indeed");
}

#[test]
fn test_underscore_identifiers() {
    let tokens = all_tokens("_private item_2");
    assert_eq!(tokens[0], (Token::Name, "_private".to_string()));
    assert_eq!(tokens[1], (Token::Name, "item_2".to_string()));
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_longest_operator_tier_wins() {
    let tokens = all_tokens(">>> >> > === ==");
    assert_eq!(
        tokens.iter().map(|(_, l)| l.as_str()).collect::<Vec<_>>(),
        vec![">>>", ">>", ">", "===", "=="]
    );
}

#[test]
fn test_bare_equals_is_syntax_error() {
    let mut tokenizer = Tokenizer::new("a = b");
    tokenizer.next().unwrap();
    let err = tokenizer.next().unwrap_err();
    assert!(matches!(err, ParseError::Syntax { input } if input == "a = b"));
}

#[test]
fn test_logical_or_beats_pipe() {
    let tokens = all_tokens("a || b | c");
    assert_eq!(tokens[1], (Token::Operator, "||".to_string()));
    assert_eq!(tokens[3], (Token::Pipe, "|".to_string()));
}

#[test]
fn test_nullish_and_power() {
    let tokens = all_tokens("a ?? b ** c");
    assert_eq!(tokens[1], (Token::Operator, "??".to_string()));
    assert_eq!(tokens[3], (Token::Operator, "**".to_string()));
}

#[test]
fn test_adjacent_operators_split_greedily() {
    // `!==` must not be read as `!` `==`.
    let tokens = all_tokens("a !== !b");
    assert_eq!(tokens[1], (Token::Operator, "!==".to_string()));
    assert_eq!(tokens[2], (Token::Operator, "!".to_string()));
}

// ============================================================================
// String literals
// ============================================================================

#[test]
fn test_string_label_is_raw() {
    let tokens = all_tokens(r#" "hi there" "#);
    assert_eq!(tokens[0], (Token::Str, r#""hi there""#.to_string()));
}

#[test]
fn test_single_quoted_string() {
    let tokens = all_tokens("'abc'");
    assert_eq!(tokens[0], (Token::Str, "'abc'".to_string()));
}

#[test]
fn test_escaped_quote_does_not_end_literal() {
    let tokens = all_tokens(r#""a\"b""#);
    assert_eq!(tokens[0], (Token::Str, r#""a\"b""#.to_string()));
}

#[test]
fn test_escaped_quote_at_end_of_content() {
    // The escape is the last content before the closing quote.
    let tokens = all_tokens(r#""x\"""#);
    assert_eq!(tokens[0], (Token::Str, r#""x\"""#.to_string()));
}

#[test]
fn test_unterminated_string_fails() {
    let mut tokenizer = Tokenizer::new("\"oops");
    assert!(tokenizer.next().is_err());
}

#[test]
fn test_trailing_backslash_fails() {
    let mut tokenizer = Tokenizer::new("\"oops\\");
    assert!(tokenizer.next().is_err());
}

// ============================================================================
// step and expect
// ============================================================================

#[test]
fn test_step_returns_previous_label() {
    let mut tokenizer = Tokenizer::new("abc def");
    tokenizer.next().unwrap();
    let label = tokenizer.step().unwrap();
    assert_eq!(label, "abc");
    assert_eq!(tokenizer.label(), "def");
}

#[test]
fn test_expect_accepts_listed_kinds() {
    let mut tokenizer = Tokenizer::new("abc.def");
    tokenizer.next().unwrap();
    assert_eq!(tokenizer.expect(&[Token::Name]).unwrap(), "abc");
    assert_eq!(tokenizer.expect(&[Token::Dot]).unwrap(), ".");
    assert_eq!(tokenizer.expect(&[Token::Name, Token::Number]).unwrap(), "def");
}

#[test]
fn test_expect_rejects_other_kinds() {
    let mut tokenizer = Tokenizer::new("abc");
    tokenizer.next().unwrap();
    assert!(tokenizer.expect(&[Token::Number]).is_err());
}
