use super::prelude::{tokenize, LexicalErrorType, Token};

fn tokens(input: &str) -> Vec<Token> {
    tokenize(input)
        .expect("input should lex")
        .into_iter()
        .map(|(_, token, _)| token)
        .collect()
}

#[test]
fn lexes_binary_expression() {
    assert_eq!(
        tokens("12+34"),
        vec![
            Token::Number(12.0),
            Token::Plus,
            Token::Number(34.0),
            Token::Eof,
        ]
    );
}

#[test]
fn lexes_keywords_and_identifiers() {
    assert_eq!(
        tokens("let const fn letx fnord"),
        vec![
            Token::Let,
            Token::Const,
            Token::Fn,
            Token::Ident("letx".to_string()),
            Token::Ident("fnord".to_string()),
            Token::Eof,
        ]
    );
}

#[test]
fn lexes_punctuation() {
    assert_eq!(
        tokens("(){}[];:,.=+-*/%"),
        vec![
            Token::LParen,
            Token::RParen,
            Token::LBrace,
            Token::RBrace,
            Token::LBracket,
            Token::RBracket,
            Token::Semicolon,
            Token::Colon,
            Token::Comma,
            Token::Dot,
            Token::Assign,
            Token::Plus,
            Token::Minus,
            Token::Asterisk,
            Token::Slash,
            Token::Percent,
            Token::Eof,
        ]
    );
}

#[test]
fn discards_whitespace() {
    assert_eq!(
        tokens(" \t\r\n let \n x \t = 1 ; "),
        vec![
            Token::Let,
            Token::Ident("x".to_string()),
            Token::Assign,
            Token::Number(1.0),
            Token::Semicolon,
            Token::Eof,
        ]
    );
}

#[test]
fn empty_source_is_only_eof() {
    assert_eq!(tokens(""), vec![Token::Eof]);
}

#[test]
fn digit_runs_are_maximal() {
    assert_eq!(
        tokens("100 2"),
        vec![Token::Number(100.0), Token::Number(2.0), Token::Eof]
    );
}

#[test]
fn identifiers_stop_at_digits() {
    // Identifiers are letter runs only, so `abc1` is two tokens.
    assert_eq!(
        tokens("abc1"),
        vec![
            Token::Ident("abc".to_string()),
            Token::Number(1.0),
            Token::Eof,
        ]
    );
}

#[test]
fn unrecognized_character_aborts() {
    let error = tokenize("let x = 1 @").expect_err("`@` should not lex");

    assert_eq!(error.error, LexicalErrorType::UnrecognizedCharacter { ch: '@' });
    assert_eq!(error.location.start, 10);
}

#[test]
fn tokens_carry_byte_spans() {
    let spanned = tokenize("ab + 1").expect("input should lex");

    assert_eq!(
        spanned,
        vec![
            (0, Token::Ident("ab".to_string()), 2),
            (3, Token::Plus, 4),
            (5, Token::Number(1.0), 6),
            (6, Token::Eof, 7),
        ]
    );
}
