use crate::utils::prelude::SrcSpan;
use super::error::{LexicalError, LexicalErrorType};
use super::token::{str_to_keyword, Token};

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
    position: u32,
    next_position: u32,
    ch: Option<char>,
    next_ch: Option<char>,
    input: T,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
    pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
            next_ch: None,
            input,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> LexResult {
        let span = match self.ch {
            Some(ch) => match ch {
                '(' => self.eat_one_char(Token::LParen),
                ')' => self.eat_one_char(Token::RParen),
                '{' => self.eat_one_char(Token::LBrace),
                '}' => self.eat_one_char(Token::RBrace),
                '[' => self.eat_one_char(Token::LBracket),
                ']' => self.eat_one_char(Token::RBracket),
                '+' => self.eat_one_char(Token::Plus),
                '-' => self.eat_one_char(Token::Minus),
                '*' => self.eat_one_char(Token::Asterisk),
                '/' => self.eat_one_char(Token::Slash),
                '%' => self.eat_one_char(Token::Percent),
                '=' => self.eat_one_char(Token::Assign),
                ';' => self.eat_one_char(Token::Semicolon),
                ':' => self.eat_one_char(Token::Colon),
                ',' => self.eat_one_char(Token::Comma),
                '.' => self.eat_one_char(Token::Dot),
                'a'..='z' | 'A'..='Z' => {
                    return Ok(self.lex_ident());
                },
                '0'..='9' => {
                    return self.lex_number();
                },
                ' ' | '\t' | '\n' | '\r' => {
                    self.next_char();

                    return self.next_token();
                },
                c => {
                    let location = self.position;
                    return Err(LexicalError {
                        error: LexicalErrorType::UnrecognizedCharacter { ch: c },
                        location: SrcSpan {
                            start: location,
                            end: location + 1,
                        },
                    });
                }
            },
            None => {
                self.eat_one_char(Token::Eof)
            }
        };

        Ok(span)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.ch;

        let next = match self.input.next() {
            Some((pos, ch)) => {
                self.position = self.next_position;
                self.next_position = pos;

                Some(ch)
            },
            None => {
                self.position = self.next_position;
                self.next_position += 1;

                None
            }
        };

        self.ch = self.next_ch;
        self.next_ch = next;

        ch
    }

    fn eat_one_char(&mut self, token: Token) -> Spanned {
        let start_pos = self.position;
        self.next_char();
        let end_pos = self.position;

        (start_pos, token, end_pos)
    }

    fn lex_ident(&mut self) -> Spanned {
        let start_pos = self.position;
        let mut ident = String::new();

        while let Some(ch) = self.ch {
            if !ch.is_ascii_alphabetic() {
                break;
            }

            ident.push(ch);
            self.next_char();
        }

        let end_pos = self.position;

        let token = match str_to_keyword(&ident) {
            Some(token) => token,
            None => Token::Ident(ident)
        };

        (start_pos, token, end_pos)
    }

    fn lex_number(&mut self) -> LexResult {
        let start_pos = self.position;
        let mut digits = String::new();

        while let Some(ch) = self.ch {
            if !ch.is_ascii_digit() {
                break;
            }

            digits.push(ch);
            self.next_char();
        }

        let end_pos = self.position;

        match digits.parse::<f64>() {
            Ok(value) => Ok((start_pos, Token::Number(value), end_pos)),
            Err(_) => Err(LexicalError {
                error: LexicalErrorType::InvalidNumber,
                location: SrcSpan { start: start_pos, end: end_pos }
            })
        }
    }
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
    type Item = LexResult;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();

        Some(token)
    }
}

// Eagerly lexes a whole source string. The stream ends with exactly one
// `Eof` token; the first malformed character aborts with no partial list.
pub fn tokenize(src: &str) -> Result<Vec<Spanned>, LexicalError> {
    let mut lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
    let mut tokens = vec![];

    loop {
        let spanned = lexer.next_token()?;
        let done = spanned.1 == Token::Eof;

        tokens.push(spanned);

        if done {
            return Ok(tokens);
        }
    }
}
