//! Operation-language lexer.
//!
//! Produces a finite token sequence terminated by [`Token::Eof`]. Strings
//! may be quoted with double quotes, single quotes, or backticks, and a
//! backslash escapes the next character. Embedded JSON literals are
//! scanned on demand by the parser via [`Lexer::scan_json`], because `[`
//! is punctuation in path position but opens a JSON array in argument
//! position.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexError {
    #[error("unexpected character `{ch}` at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    #[error("string literal starting at offset {offset} is not terminated")]
    UnterminatedString { offset: usize },
    #[error("JSON literal starting at offset {offset} is not terminated")]
    UnterminatedJson { offset: usize },
    #[error("invalid number `{text}` at offset {offset}")]
    InvalidNumber { text: String, offset: usize },
}

/// One lexeme. Quoted strings arrive with quotes stripped and escapes
/// resolved; JSON literals arrive fully decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    Json(Value),
    Punct(char),
    Eof,
}

impl Token {
    /// Short rendering of the token for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Token::Ident(name) => name.clone(),
            Token::Int(n) => n.to_string(),
            Token::Float(n) => n.to_string(),
            Token::Str(text) => format!("\"{text}\""),
            Token::Json(value) => value.to_string(),
            Token::Punct(ch) => ch.to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer { input, pos: 0 }
    }

    /// The next token together with its starting byte offset.
    pub fn next_token(&mut self) -> Result<(Token, usize), LexError> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(ch) = self.peek() else {
            return Ok((Token::Eof, start));
        };
        match ch {
            '(' | ')' | ',' | '.' | '[' | ']' => {
                self.advance();
                Ok((Token::Punct(ch), start))
            }
            '"' | '\'' | '`' => Ok((self.scan_string(ch)?, start)),
            '-' => Ok((self.scan_number()?, start)),
            c if c.is_ascii_digit() => Ok((self.scan_number()?, start)),
            c if c.is_ascii_alphabetic() || c == '_' => Ok((self.scan_ident(), start)),
            other => Err(LexError::UnexpectedChar {
                ch: other,
                offset: start,
            }),
        }
    }

    /// Scan an embedded JSON literal starting at the next non-space char,
    /// which must be `[` or `{`. The candidate grows one character at a
    /// time with a full decode attempted after each, so the smallest valid
    /// JSON prefix wins the boundary.
    pub fn scan_json(&mut self) -> Result<(Token, usize), LexError> {
        self.skip_whitespace();
        let start = self.pos;
        match self.peek() {
            Some('[') | Some('{') => {}
            Some(other) => {
                return Err(LexError::UnexpectedChar {
                    ch: other,
                    offset: start,
                })
            }
            None => return Err(LexError::UnterminatedJson { offset: start }),
        }
        let mut end = start;
        loop {
            match self.input[end..].chars().next() {
                Some(ch) => end += ch.len_utf8(),
                None => return Err(LexError::UnterminatedJson { offset: start }),
            }
            if let Ok(value) = serde_json::from_str::<Value>(&self.input[start..end]) {
                self.pos = end;
                return Ok((Token::Json(value), start));
            }
        }
    }

    /// The next non-whitespace character, without consuming anything. Lets
    /// the parser pick between token and JSON scanning in argument
    /// position.
    pub fn peek_nonspace(&self) -> Option<char> {
        self.input[self.pos..].chars().find(|c| !c.is_whitespace())
    }

    fn scan_ident(&mut self) -> Token {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        Token::Ident(self.input[start..self.pos].to_string())
    }

    fn scan_number(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        if !matches!(self.peek(), Some('0'..='9')) {
            return Err(LexError::UnexpectedChar {
                ch: '-',
                offset: start,
            });
        }
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }
        // A fractional marker makes it a float; a bare trailing dot is left
        // for the path grammar.
        let mut is_float = false;
        if self.peek() == Some('.') && matches!(self.peek_second(), Some('0'..='9')) {
            is_float = true;
            self.advance();
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }
        let text = &self.input[start..self.pos];
        if is_float {
            text.parse::<f64>()
                .map(Token::Float)
                .map_err(|_| LexError::InvalidNumber {
                    text: text.to_string(),
                    offset: start,
                })
        } else {
            text.parse::<i64>()
                .map(Token::Int)
                .map_err(|_| LexError::InvalidNumber {
                    text: text.to_string(),
                    offset: start,
                })
        }
    }

    fn scan_string(&mut self, quote: char) -> Result<Token, LexError> {
        let start = self.pos;
        self.advance();
        let mut text = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => return Err(LexError::UnterminatedString { offset: start }),
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some(escaped) => {
                            text.push(escaped);
                            self.advance();
                        }
                        None => return Err(LexError::UnterminatedString { offset: start }),
                    }
                }
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(Token::Str(text));
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.pos..].chars().nth(1)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }
}
