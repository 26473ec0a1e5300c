//! Operation-language parser: token stream → one [`Call`].
//!
//! Grammar:
//!
//! ```text
//! Call        := Ident "(" Path ("," Argument)* ")"
//! Path        := ["."]? PathElement ("." PathElement | "[" Int "]")*
//! PathElement := (Ident | Str) ("[" Int "]")*
//! Argument    := Float | Int | "true" | "false" | "null" | Str | Ident | Json
//! ```
//!
//! Single deterministic pass. The only ordered choice is in argument
//! position, where `true`/`false`/`null` are recognized before a bare
//! identifier falls back to a plain string, and where a leading `[` or `{`
//! switches the lexer into JSON scanning.

use serde_json::Value;
use thiserror::Error;
use valmod_traverse::{Path, PathStep};

use crate::lexer::{LexError, Lexer, Token};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("expected {expected} but found `{found}` at offset {offset}")]
    Unexpected {
        expected: &'static str,
        found: String,
        offset: usize,
    },
    #[error("trailing input `{found}` at offset {offset}")]
    Trailing { found: String, offset: usize },
}

/// A parsed operation request. Immutable once built; the name is
/// lower-cased (operation names are case-insensitive).
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub path: Path,
    pub args: Vec<Value>,
}

/// Parse one operation string.
pub fn parse(input: &str) -> Result<Call, ParseError> {
    Parser {
        lexer: Lexer::new(input),
    }
    .parse_call()
}

struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    fn parse_call(&mut self) -> Result<Call, ParseError> {
        let name = match self.lexer.next_token()? {
            (Token::Ident(name), _) => name.to_ascii_lowercase(),
            (tok, offset) => return Err(unexpected("operation name", &tok, offset)),
        };
        self.expect_punct('(')?;

        let mut steps = Vec::new();
        let mut tok = self.lexer.next_token()?;
        // A leading dot on the first element is tolerated: `set(.field, 1)`.
        if tok.0 == Token::Punct('.') {
            tok = self.lexer.next_token()?;
        }
        loop {
            match tok {
                (Token::Ident(name), _) => steps.push(PathStep::Field(name)),
                (Token::Str(name), _) => steps.push(PathStep::Field(name)),
                (Token::Punct('['), _) => {
                    steps.push(self.parse_index()?);
                }
                (other, offset) => return Err(unexpected("path element", &other, offset)),
            }
            tok = self.lexer.next_token()?;
            match tok {
                (Token::Punct('.'), _) => tok = self.lexer.next_token()?,
                // `a[0]`: an index follows its element with no dot; the
                // loop head consumes the bracket.
                (Token::Punct('['), _) => {}
                _ => break,
            }
        }

        let mut args = Vec::new();
        loop {
            match tok {
                (Token::Punct(')'), _) => break,
                (Token::Punct(','), _) => {
                    args.push(self.parse_argument()?);
                    tok = self.lexer.next_token()?;
                }
                (other, offset) => return Err(unexpected("`,` or `)`", &other, offset)),
            }
        }

        match self.lexer.next_token()? {
            (Token::Eof, _) => {}
            (other, offset) => {
                return Err(ParseError::Trailing {
                    found: other.describe(),
                    offset,
                })
            }
        }

        Ok(Call {
            name,
            path: Path::new(steps),
            args,
        })
    }

    /// The bracket is already consumed; reads `Int "]"`.
    fn parse_index(&mut self) -> Result<PathStep, ParseError> {
        let idx = match self.lexer.next_token()? {
            (Token::Int(idx), offset) => usize::try_from(idx)
                .map_err(|_| unexpected("non-negative array index", &Token::Int(idx), offset))?,
            (other, offset) => return Err(unexpected("array index", &other, offset)),
        };
        self.expect_punct(']')?;
        Ok(PathStep::Index(idx))
    }

    fn parse_argument(&mut self) -> Result<Value, ParseError> {
        // `[` and `{` open an embedded JSON literal here, unlike in path
        // position.
        let (tok, offset) = if matches!(self.lexer.peek_nonspace(), Some('[') | Some('{')) {
            self.lexer.scan_json()?
        } else {
            self.lexer.next_token()?
        };
        match tok {
            Token::Int(n) => Ok(Value::from(n)),
            Token::Float(n) => Ok(Value::from(n)),
            Token::Str(text) => Ok(Value::String(text)),
            Token::Json(value) => Ok(value),
            Token::Ident(word) => Ok(match word.as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                "null" => Value::Null,
                // any other bare word is a string, verbatim
                _ => Value::String(word),
            }),
            other => Err(unexpected("argument", &other, offset)),
        }
    }

    fn expect_punct(&mut self, expected: char) -> Result<(), ParseError> {
        match self.lexer.next_token()? {
            (Token::Punct(ch), _) if ch == expected => Ok(()),
            (other, offset) => Err(ParseError::Unexpected {
                expected: match expected {
                    '(' => "`(`",
                    ')' => "`)`",
                    ']' => "`]`",
                    _ => "punctuation",
                },
                found: other.describe(),
                offset,
            }),
        }
    }
}

fn unexpected(expected: &'static str, found: &Token, offset: usize) -> ParseError {
    ParseError::Unexpected {
        expected,
        found: found.describe(),
        offset,
    }
}
