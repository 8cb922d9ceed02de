//! Expression tokenizer.
//!
//! The [`Lexer`] turns an expression string into a flat list of [`Token`]s:
//!
//! - Column names in double quotes (`"Sales"`), taken verbatim without escapes
//! - Function keywords from the registry (case-sensitive, longest match)
//! - The aliasing keyword `AS` (case-insensitive)
//! - The operators `+ - * / % ^`, parentheses and comma
//!
//! Whitespace is skipped. The first unrecognized input aborts tokenizing.

use super::error::LexError;
use super::function::{ComputedFunction, Operator};
use super::token::{Span, Token, TokenKind};

/// Tokenize a whole expression.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(expression).tokenize()
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Consume the input, returning every token or the first error.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let start = self.pos;
        let Some(ch) = self.peek() else {
            return Ok(None);
        };

        if ch == '"' {
            return self.scan_column_name().map(Some);
        }

        if is_word_start(ch) {
            return self.scan_word().map(Some);
        }

        let kind = match ch {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            _ => match Operator::from_char(ch) {
                Some(operator) => TokenKind::Operator(operator),
                None => {
                    return Err(LexError::UnexpectedCharacter {
                        position: start,
                        character: ch,
                    })
                }
            },
        };

        self.bump();
        Ok(Some(Token::new(
            kind,
            &self.input[start..self.pos],
            Span::new(start, self.pos),
        )))
    }

    fn scan_column_name(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        self.bump(); // opening quote

        let name_start = self.pos;
        loop {
            match self.bump() {
                Some('"') => break,
                Some(_) => {}
                None => return Err(LexError::UnterminatedColumnName { position: start }),
            }
        }

        // Exclude the closing quote
        let name = &self.input[name_start..self.pos - 1];
        if name.is_empty() {
            return Err(LexError::EmptyColumnName { position: start });
        }

        Ok(Token::new(
            TokenKind::ColumnRef,
            name,
            Span::new(start, self.pos),
        ))
    }

    fn scan_word(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        while self.peek().is_some_and(is_word_continue) {
            self.bump();
        }

        let word = &self.input[start..self.pos];
        let span = Span::new(start, self.pos);

        if word.eq_ignore_ascii_case("as") {
            return Ok(Token::new(TokenKind::As, word, span));
        }

        match ComputedFunction::from_name(word) {
            Some(function) => Ok(Token::new(TokenKind::Function(function), word, span)),
            None => Err(LexError::UnknownFunction {
                position: start,
                name: word.to_string(),
            }),
        }
    }
}

fn is_word_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_word_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
