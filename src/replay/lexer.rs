//! Lexical analyzer for the code form
//!
//! Whitespace between tokens is insignificant, so code rendered without
//! newlines lexes the same as indented code. `#` starts a comment running to
//! the end of the line.

use super::config::ReplayConfig;
use super::token::{Token, TokenKind};
use crate::error::{LexicalError, Location, MarkupErrorKind, Result};

#[derive(Debug)]
pub struct Lexer {
    /// Input text as a character array
    input: Vec<char>,
    /// Current position in the input
    position: usize,
    /// Current character being processed
    current_char: Option<char>,
    config: ReplayConfig,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self::with_config(input, ReplayConfig::default())
    }

    pub fn with_config(input: &str, config: ReplayConfig) -> Self {
        let input: Vec<char> = input.chars().collect();
        let current_char = input.first().copied();
        Self {
            input,
            position: 0,
            current_char,
            config,
            line: 1,
            column: 1,
        }
    }

    fn advance(&mut self) {
        if let Some(c) = self.current_char {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    pub fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.current_char {
            self.advance();
            if c == '\n' {
                break;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char {
            if c == '#' {
                self.skip_comment();
            } else if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn error(&self, err: LexicalError, context: &str) -> crate::error::MarkupError {
        self.location()
            .create_error(MarkupErrorKind::Lexical(err), context)
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        let location = self.location();

        let Some(c) = self.current_char else {
            return Ok(Token::new(TokenKind::Eof, location));
        };

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '=' => TokenKind::Equals,
            ';' => TokenKind::Semicolon,
            '"' => {
                let value = self.read_string()?;
                return Ok(Token::new(TokenKind::String(value), location));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let word = self.read_word();
                return Ok(Token::new(TokenKind::from_word(word), location));
            }
            c => return Err(self.error(LexicalError::UnexpectedCharacter(c), "expected a token")),
        };
        self.advance();
        Ok(Token::new(kind, location))
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.current_char {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            word.push(c);
            self.advance();
        }
        word
    }

    fn read_string(&mut self) -> Result<String> {
        let start = self.location();
        let mut result = String::new();
        // Skip the opening quote
        self.advance();

        loop {
            match self.current_char {
                None => {
                    return Err(start.create_error(
                        MarkupErrorKind::Lexical(LexicalError::UnterminatedString),
                        "string literal opened here",
                    ))
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    let escaped = self.read_escape()?;
                    result.push(escaped);
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }

            if let Err(err) = self.config.validate_string(&result) {
                return Err(err.with_location(start.line, start.column));
            }
        }

        Ok(result)
    }

    fn read_escape(&mut self) -> Result<char> {
        let Some(c) = self.current_char else {
            return Err(self.error(LexicalError::UnexpectedEOF, "escape sequence"));
        };

        let escaped = match c {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            '0' => '\0',
            '\\' => '\\',
            '"' => '"',
            'u' => {
                self.advance();
                return self.read_unicode_escape();
            }
            other => return Err(self.error(LexicalError::InvalidEscape(other), "string literal")),
        };
        self.advance();
        Ok(escaped)
    }

    /// `\u{XXXX}`, after the `u`
    fn read_unicode_escape(&mut self) -> Result<char> {
        if self.current_char != Some('{') {
            return Err(self.error(LexicalError::InvalidUnicode, "expected '{' after \\u"));
        }
        self.advance();

        let mut hex = String::new();
        while let Some(c) = self.current_char {
            if c == '}' {
                break;
            }
            if !c.is_ascii_hexdigit() || hex.len() >= 6 {
                return Err(self.error(LexicalError::InvalidUnicode, "unicode escape"));
            }
            hex.push(c);
            self.advance();
        }
        if self.current_char != Some('}') {
            return Err(self.error(LexicalError::UnexpectedEOF, "unicode escape"));
        }
        self.advance();

        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error(LexicalError::InvalidUnicode, "unicode escape"))
    }
}
