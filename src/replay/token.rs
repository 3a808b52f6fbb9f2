//! Token types of the code form

use crate::error::Location;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Structural
    LeftParen,  // (
    RightParen, // )
    LeftBrace,  // {
    RightBrace, // }
    Comma,      // ,
    Dot,        // .
    Equals,     // =
    Semicolon,  // ;

    // Keywords
    With,
    Doc,
    Escape,
    None,

    // Values
    Identifier(String),
    String(String),

    Eof,
}

impl TokenKind {
    /// Token name for error messages
    pub fn name(&self) -> String {
        match self {
            Self::LeftParen => "'('".to_string(),
            Self::RightParen => "')'".to_string(),
            Self::LeftBrace => "'{'".to_string(),
            Self::RightBrace => "'}'".to_string(),
            Self::Comma => "','".to_string(),
            Self::Dot => "'.'".to_string(),
            Self::Equals => "'='".to_string(),
            Self::Semicolon => "';'".to_string(),
            Self::With => "'with'".to_string(),
            Self::Doc => "'doc'".to_string(),
            Self::Escape => "'escape'".to_string(),
            Self::None => "'None'".to_string(),
            Self::Identifier(name) => format!("identifier '{}'", name),
            Self::String(_) => "string".to_string(),
            Self::Eof => "end of input".to_string(),
        }
    }

    /// Keyword for a reserved word, identifier otherwise
    pub fn from_word(word: String) -> Self {
        match word.as_str() {
            "with" => Self::With,
            "doc" => Self::Doc,
            "escape" => Self::Escape,
            "None" => Self::None,
            _ => Self::Identifier(word),
        }
    }
}

/// Token with the position of its first character
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, location: Location) -> Self {
        Self { kind, location }
    }
}
