use tracing::debug;

use super::config::{ReplayConfig, ReplayContext};
use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use crate::document::Document;
use crate::error::{Location, MarkupError, MarkupErrorKind, Result, SyntaxError};
use crate::escape::escape;
use crate::names::NameCodec;
use crate::tree::{AttributeSpec, Attributes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Tag,
    Raw,
    Comment,
}

/// One `doc.method(...)` call with evaluated arguments
#[derive(Debug)]
struct Call {
    method: Method,
    location: Location,
    positional: Vec<Option<String>>,
    keywords: Vec<(String, Option<String>, Location)>,
}

/// Rebuilds a [`Document`] from its code form
#[derive(Debug)]
pub struct Replayer {
    lexer: Lexer,
    current_token: Token,
    config: ReplayConfig,
    context: ReplayContext,
    codec: NameCodec,
}

impl Replayer {
    pub fn new(input: &str) -> Result<Self> {
        Self::with_config(input, ReplayConfig::default())
    }

    pub fn with_config(input: &str, config: ReplayConfig) -> Result<Self> {
        let mut context = ReplayContext::new();
        context.add_size(input.len(), &config)?;

        let mut lexer = Lexer::with_config(input, config.clone());
        let current_token = lexer.next_token()?;
        Ok(Self {
            lexer,
            current_token,
            config,
            context,
            codec: NameCodec::default(),
        })
    }

    /// Names in the code are decoded with `codec`
    pub fn with_codec(mut self, codec: NameCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn replay(mut self) -> Result<Document> {
        let mut doc = Document::with_codec(self.codec.clone());
        while self.current_token.kind != TokenKind::Eof {
            self.parse_statement(&mut doc)?;
        }
        debug!("Replayed {} node(s)", doc.tree().len());
        Ok(doc)
    }

    fn advance(&mut self) -> Result<()> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn syntax_error(&self, err: SyntaxError) -> MarkupError {
        let location = self.current_token.location;
        MarkupError::new(MarkupErrorKind::Syntax(err)).with_location(location.line, location.column)
    }

    fn expected(&self, expected: &str) -> MarkupError {
        self.syntax_error(SyntaxError::Expected {
            expected: expected.to_string(),
            found: self.current_token.kind.name(),
        })
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if &self.current_token.kind != kind {
            return Err(self.expected(&kind.name()));
        }
        self.advance()
    }

    fn parse_statement(&mut self, doc: &mut Document) -> Result<()> {
        if self.current_token.kind != TokenKind::With {
            let call = self.parse_call()?;
            self.expect(&TokenKind::Semicolon)?;
            return apply(doc, call);
        }

        let with_location = self.current_token.location;
        self.advance()?;
        let call = self.parse_call()?;
        if call.method != Method::Tag {
            return Err(MarkupError::new(MarkupErrorKind::Syntax(SyntaxError::InvalidArgument(
                "only doc.tag opens a block".to_string(),
            )))
            .with_location(call.location.line, call.location.column));
        }
        apply(doc, call)?;
        self.expect(&TokenKind::LeftBrace)?;

        self.context
            .enter_nested(&self.config)
            .map_err(|err| err.with_location(with_location.line, with_location.column))?;
        doc.enter_scope()
            .map_err(|err| err.with_location(with_location.line, with_location.column))?;

        while self.current_token.kind != TokenKind::RightBrace {
            if self.current_token.kind == TokenKind::Eof {
                return Err(self.expected("'}'"));
            }
            self.parse_statement(doc)?;
        }
        self.advance()?;

        doc.exit_scope()?;
        self.context.exit_nested();
        Ok(())
    }

    fn parse_call(&mut self) -> Result<Call> {
        let location = self.current_token.location;
        self.expect(&TokenKind::Doc)?;
        self.expect(&TokenKind::Dot)?;

        let method = match &self.current_token.kind {
            TokenKind::Identifier(name) => match name.as_str() {
                "tag" => Method::Tag,
                "raw" => Method::Raw,
                "comment" => Method::Comment,
                other => return Err(self.syntax_error(SyntaxError::UnknownMethod(other.to_string()))),
            },
            _ => return Err(self.expected("method name")),
        };
        self.advance()?;
        self.expect(&TokenKind::LeftParen)?;

        let mut call = Call {
            method,
            location,
            positional: Vec::new(),
            keywords: Vec::new(),
        };

        if self.current_token.kind != TokenKind::RightParen {
            loop {
                self.parse_argument(&mut call)?;
                if self.current_token.kind != TokenKind::Comma {
                    break;
                }
                self.advance()?;
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(call)
    }

    fn parse_argument(&mut self, call: &mut Call) -> Result<()> {
        let location = self.current_token.location;
        if let TokenKind::Identifier(name) = &self.current_token.kind {
            let name = name.clone();
            self.advance()?;
            self.expect(&TokenKind::Equals)?;
            let value = self.parse_value()?;
            if call.keywords.iter().any(|(existing, _, _)| existing == &name) {
                return Err(MarkupError::new(MarkupErrorKind::Syntax(
                    SyntaxError::DuplicateAttribute(name),
                ))
                .with_location(location.line, location.column));
            }
            call.keywords.push((name, value, location));
            return Ok(());
        }

        if !call.keywords.is_empty() {
            return Err(self.syntax_error(SyntaxError::InvalidArgument(
                "positional argument after keyword argument".to_string(),
            )));
        }
        let value = self.parse_value()?;
        call.positional.push(value);
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Option<String>> {
        match &self.current_token.kind {
            TokenKind::String(value) => {
                let value = value.clone();
                self.advance()?;
                Ok(Some(value))
            }
            TokenKind::None => {
                self.advance()?;
                Ok(None)
            }
            TokenKind::Escape => {
                self.advance()?;
                self.expect(&TokenKind::LeftParen)?;
                let TokenKind::String(value) = &self.current_token.kind else {
                    return Err(self.expected("string"));
                };
                let escaped = escape(value).into_owned();
                self.advance()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Some(escaped))
            }
            _ => Err(self.expected("value")),
        }
    }
}

fn invalid_argument(location: Location, message: String) -> MarkupError {
    MarkupError::new(MarkupErrorKind::Syntax(SyntaxError::InvalidArgument(message)))
        .with_location(location.line, location.column)
}

/// Positional string argument that may not be `None`
fn required_text(call: &Call, index: usize, what: &str) -> Result<String> {
    match call.positional.get(index) {
        Some(Some(text)) => Ok(text.clone()),
        Some(None) => Err(invalid_argument(call.location, format!("{} cannot be None", what))),
        None => Err(invalid_argument(call.location, format!("missing {}", what))),
    }
}

fn apply(doc: &mut Document, call: Call) -> Result<()> {
    let at = |err: MarkupError| err.with_location(call.location.line, call.location.column);

    match call.method {
        Method::Tag => {
            if call.positional.len() > 2 {
                return Err(invalid_argument(call.location, "doc.tag takes at most a name and a text".to_string()));
            }
            let name = required_text(&call, 0, "tag name")?;
            let text = call.positional.get(1).cloned().flatten();

            let mut attributes = Attributes::new();
            for (name, value, _) in &call.keywords {
                attributes.insert(AttributeSpec {
                    name: name.clone(),
                    value: value.clone(),
                    escape: false,
                });
            }
            doc.add_tag(&name, text.as_deref(), attributes).map_err(at)?;
        }
        Method::Raw => {
            if call.positional.len() != 1 {
                return Err(invalid_argument(call.location, "doc.raw takes one text".to_string()));
            }
            let text = required_text(&call, 0, "raw text")?;
            let mut prefix = None;
            let mut suffix = None;
            for (name, value, location) in &call.keywords {
                match name.as_str() {
                    "prefix" => prefix = value.clone(),
                    "suffix" => suffix = value.clone(),
                    other => {
                        return Err(invalid_argument(*location, format!("doc.raw has no argument '{}'", other)))
                    }
                }
            }
            if prefix.is_none() && suffix.is_none() {
                doc.add_raw(&text).map_err(at)?;
            } else {
                doc.add_raw_wrapped(&text, prefix.as_deref(), suffix.as_deref())
                    .map_err(at)?;
            }
        }
        Method::Comment => {
            if call.positional.len() != 1 || !call.keywords.is_empty() {
                return Err(invalid_argument(call.location, "doc.comment takes one text".to_string()));
            }
            let text = required_text(&call, 0, "comment text")?;
            doc.add_comment(&text).map_err(at)?;
        }
    }
    Ok(())
}
