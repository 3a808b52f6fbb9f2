//! Replays the code form back into a [`Document`]
//!
//! Grammar (whitespace between tokens is insignificant):
//!
//! ```text
//! script    := statement*
//! statement := "with" call "{" statement* "}" | call ";"
//! call      := "doc" "." ("tag" | "raw" | "comment") "(" [argument ("," argument)*] ")"
//! argument  := value | identifier "=" value
//! value     := string | "None" | "escape" "(" string ")"
//! ```
//!
//! ```
//! use zmarkup::{replay, TextFormat};
//!
//! let doc = replay(r#"with doc.tag("p") { doc.raw("hi"); }"#).unwrap();
//! assert_eq!(doc.render(&TextFormat::prod()).unwrap(), "<p>hi</p>");
//! ```

pub mod config;
pub mod lexer;
pub mod parser;
pub mod token;

pub use self::config::{ReplayConfig, ReplayContext};
pub use self::parser::Replayer;

use crate::document::Document;
use crate::error::Result;
use crate::names::NameCodec;

pub fn replay(code: &str) -> Result<Document> {
    Replayer::new(code)?.replay()
}

pub fn replay_with_config(code: &str, config: ReplayConfig) -> Result<Document> {
    Replayer::with_config(code, config)?.replay()
}

/// Replays code rendered from a document built with a custom [`NameCodec`].
///
/// Keywords in the code form are safe names of that codec, so decoding them
/// with the default codec would give different literal names.
///
/// ```
/// use zmarkup::{replay_with_codec, Attributes, Document, NameCodec, TextFormat};
///
/// let mut doc = Document::with_codec(NameCodec::with_prefix("xx_"));
/// doc.add_tag("td", None, Attributes::new().set("col-span", "2")).unwrap();
/// let code = doc.render_code(&TextFormat::prod()).unwrap();
///
/// let again = replay_with_codec(&code, NameCodec::with_prefix("xx_")).unwrap();
/// assert_eq!(again.render(&TextFormat::prod()).unwrap(), "<td col-span=\"2\"/>");
/// ```
pub fn replay_with_codec(code: &str, codec: NameCodec) -> Result<Document> {
    Replayer::new(code)?.with_codec(codec).replay()
}
