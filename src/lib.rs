//! zmarkup: a markup tree builder with three renderings
//!
//! This crate provides functionality to:
//! - Build element trees through a scoped cursor API
//! - Render them as indented (dev) or compact (prod) markup
//! - Render them as construction code and replay that code into a tree
//! - Graft whole documents into one another
//!
//! # Examples
//! ```
//! use zmarkup::{Attributes, Document, Result, TextFormat};
//!
//! fn example() -> Result<()> {
//!     let mut doc = Document::with_doctype()?;
//!     doc.add_tag("html", None, Attributes::new())?.scope(|doc| {
//!         doc.add_tag("body", Some("Hello"), Attributes::new())?;
//!         Ok(())
//!     })?;
//!     println!("{}", doc.render(&TextFormat::dev())?);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

use std::path::Path;
use tracing::{debug, info, instrument};

pub mod demo;
pub mod document;
pub mod enums;
pub mod error;
pub mod escape;
pub mod format;
pub mod intern;
pub mod names;
pub mod render;
pub mod replay;
pub mod test_utils;
pub mod tree;
pub mod utils;

// Re-exports
pub use document::{Document, Scope, TagHandle};
pub use enums::{Encoding, OutputForm, Profile};
pub use error::{MarkupError, MarkupErrorKind, Result};
pub use format::TextFormat;
pub use names::NameCodec;
pub use replay::{replay, replay_with_codec, replay_with_config, ReplayConfig};
pub use tree::Attributes;

/// Reads a file holding the code form and replays it
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn replay_file(path: impl AsRef<Path>) -> Result<Document> {
    let content = utils::read_file(path.as_ref())?;
    info!("File read successfully, replaying {} bytes", content.len());

    let doc = replay(&content)?;
    debug!("Replay completed with {} nodes", doc.tree().len());
    Ok(doc)
}
