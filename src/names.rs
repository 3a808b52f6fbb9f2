//! Safe-name codec
//!
//! Collaborators pass element and attribute names as identifiers. Names that
//! clash with the code form's vocabulary or contain `-` travel in a "safe"
//! form: the safe prefix followed by the name with `-` replaced by `_`.
//!
//! ```
//! use zmarkup::names::NameCodec;
//!
//! let codec = NameCodec::default();
//! assert_eq!(codec.to_safe_name("http-equiv").unwrap(), "_http_equiv");
//! assert_eq!(codec.from_safe_name("_http_equiv"), "http-equiv");
//! assert_eq!(codec.to_safe_name("id").unwrap(), "_id");
//! ```

use crate::error::{NameError, Result};

/// Prefix marking a mangled name
pub const DEFAULT_SAFE_PREFIX: &str = "_";

/// Names that are always mangled, because they are keywords of the code
/// form or commonly shadowed identifiers
pub const RESERVED_NAMES: [&str; 10] = [
    "None", "as", "async", "doc", "escape", "for", "id", "loop", "type", "with",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCodec {
    prefix: String,
    reserved: Vec<String>,
}

impl Default for NameCodec {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_SAFE_PREFIX)
    }
}

impl NameCodec {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            reserved: RESERVED_NAMES.iter().map(ToString::to_string).collect(),
        }
    }

    /// Adds names that must always travel in safe form
    pub fn with_reserved<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.iter().any(|reserved| reserved == name)
    }

    /// Encodes a literal name, rejecting names that could not be decoded back
    pub fn to_safe_name(&self, name: &str) -> Result<String> {
        if name.is_empty() || name.starts_with(&self.prefix) {
            return Err(NameError::BadAttributeName(name.to_string()).into());
        }

        if !self.is_reserved(name) && !name.contains('-') {
            return Ok(name.to_string());
        }

        if name.contains('_') {
            return Err(NameError::BadAttributeName(name.to_string()).into());
        }

        Ok(format!("{}{}", self.prefix, name.replace('-', "_")))
    }

    /// Decodes a safe name; names without the prefix pass through unchanged
    pub fn from_safe_name(&self, name: &str) -> String {
        match name.strip_prefix(&self.prefix) {
            Some(rest) => rest.replace('_', "-"),
            None => name.to_string(),
        }
    }

    /// Resolves an element name given in either form to `(literal, safe)`
    pub fn element_names(&self, given: &str) -> Result<(String, String)> {
        let literal = self.from_safe_name(given);
        let safe = self.to_safe_name(&literal)?;
        Ok((literal, safe))
    }

    /// Resolves an attribute name given in either form to `(literal, safe)`.
    /// The safe form must also be a plain identifier.
    pub fn attribute_names(&self, given: &str) -> Result<(String, String)> {
        let (literal, safe) = self.element_names(given)?;
        if !is_identifier(&safe) {
            return Err(NameError::BadAttributeName(given.to_string()).into());
        }
        Ok((literal, safe))
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
