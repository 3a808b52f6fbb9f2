use std::fmt;

use crate::error::{MarkupError, Result, SecurityError};

/// Maximum nesting depth (64) of `with` blocks
pub const DEFAULT_MAX_DEPTH: usize = 64;
/// Maximum script size (1MB)
pub const DEFAULT_MAX_SIZE: usize = 1_048_576; // 1MB
/// Maximum length of a single string literal (100KB)
pub const DEFAULT_MAX_STRING_LENGTH: usize = 102_400; // 100KB

/// Limits applied while replaying untrusted code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Maximum nesting depth of `with` blocks
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_size: usize,
    /// Maximum string literal length in bytes
    pub max_string_length: usize,
}

/// Tracks nesting depth and consumed size during a replay
#[derive(Debug)]
pub struct ReplayContext {
    pub current_depth: usize,
    current_size: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: DEFAULT_MAX_SIZE,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
        }
    }
}

impl fmt::Display for ReplayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ReplayConfig {{ max_depth: {}, max_size: {}, max_string_length: {} }}",
            self.max_depth, self.max_size, self.max_string_length
        )
    }
}

impl ReplayConfig {
    pub fn validate_string(&self, s: &str) -> Result<()> {
        if s.len() > self.max_string_length {
            return Err(MarkupError::from(SecurityError::MaxStringLengthExceeded));
        }
        Ok(())
    }
}

impl Default for ReplayContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayContext {
    pub fn new() -> Self {
        Self {
            current_depth: 0,
            current_size: 0,
        }
    }

    pub fn enter_nested(&mut self, config: &ReplayConfig) -> Result<()> {
        self.current_depth += 1;
        if self.current_depth > config.max_depth {
            return Err(MarkupError::from(SecurityError::MaxDepthExceeded));
        }
        Ok(())
    }

    pub fn exit_nested(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }

    pub fn add_size(&mut self, size: usize, config: &ReplayConfig) -> Result<()> {
        self.current_size = self.current_size.saturating_add(size);
        if self.current_size > config.max_size {
            return Err(MarkupError::from(SecurityError::MaxSizeExceeded));
        }
        Ok(())
    }
}
