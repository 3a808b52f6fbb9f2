//! Fixtures and comparisons shared by unit tests, integration tests and
//! benchmarks

mod comparison;
mod data;
mod helpers;

pub use comparison::{assert_same_tokens, squash_whitespace};
pub use data::{example_domain, example_domain_parts, EXAMPLE_DOMAIN_DEV, EXAMPLE_DOMAIN_PROD};
pub use helpers::tmp_file_path;

// Re-export common test types/traits
pub use crate::{
    document::{Document, Scope, TagHandle},
    enums::{Encoding, OutputForm, Profile},
    error::{
        IOError, LexicalError, Location, MarkupError, MarkupErrorKind, NameError, Result,
        ScopeError, SecurityError, StructureError, SyntaxError,
    },
    format::TextFormat,
    names::NameCodec,
    replay::{
        config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE, DEFAULT_MAX_STRING_LENGTH},
        replay, replay_with_codec, replay_with_config, ReplayConfig, Replayer,
    },
    replay_file,
    tree::{Attributes, NodeBody, NodeId, RawBlock, Tree},
    utils::{read_file, write_file},
};
