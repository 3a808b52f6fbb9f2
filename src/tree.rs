//! Node model of a markup tree
//!
//! A tree is an arena of [`Node`]s addressed by [`NodeId`]. Index 0 is the
//! untagged root. Every other node is an element (it carries an
//! [`ElementTag`]) or an untagged text leaf, and its body is one of the
//! closed [`NodeBody`] variants, so a node can never hold children and raw
//! text at the same time.

pub mod attribute;
pub mod node;
pub mod raw;
pub mod tag;

pub use attribute::{AttributeSpec, AttributeValue, Attributes};
pub use node::{Node, NodeBody, NodeId, Tree};
pub use raw::{RawBlock, RawKind, COMMENT_PREFIX, COMMENT_SUFFIX};
pub use tag::ElementTag;
