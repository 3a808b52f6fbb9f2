use super::{NodeRenderer, Renderer, Walk};
use crate::error::Result;
use crate::format::TextFormat;
use crate::tree::{NodeBody, NodeId, Tree};

/// Renders the construction calls that rebuild the tree
///
/// The output replays through [`crate::replay`] into a document with the
/// same text rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeRenderer;

impl Renderer for CodeRenderer {
    fn render(&self, tree: &Tree, format: &TextFormat) -> Result<String> {
        tree.verify()?;
        self.walk(tree, format)
    }
}

impl NodeRenderer for CodeRenderer {
    fn visit(&self, walk: &mut Walk<'_>, id: NodeId, format: &TextFormat) -> Result<()> {
        let node = walk.tree().node(id)?;

        let Some(tag) = node.tag() else {
            match node.body() {
                NodeBody::Leaf(raw) => walk.emit(&raw.render_as_code(format)),
                NodeBody::Children(children) => walk.queue(children, format, None),
                NodeBody::Empty => {}
            }
            return Ok(());
        };

        match node.body() {
            NodeBody::Leaf(raw) if raw.is_plain() => {
                walk.emit(&tag.render_as_code(format, Some(raw.text()), None)?);
            }
            // wrapped text has no positional form; a nested call renders the same
            NodeBody::Leaf(raw) => {
                let block = raw.render_as_code(&format.deeper());
                walk.emit(&tag.render_as_code(format, None, Some(&block))?);
            }
            NodeBody::Children(children) if walk.has_content(children) => {
                let (open, close) = tag.code_parts(format)?;
                walk.emit(&open);
                walk.queue(children, &format.deeper(), Some(close));
            }
            NodeBody::Children(_) | NodeBody::Empty => {
                walk.emit(&tag.render_as_code(format, None, None)?);
            }
        }
        Ok(())
    }
}
