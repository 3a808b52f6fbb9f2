use super::{NodeRenderer, Renderer, Walk};
use crate::error::Result;
use crate::format::TextFormat;
use crate::tree::{NodeBody, NodeId, Tree};

/// Renders the markup itself
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, tree: &Tree, format: &TextFormat) -> Result<String> {
        tree.verify()?;
        self.walk(tree, format)
    }
}

impl NodeRenderer for TextRenderer {
    fn visit(&self, walk: &mut Walk<'_>, id: NodeId, format: &TextFormat) -> Result<()> {
        let node = walk.tree().node(id)?;

        // untagged nodes are transparent and keep their children at their own level
        let Some(tag) = node.tag() else {
            match node.body() {
                NodeBody::Leaf(raw) => walk.emit(&raw.render_as_text(format)),
                NodeBody::Children(children) => walk.queue(children, format, None),
                NodeBody::Empty => {}
            }
            return Ok(());
        };

        match node.body() {
            NodeBody::Leaf(raw) => {
                let inner = raw.render_as_text(&format.deeper());
                walk.emit(&tag.render_as_text(format, Some(&inner))?);
            }
            NodeBody::Children(children) if walk.has_content(children) => {
                let (open, close) = tag.text_parts(format)?;
                walk.emit(&open);
                walk.queue(children, &format.deeper(), Some(close));
            }
            NodeBody::Children(_) | NodeBody::Empty => {
                walk.emit(&tag.render_as_text(format, None)?);
            }
        }
        Ok(())
    }
}
