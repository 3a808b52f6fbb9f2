mod code;
mod text;

pub use self::{code::CodeRenderer, text::TextRenderer};
use crate::error::Result;
use crate::format::TextFormat;
use crate::tree::{NodeId, Tree};

/// Trait for rendering a whole tree as a string
///
/// Implementations verify the tree before walking it from the root.
pub trait Renderer {
    fn render(&self, tree: &Tree, format: &TextFormat) -> Result<String>;
}

/// Walk shared by the renderers
pub trait NodeRenderer {
    /// Writes the output of `id` and queues its children on `walk`
    fn visit(&self, walk: &mut Walk<'_>, id: NodeId, format: &TextFormat) -> Result<()>;

    /// Renders the subtree below the root depth-first
    fn walk(&self, tree: &Tree, format: &TextFormat) -> Result<String> {
        let mut walk = Walk::new(tree, format);
        while let Some(step) = walk.steps.pop() {
            match step {
                Step::Visit(id, format) => self.visit(&mut walk, id, &format)?,
                Step::Emit(text) => walk.output.push_str(&text),
            }
        }
        Ok(walk.output)
    }
}

#[derive(Debug)]
enum Step {
    Visit(NodeId, TextFormat),
    Emit(String),
}

/// Explicit stack of a depth-first rendering, so nesting depth is bounded by
/// memory rather than by the call stack
#[derive(Debug)]
pub struct Walk<'t> {
    tree: &'t Tree,
    blank: Vec<bool>,
    steps: Vec<Step>,
    output: String,
}

impl<'t> Walk<'t> {
    fn new(tree: &'t Tree, format: &TextFormat) -> Self {
        Self {
            tree,
            blank: tree.blank_nodes(),
            steps: vec![Step::Visit(tree.root(), format.clone())],
            output: String::new(),
        }
    }

    pub fn tree(&self) -> &'t Tree {
        self.tree
    }

    pub fn emit(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Whether any of `children` renders to something
    pub fn has_content(&self, children: &[NodeId]) -> bool {
        children
            .iter()
            .any(|child| !self.blank.get(child.index()).copied().unwrap_or(false))
    }

    /// Queues `children` at `format`, followed by `closing`
    pub fn queue(&mut self, children: &[NodeId], format: &TextFormat, closing: Option<String>) {
        if let Some(closing) = closing {
            self.steps.push(Step::Emit(closing));
        }
        self.steps.extend(
            children
                .iter()
                .rev()
                .map(|&child| Step::Visit(child, format.clone())),
        );
    }
}
