//! Builder façade over a markup tree
//!
//! A [`Document`] keeps a cursor: the node new content is appended to.
//! Entering a scope moves the cursor to the element added last, exiting moves
//! it back to the parent. Rendering is only allowed once every scope is
//! closed again.
//!
//! ```
//! use zmarkup::{Attributes, Document, TextFormat};
//!
//! # fn main() -> zmarkup::Result<()> {
//! let mut doc = Document::new();
//! doc.add_tag("ul", None, Attributes::new())?.scope(|doc| {
//!     doc.add_tag("li", Some("first"), Attributes::new())?;
//!     doc.add_tag("li", Some("second"), Attributes::new().set("class", "last"))?;
//!     Ok(())
//! })?;
//!
//! assert_eq!(
//!     doc.render(&TextFormat::prod())?,
//!     "<ul><li>first</li><li class=\"last\">second</li></ul>"
//! );
//! # Ok(())
//! # }
//! ```

use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
};
use tracing::{debug, instrument, warn};

use crate::enums::Encoding;
use crate::error::{Result, ScopeError, StructureError};
use crate::format::TextFormat;
use crate::intern::NameInterner;
use crate::names::NameCodec;
use crate::render::{CodeRenderer, Renderer, TextRenderer};
use crate::tree::{AttributeValue, Attributes, ElementTag, NodeBody, NodeId, RawBlock, Tree};

/// Declaration emitted first by [`Document::with_doctype`]
pub const DOCTYPE_TAG: &str = "!DOCTYPE";

#[derive(Debug, Clone)]
pub struct Document {
    tree: Tree,
    cursor: NodeId,
    codec: NameCodec,
    names: Arc<NameInterner>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_codec(NameCodec::default())
    }

    /// Empty document resolving names through `codec`
    pub fn with_codec(codec: NameCodec) -> Self {
        Self {
            tree: Tree::new(),
            cursor: NodeId::ROOT,
            codec,
            names: Arc::new(NameInterner::new()),
        }
    }

    /// Document starting with `<!DOCTYPE html>`
    pub fn with_doctype() -> Result<Self> {
        let mut doc = Self::new();
        doc.add_tag(DOCTYPE_TAG, None, Attributes::new().flag("html"))?;
        Ok(doc)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Direct access to the arena; renders verify it again
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn codec(&self) -> &NameCodec {
        &self.codec
    }

    pub fn names(&self) -> &NameInterner {
        &self.names
    }

    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    pub fn is_at_root(&self) -> bool {
        self.cursor == NodeId::ROOT
    }

    /// Number of open scopes
    pub fn depth(&self) -> Result<usize> {
        self.tree.depth(self.cursor)
    }

    /// Appends an element under the cursor.
    ///
    /// `name` and attribute names may be given literally (`http-equiv`) or
    /// in safe form (`_http_equiv`). `text` becomes the element's raw inner
    /// text; declarations (names starting with `!`) take none.
    pub fn add_tag(
        &mut self,
        name: &str,
        text: Option<&str>,
        attributes: Attributes,
    ) -> Result<TagHandle<'_>> {
        let (literal, safe) = self.codec.element_names(name)?;
        if literal.starts_with('!') && text.is_some() {
            warn!("Rejected inner text for declaration {}", literal);
            return Err(StructureError::InvalidTagUsage(literal).into());
        }

        let mut values: Vec<AttributeValue> = Vec::with_capacity(attributes.len());
        for spec in attributes {
            let (attr_literal, attr_safe) = self.codec.attribute_names(&spec.name)?;
            let value = AttributeValue::new(
                self.names.intern(&attr_literal),
                self.names.intern(&attr_safe),
                spec.value,
                spec.escape,
            );
            // `data-x` and `_data_x` name the same attribute
            match values.iter_mut().find(|existing| existing.name() == value.name()) {
                Some(existing) => *existing = value,
                None => values.push(value),
            }
        }

        let tag = ElementTag::new(self.names.intern(&literal), self.names.intern(&safe), values);
        let body = match text {
            Some(text) => NodeBody::Leaf(RawBlock::new(text)),
            None => NodeBody::Empty,
        };
        let id = self.tree.append(self.cursor, Some(tag), body)?;
        Ok(TagHandle { doc: self, id })
    }

    pub fn add_raw(&mut self, text: &str) -> Result<NodeId> {
        self.add_leaf(RawBlock::new(text))
    }

    /// Raw text with every line wrapped in `prefix` and `suffix`
    pub fn add_raw_wrapped(
        &mut self,
        text: &str,
        prefix: Option<&str>,
        suffix: Option<&str>,
    ) -> Result<NodeId> {
        self.add_leaf(RawBlock::wrapped(
            text,
            prefix.map(String::from),
            suffix.map(String::from),
        ))
    }

    pub fn add_comment(&mut self, text: &str) -> Result<NodeId> {
        self.add_leaf(RawBlock::comment(text))
    }

    fn add_leaf(&mut self, raw: RawBlock) -> Result<NodeId> {
        self.tree.append(self.cursor, None, NodeBody::Leaf(raw))
    }

    /// Moves the cursor to the element appended last
    pub fn enter_scope(&mut self) -> Result<()> {
        let Some(last) = self.tree.last_child(self.cursor) else {
            warn!("Cannot enter scope: cursor has no children");
            return Err(ScopeError::NoActiveChild.into());
        };

        let node = self.tree.node(last)?;
        let rejection = match (node.tag(), node.body()) {
            (None, _) => Some("untagged node".to_string()),
            (Some(tag), _) if tag.is_declaration() => Some(tag.name().to_string()),
            (Some(tag), NodeBody::Leaf(_)) => Some(format!("{} holding text", tag.name())),
            (Some(_), _) => None,
        };
        if let Some(what) = rejection {
            warn!("Cannot enter scope of {}", what);
            return Err(ScopeError::NotScopable(what).into());
        }

        self.cursor = last;
        debug!("Entered scope of node {}", last.index());
        Ok(())
    }

    /// Moves the cursor back to its parent
    pub fn exit_scope(&mut self) -> Result<()> {
        match self.tree.node(self.cursor)?.parent() {
            Some(parent) => {
                debug!("Exited scope of node {}", self.cursor.index());
                self.cursor = parent;
                Ok(())
            }
            None => {
                warn!("Scope exit at root");
                Err(ScopeError::UnbalancedScope.into())
            }
        }
    }

    /// Grafts `other` under the cursor, consuming it
    pub fn append(&mut self, other: Self) -> Result<NodeId> {
        self.append_copy(&other)
    }

    /// Grafts an independent copy of `other` under the cursor.
    ///
    /// The other document's untagged root becomes a transparent child, so its
    /// top-level nodes render at the cursor's level.
    pub fn append_copy(&mut self, other: &Self) -> Result<NodeId> {
        if !other.is_at_root() {
            let depth = other.depth()?;
            warn!("Refusing to append a document with {} open scope(s)", depth);
            return Err(ScopeError::UnclosedScope(depth).into());
        }

        let names = Arc::clone(&self.names);
        let id = self.tree.graft(
            self.cursor,
            &other.tree,
            other.tree.root(),
            &mut |tag: &ElementTag| tag.reinterned(&names),
        )?;
        debug!("Appended {} node(s)", other.tree.len());
        Ok(id)
    }

    fn ensure_closed(&self) -> Result<()> {
        if self.is_at_root() {
            return Ok(());
        }
        let depth = self.depth()?;
        warn!("Render requested with {} open scope(s)", depth);
        Err(ScopeError::UnclosedScope(depth).into())
    }

    /// Renders through any [`Renderer`]
    pub fn render_with<R: Renderer>(&self, renderer: &R, format: &TextFormat) -> Result<String> {
        self.ensure_closed()?;
        renderer.render(&self.tree, format)
    }

    #[instrument(level = "debug", skip(self), fields(nodes = self.tree.len()))]
    pub fn render(&self, format: &TextFormat) -> Result<String> {
        self.render_with(&TextRenderer, format)
    }

    #[instrument(level = "debug", skip(self), fields(nodes = self.tree.len()))]
    pub fn render_code(&self, format: &TextFormat) -> Result<String> {
        self.render_with(&CodeRenderer, format)
    }

    pub fn render_bytes(&self, format: &TextFormat, encoding: Encoding) -> Result<Vec<u8>> {
        Ok(encoding.encode(&self.render(format)?))
    }
}

/// Element just appended to a [`Document`]
#[derive(Debug)]
pub struct TagHandle<'a> {
    doc: &'a mut Document,
    id: NodeId,
}

impl<'a> TagHandle<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Opens a scope on the element; it closes when the guard drops
    pub fn enter(self) -> Result<Scope<'a>> {
        self.doc.enter_scope()?;
        Ok(Scope {
            doc: self.doc,
            open: true,
        })
    }

    /// Runs `build` inside the element's scope.
    ///
    /// The scope is closed whether or not `build` succeeds; an error from
    /// `build` takes precedence over one from closing.
    pub fn scope<F, T>(self, build: F) -> Result<T>
    where
        F: FnOnce(&mut Document) -> Result<T>,
    {
        let mut scope = self.enter()?;
        let result = build(&mut scope);
        let closed = scope.close();
        let value = result?;
        closed?;
        Ok(value)
    }
}

/// Open scope on a [`Document`]
///
/// Dereferences to the document. Dropping the guard exits the scope.
#[derive(Debug)]
pub struct Scope<'a> {
    doc: &'a mut Document,
    open: bool,
}

impl Scope<'_> {
    /// Exits the scope and reports failures that a drop would only log
    pub fn close(mut self) -> Result<()> {
        self.open = false;
        self.doc.exit_scope()
    }
}

impl Deref for Scope<'_> {
    type Target = Document;

    fn deref(&self) -> &Document {
        self.doc
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Document {
        self.doc
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        if self.open {
            if let Err(err) = self.doc.exit_scope() {
                warn!("Scope guard could not exit: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MarkupError, MarkupErrorKind};

    fn scope_error(err: &MarkupError) -> Option<&ScopeError> {
        match err.kind() {
            MarkupErrorKind::Scope(scope) => Some(scope),
            _ => None,
        }
    }

    #[test]
    fn test_enter_requires_child() {
        let mut doc = Document::new();
        let err = doc.enter_scope().unwrap_err();
        assert_eq!(scope_error(&err), Some(&ScopeError::NoActiveChild));
    }

    #[test]
    fn test_enter_rejects_text_and_declarations() {
        let mut doc = Document::new();
        doc.add_raw("loose text").unwrap();
        assert!(matches!(
            scope_error(&doc.enter_scope().unwrap_err()),
            Some(ScopeError::NotScopable(_))
        ));

        doc.add_tag("p", Some("holds text"), Attributes::new()).unwrap();
        assert!(matches!(
            scope_error(&doc.enter_scope().unwrap_err()),
            Some(ScopeError::NotScopable(_))
        ));

        let mut doc = Document::with_doctype().unwrap();
        assert!(matches!(
            scope_error(&doc.enter_scope().unwrap_err()),
            Some(ScopeError::NotScopable(_))
        ));
    }

    #[test]
    fn test_exit_at_root_is_unbalanced() {
        let mut doc = Document::new();
        let err = doc.exit_scope().unwrap_err();
        assert_eq!(scope_error(&err), Some(&ScopeError::UnbalancedScope));
    }

    #[test]
    fn test_render_rejects_open_scope() {
        let mut doc = Document::new();
        doc.add_tag("div", None, Attributes::new()).unwrap();
        doc.enter_scope().unwrap();
        doc.add_tag("div", None, Attributes::new()).unwrap();
        doc.enter_scope().unwrap();

        let err = doc.render(&TextFormat::dev()).unwrap_err();
        assert_eq!(scope_error(&err), Some(&ScopeError::UnclosedScope(2)));
        assert!(doc.render_code(&TextFormat::dev()).is_err());

        doc.exit_scope().unwrap();
        doc.exit_scope().unwrap();
        assert_eq!(
            doc.render(&TextFormat::prod()).unwrap(),
            "<div><div/></div>"
        );
    }

    #[test]
    fn test_scope_guard_exits_on_drop() {
        let mut doc = Document::new();
        {
            let mut body = doc.add_tag("body", None, Attributes::new()).unwrap().enter().unwrap();
            body.add_tag("p", Some("inside"), Attributes::new()).unwrap();
            assert_eq!(body.depth().unwrap(), 1);
        }
        assert!(doc.is_at_root());
        assert_eq!(
            doc.render(&TextFormat::prod()).unwrap(),
            "<body><p>inside</p></body>"
        );
    }

    #[test]
    fn test_scope_closure_exits_on_error() {
        let mut doc = Document::new();
        let result: Result<()> = doc
            .add_tag("div", None, Attributes::new())
            .unwrap()
            .scope(|doc| {
                doc.add_tag("!DOCTYPE", Some("bad"), Attributes::new())?;
                Ok(())
            });

        assert!(matches!(
            result.unwrap_err().kind(),
            MarkupErrorKind::Structure(StructureError::InvalidTagUsage(_))
        ));
        assert!(doc.is_at_root());
    }

    #[test]
    fn test_attribute_names_resolve() {
        let mut doc = Document::new();
        doc.add_tag(
            "meta",
            None,
            Attributes::new()
                .set("_http_equiv", "Content-type")
                .set("content", "text/html")
                .set("http-equiv", "refresh"),
        )
        .unwrap();

        assert_eq!(
            doc.render(&TextFormat::prod()).unwrap(),
            "<meta http-equiv=\"refresh\" content=\"text/html\"/>"
        );
        assert_eq!(
            doc.render_code(&TextFormat::prod()).unwrap(),
            "doc.tag(\"meta\", _http_equiv=\"refresh\", content=\"text/html\");"
        );
    }

    #[test]
    fn test_bad_attribute_name() {
        let mut doc = Document::new();
        let err = doc
            .add_tag("p", None, Attributes::new().set("xml:lang", "en"))
            .unwrap_err();
        assert!(matches!(err.kind(), MarkupErrorKind::Name(_)));
        assert!(doc.tree().is_empty());
    }

    #[test]
    fn test_append_copy_is_independent() {
        let mut header = Document::new();
        header.add_tag("h1", Some("Title"), Attributes::new()).unwrap();

        let mut doc = Document::new();
        doc.add_tag("body", None, Attributes::new())
            .unwrap()
            .scope(|doc| doc.append_copy(&header).map(|_| ()))
            .unwrap();

        header.add_raw("later").unwrap();
        assert_eq!(
            doc.render(&TextFormat::prod()).unwrap(),
            "<body><h1>Title</h1></body>"
        );
        let h1 = doc.tree().ids().find(|&id| {
            doc.tree()
                .node(id)
                .ok()
                .and_then(|node| node.tag())
                .is_some_and(|tag| tag.name() == "h1")
        });
        let h1_name = doc.tree().node(h1.unwrap()).unwrap().tag().unwrap().name();
        assert!(h1_name.ptr_eq(&doc.names().intern("h1")));
    }

    #[test]
    fn test_append_rejects_open_document() {
        let mut open = Document::new();
        open.add_tag("div", None, Attributes::new()).unwrap();
        open.enter_scope().unwrap();

        let mut doc = Document::new();
        let err = doc.append(open).unwrap_err();
        assert_eq!(scope_error(&err), Some(&ScopeError::UnclosedScope(1)));
    }

    #[test]
    fn test_render_bytes() {
        let mut doc = Document::new();
        doc.add_tag("p", Some("naïve"), Attributes::new()).unwrap();
        assert_eq!(
            doc.render_bytes(&TextFormat::prod(), Encoding::Ascii).unwrap(),
            b"<p>na&#239;ve</p>".to_vec()
        );
    }
}
