use crate::error::{Result, StructureError};
use crate::tree::{ElementTag, RawBlock};

/// Index of a node inside its [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: Self = Self(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node holds below its tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBody {
    Empty,
    Children(Vec<NodeId>),
    Leaf(RawBlock),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    parent: Option<NodeId>,
    tag: Option<ElementTag>,
    body: NodeBody,
}

impl Node {
    pub fn new(parent: Option<NodeId>, tag: Option<ElementTag>, body: NodeBody) -> Self {
        Self { parent, tag, body }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn tag(&self) -> Option<&ElementTag> {
        self.tag.as_ref()
    }

    pub fn body(&self) -> &NodeBody {
        &self.body
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.body {
            NodeBody::Children(children) => children,
            _ => &[],
        }
    }

    pub fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub fn set_tag(&mut self, tag: Option<ElementTag>) {
        self.tag = tag;
    }

    pub fn body_mut(&mut self) -> &mut NodeBody {
        &mut self.body
    }
}

/// Arena holding the root and every node appended below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(None, None, NodeBody::Empty)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Only the root is present
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or_else(|| missing(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or_else(|| missing(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.children().last().copied()
    }

    /// Walks parent links up to the node without a parent
    pub fn root_of(&self, id: NodeId) -> Result<NodeId> {
        let mut current = id;
        let mut steps = 0;
        while let Some(parent) = self.node(current)?.parent() {
            steps += 1;
            if steps > self.nodes.len() {
                return Err(StructureError::InvalidStructure(format!(
                    "parent links of node {} form a cycle",
                    id.0
                ))
                .into());
            }
            current = parent;
        }
        Ok(current)
    }

    /// Number of parent links between `id` and the root
    pub fn depth(&self, id: NodeId) -> Result<usize> {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.node(current)?.parent() {
            depth += 1;
            if depth > self.nodes.len() {
                return Err(StructureError::InvalidStructure(format!(
                    "parent links of node {} form a cycle",
                    id.0
                ))
                .into());
            }
            current = parent;
        }
        Ok(depth)
    }

    /// Appends a new last child of `parent`
    pub fn append(
        &mut self,
        parent: NodeId,
        tag: Option<ElementTag>,
        body: NodeBody,
    ) -> Result<NodeId> {
        let id = NodeId(self.nodes.len());
        let parent_node = self.node_mut(parent)?;
        match parent_node.body_mut() {
            NodeBody::Children(children) => children.push(id),
            slot @ NodeBody::Empty => *slot = NodeBody::Children(vec![id]),
            NodeBody::Leaf(_) => {
                return Err(StructureError::InvalidStructure(format!(
                    "node {} holds raw text and cannot take children",
                    parent.0
                ))
                .into())
            }
        }
        self.nodes.push(Node::new(Some(parent), tag, body));
        Ok(id)
    }

    /// Copies the subtree of `other` starting at `from` as a new last child
    /// of `parent`, passing every tag through `map_tag`
    pub fn graft<F>(&mut self, parent: NodeId, other: &Self, from: NodeId, map_tag: &mut F) -> Result<NodeId>
    where
        F: FnMut(&ElementTag) -> ElementTag,
    {
        // (target parent, source node); children are pushed in reverse so
        // siblings keep their order
        let mut pending = vec![(parent, from)];
        let mut top = None;
        let mut copied = 0;
        while let Some((target, source_id)) = pending.pop() {
            copied += 1;
            if copied > other.len() {
                return Err(invalid("grafted subtree contains a cycle"));
            }

            let source = other.node(source_id)?;
            let tag = source.tag().map(|tag| map_tag(tag));
            let body = match source.body() {
                NodeBody::Leaf(raw) => NodeBody::Leaf(raw.clone()),
                NodeBody::Empty | NodeBody::Children(_) => NodeBody::Empty,
            };
            let id = self.append(target, tag, body)?;
            top.get_or_insert(id);

            pending.extend(source.children().iter().rev().map(|&child| (id, child)));
        }
        top.ok_or_else(|| missing(from))
    }

    /// Flags untagged nodes whose subtree holds neither a tag nor text.
    ///
    /// Such nodes render as nothing in every form. Expects a verified tree.
    pub fn blank_nodes(&self) -> Vec<bool> {
        let mut blank = vec![false; self.nodes.len()];
        let mut stack = vec![(NodeId::ROOT, false)];
        while let Some((id, children_done)) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            if !children_done {
                stack.push((id, true));
                stack.extend(node.children().iter().map(|&child| (child, false)));
                continue;
            }

            let is_blank = node.tag().is_none()
                && match node.body() {
                    NodeBody::Empty => true,
                    NodeBody::Leaf(_) => false,
                    NodeBody::Children(children) => children
                        .iter()
                        .all(|child| blank.get(child.0).copied().unwrap_or(false)),
                };
            if let Some(flag) = blank.get_mut(id.0) {
                *flag = is_blank;
            }
        }
        blank
    }

    /// Checks the links of the whole arena.
    ///
    /// The root has no parent and no tag. Walking down from the root, every
    /// listed child points back to the node listing it and every node is
    /// reached exactly once. A node whose parent does not list it is never
    /// reached and is reported as detached.
    pub fn verify(&self) -> Result<()> {
        let root = self.node(NodeId::ROOT)?;
        if root.parent().is_some() {
            return Err(invalid("root node has a parent"));
        }
        if root.tag().is_some() {
            return Err(invalid("root node carries a tag"));
        }

        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            match seen.get_mut(id.0) {
                Some(flag) if *flag => {
                    return Err(invalid(format!("node {} is reachable twice", id.0)))
                }
                Some(flag) => *flag = true,
                None => return Err(missing(id)),
            }

            let node = self.node(id)?;
            for &child in node.children() {
                let child_node = self.node(child)?;
                if child_node.parent() != Some(id) {
                    return Err(invalid(format!(
                        "child {} of node {} points elsewhere",
                        child.0, id.0
                    )));
                }
                stack.push(child);
            }
        }

        if let Some(index) = seen.iter().position(|flag| !flag) {
            return Err(invalid(format!("node {} is detached from the root", index)));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> crate::error::MarkupError {
    StructureError::InvalidStructure(message.into()).into()
}

fn missing(id: NodeId) -> crate::error::MarkupError {
    invalid(format!("node {} does not exist", id.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::InternedName;

    fn tag(name: &str) -> ElementTag {
        ElementTag::new(InternedName::from(name), InternedName::from(name), Vec::new())
    }

    fn sample() -> (Tree, NodeId, NodeId) {
        let mut tree = Tree::new();
        let html = tree.append(NodeId::ROOT, Some(tag("html")), NodeBody::Empty).unwrap();
        let body = tree.append(html, Some(tag("body")), NodeBody::Empty).unwrap();
        tree.append(body, None, NodeBody::Leaf(RawBlock::new("text")))
            .unwrap();
        (tree, html, body)
    }

    #[test]
    fn test_append_links_both_ways() {
        let (tree, html, body) = sample();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.node(body).unwrap().parent(), Some(html));
        assert_eq!(tree.last_child(NodeId::ROOT), Some(html));
        assert_eq!(tree.root_of(body).unwrap(), NodeId::ROOT);
        assert_eq!(tree.depth(body).unwrap(), 2);
        assert!(tree.verify().is_ok());
    }

    #[test]
    fn test_leaf_cannot_take_children() {
        let (mut tree, _, body) = sample();
        let leaf = tree.last_child(body).unwrap();
        assert!(tree.append(leaf, None, NodeBody::Empty).is_err());
    }

    #[test]
    fn test_verify_rejects_broken_links() {
        let (mut tree, _, body) = sample();
        tree.node_mut(body).unwrap().set_parent(Some(NodeId::ROOT));
        assert!(tree.verify().is_err());

        let (mut tree, _, _) = sample();
        tree.node_mut(NodeId::ROOT)
            .unwrap()
            .set_tag(Some(tag("oops")));
        assert!(tree.verify().is_err());
    }

    #[test]
    fn test_verify_rejects_shared_child() {
        let (mut tree, html, body) = sample();
        if let NodeBody::Children(children) = tree.node_mut(html).unwrap().body_mut() {
            children.push(body);
        }
        assert!(tree.verify().is_err());
    }

    #[test]
    fn test_verify_rejects_detached_cycle() {
        let (mut tree, html, body) = sample();
        if let NodeBody::Children(children) = tree.node_mut(NodeId::ROOT).unwrap().body_mut() {
            children.clear();
        }
        tree.node_mut(html).unwrap().set_parent(Some(body));
        if let NodeBody::Children(children) = tree.node_mut(body).unwrap().body_mut() {
            children.push(html);
        }
        assert!(tree.verify().is_err());
        assert!(tree.root_of(html).is_err());
    }

    #[test]
    fn test_graft_copies_subtree() {
        let (source, _, _) = sample();
        let mut target = Tree::new();
        let wrapper = target
            .graft(NodeId::ROOT, &source, NodeId::ROOT, &mut |tag| tag.clone())
            .unwrap();

        assert_eq!(target.len(), source.len() + 1);
        assert!(target.node(wrapper).unwrap().tag().is_none());
        assert_eq!(target.depth(target.ids().last().unwrap()).unwrap(), 4);
        assert!(target.verify().is_ok());
    }

    #[test]
    fn test_graft_keeps_sibling_order() {
        let mut source = Tree::new();
        let list = source.append(NodeId::ROOT, Some(tag("ul")), NodeBody::Empty).unwrap();
        for name in ["a", "b", "c"] {
            let item = source.append(list, Some(tag("li")), NodeBody::Empty).unwrap();
            source
                .append(item, None, NodeBody::Leaf(RawBlock::new(name)))
                .unwrap();
        }

        let mut target = Tree::new();
        let wrapper = target
            .graft(NodeId::ROOT, &source, NodeId::ROOT, &mut |tag| tag.clone())
            .unwrap();
        let copied_list = target.node(wrapper).unwrap().children()[0];
        let texts: Vec<String> = target
            .node(copied_list)
            .unwrap()
            .children()
            .iter()
            .map(|&item| {
                let leaf = target.node(item).unwrap().children()[0];
                match target.node(leaf).unwrap().body() {
                    NodeBody::Leaf(raw) => raw.text().to_string(),
                    other => panic!("expected a leaf, got {:?}", other),
                }
            })
            .collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[test]
    fn test_graft_deep_subtree() {
        let mut source = Tree::new();
        let mut parent = NodeId::ROOT;
        for _ in 0..20_000 {
            parent = source.append(parent, Some(tag("div")), NodeBody::Empty).unwrap();
        }

        let mut target = Tree::new();
        target
            .graft(NodeId::ROOT, &source, NodeId::ROOT, &mut |tag| tag.clone())
            .unwrap();
        assert_eq!(target.len(), source.len() + 1);
        assert!(target.verify().is_ok());
    }

    #[test]
    fn test_verify_wide_tree() {
        let mut tree = Tree::new();
        let body = tree.append(NodeId::ROOT, Some(tag("tbody")), NodeBody::Empty).unwrap();
        for _ in 0..100_000 {
            tree.append(body, Some(tag("tr")), NodeBody::Empty).unwrap();
        }
        assert!(tree.verify().is_ok());
    }

    #[test]
    fn test_verify_rejects_unlisted_node() {
        let (mut tree, html, body) = sample();
        if let NodeBody::Children(children) = tree.node_mut(html).unwrap().body_mut() {
            children.clear();
        }
        assert_eq!(tree.node(body).unwrap().parent(), Some(html));
        assert!(tree.verify().is_err());
    }

    #[test]
    fn test_blank_nodes() {
        let mut tree = Tree::new();
        let div = tree.append(NodeId::ROOT, Some(tag("div")), NodeBody::Empty).unwrap();
        let empty = tree.append(div, None, NodeBody::Empty).unwrap();
        let wrapper = tree.append(div, None, NodeBody::Empty).unwrap();
        let nested = tree.append(wrapper, None, NodeBody::Empty).unwrap();
        let text = tree
            .append(NodeId::ROOT, None, NodeBody::Leaf(RawBlock::new("")))
            .unwrap();

        let blank = tree.blank_nodes();
        assert!(blank[empty.index()]);
        assert!(blank[wrapper.index()]);
        assert!(blank[nested.index()]);
        assert!(!blank[div.index()]);
        assert!(!blank[text.index()]);
        assert!(!blank[NodeId::ROOT.index()]);
    }
}
