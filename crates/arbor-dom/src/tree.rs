//! The arena that owns every node, plus construction and read-only queries.

use crate::error::{DomError, HierarchyError, InvalidArgument, Result};
use crate::node::{DeclarationData, ElementData, Node, NodeData, NodeId, NodeKind};
use crate::options::{NodeInit, NodeOptions};
use crate::placement::DomConfig;

/// Arena of nodes with O(1) access by [`NodeId`].
///
/// All nodes live in one contiguous vector and refer to each other by index.
/// A container owns its children through its ordered child list; a child's
/// `parent` is a back-reference maintained by the mutation methods.
///
/// The tree is created with a document at [`NodeId::ROOT`]. Further
/// documents and detached nodes can be created at any time.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the arena, indexed by `NodeId`.
    pub(crate) nodes: Vec<Node>,
    pub(crate) config: DomConfig,
}

impl DomTree {
    /// Create a tree holding just a document node, with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DomConfig::default())
    }

    /// Create a tree holding just a document node.
    #[must_use]
    pub fn with_config(config: DomConfig) -> Self {
        let document = Node::new(NodeData::Document, None, Some(NodeId::ROOT));
        Self {
            nodes: vec![document],
            config,
        }
    }

    /// Stamp a namespace URI on the root document.
    #[must_use]
    pub fn with_namespace(mut self, namespace_uri: impl Into<String>) -> Self {
        self.nodes[NodeId::ROOT.0].namespace_uri = Some(namespace_uri.into());
        self
    }

    /// The tree's settings.
    #[must_use]
    pub const fn config(&self) -> &DomConfig {
        &self.config
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Whether `id` refers to a node of this tree.
    #[must_use]
    pub fn is_live(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Number of nodes ever created in this tree, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root document exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Allocate a detached node and return its ID.
    ///
    /// A document allocated this way owns itself.
    pub fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        let root_document = matches!(data, NodeData::Document).then_some(id);
        self.nodes.push(Node::new(data, None, root_document));
        id
    }

    /// Create a detached element with no attributes.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(NodeData::Element(ElementData::new(tag_name, Default::default())))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, value: &str) -> NodeId {
        self.alloc(NodeData::Text(value.to_string()))
    }

    /// Create a node from an option bag.
    ///
    /// When `options.parent` is set the node is appended to it through
    /// [`append_child`](Self::append_child); if that fails the node is
    /// discarded and the tree is left as it was.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument::NotADocument`] if `options.root_document` is not a
    /// document, or any error from `append_child`.
    pub fn create(&mut self, init: NodeInit, options: NodeOptions) -> Result<NodeId> {
        let NodeOptions {
            namespace_uri,
            root_document,
            parent,
        } = options;

        if let Some(document) = root_document {
            let _document = self.expect_document(document)?;
        }

        let id = NodeId(self.nodes.len());
        let data = init.into_data();
        let root_document = if matches!(data, NodeData::Document) {
            Some(id)
        } else {
            root_document
        };
        self.nodes.push(Node::new(data, namespace_uri, root_document));

        if let Some(parent) = parent
            && let Err(err) = self.append_child(parent, id)
        {
            let _discarded = self.nodes.pop();
            return Err(err);
        }
        Ok(id)
    }

    /// Document-scoped factory.
    ///
    /// Non-document nodes are stamped with `document` as their root document
    /// and inherit its namespace URI, overriding those fields in `options`.
    /// Asking for a document yields a new, independent document built from
    /// `options` as given.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument::NotADocument`] if `document` is not a document, or
    /// any error from [`create`](Self::create).
    pub fn create_node(
        &mut self,
        document: NodeId,
        init: NodeInit,
        options: NodeOptions,
    ) -> Result<NodeId> {
        let namespace_uri = self.expect_document(document)?.namespace_uri.clone();
        if matches!(init, NodeInit::Document) {
            return self.create(init, options);
        }
        let options = NodeOptions {
            namespace_uri,
            root_document: Some(document),
            ..options
        };
        self.create(init, options)
    }

    fn expect_document(&self, id: NodeId) -> Result<&Node> {
        let node = self.get(id).ok_or(InvalidArgument::NullNode)?;
        if node.kind() == NodeKind::Document {
            Ok(node)
        } else {
            Err(InvalidArgument::NotADocument { kind: node.kind() }.into())
        }
    }

    // =========================================================================
    // Node accessors
    // =========================================================================

    /// The kind of a node, or `None` if the ID is not live.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(Node::kind)
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Position of `child` in `parent`'s children.
    #[must_use]
    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|&id| id == child)
    }

    /// Whether `parent`'s children include `child`.
    #[must_use]
    pub fn contains(&self, parent: NodeId, child: NodeId) -> bool {
        self.index_of(parent, child).is_some()
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_of(parent, id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_of(parent, id)?;
        index
            .checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Check if `descendant` is a descendant of `ancestor` via parent links.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Mutable element data, for attribute edits.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id.0).and_then(|n| match &mut n.data {
            NodeData::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get declaration data if this node is a declaration.
    #[must_use]
    pub fn as_declaration(&self, id: NodeId) -> Option<&DeclarationData> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Declaration(data) => Some(data),
            _ => None,
        })
    }

    /// Mutable declaration data, for attribute edits.
    pub fn as_declaration_mut(&mut self, id: NodeId) -> Option<&mut DeclarationData> {
        self.nodes.get_mut(id.0).and_then(|n| match &mut n.data {
            NodeData::Declaration(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// The value of a text or comment node; `None` for every other kind
    /// and for a comment created without a value.
    #[must_use]
    pub fn node_value(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(value) => Some(value.as_str()),
            NodeData::Comment(value) => value.as_deref(),
            _ => None,
        })
    }

    /// Replace the value of a text or comment node.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument::NullNode`] for an unknown ID and
    /// [`InvalidArgument::UnexpectedValueType`] for kinds without a value.
    pub fn set_node_value(&mut self, id: NodeId, value: &str) -> Result<()> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(InvalidArgument::NullNode)?;
        match &mut node.data {
            NodeData::Text(current) => value.clone_into(current),
            NodeData::Comment(current) => *current = Some(value.to_string()),
            other => {
                return Err(InvalidArgument::UnexpectedValueType { kind: other.kind() }.into());
            }
        }
        Ok(())
    }

    /// Concatenated text of every text node under `id`, in document order.
    /// For a text or comment node, its own value.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut result = String::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            match self.get(current).map(Node::data) {
                Some(NodeData::Text(value)) => result.push_str(value),
                Some(NodeData::Comment(Some(value))) if current == id => result.push_str(value),
                Some(NodeData::Document | NodeData::Element(_)) => {
                    pending.extend(self.children(current).iter().rev());
                }
                _ => {}
            }
        }
        result
    }

    /// The first element child of a document.
    #[must_use]
    pub fn document_element(&self, document: NodeId) -> Option<NodeId> {
        if self.kind(document) != Some(NodeKind::Document) {
            return None;
        }
        self.children(document)
            .iter()
            .find(|&&id| self.kind(id) == Some(NodeKind::Element))
            .copied()
    }

    pub(crate) fn not_found(&self, parent: NodeId, reference: NodeId) -> DomError {
        let Some(kind) = self.kind(reference) else {
            return HierarchyError::NotANode.into();
        };
        let err = match self.as_element(parent) {
            Some(element) => HierarchyError::NotFoundInElement {
                kind,
                tag_name: element.tag_name().to_string(),
            },
            None => HierarchyError::NotFoundInDocument { kind },
        };
        err.into()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_self_owned_document() {
        let tree = DomTree::new();
        let root = tree.get(tree.root()).unwrap();
        assert_eq!(root.kind(), NodeKind::Document);
        assert_eq!(root.root_document(), Some(NodeId::ROOT));
        assert_eq!(root.parent(), None);
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_alloc_document_owns_itself() {
        let mut tree = DomTree::new();
        let doc = tree.alloc(NodeData::Document);
        assert_eq!(tree.get(doc).unwrap().root_document(), Some(doc));
    }

    #[test]
    fn test_text_content_in_document_order() {
        let mut tree = DomTree::new();
        let p = tree.create_element("p");
        let hello = tree.create_text("hello ");
        let b = tree.create_element("b");
        let world = tree.create_text("world");
        let _ = tree.append_child(p, hello).unwrap();
        let _ = tree.append_child(p, b).unwrap();
        let _ = tree.append_child(b, world).unwrap();
        assert_eq!(tree.text_content(p), "hello world");
        assert_eq!(tree.text_content(world), "world");
    }
}
