//! Node identity and per-kind payloads.

use std::collections::BTreeMap;

use strum_macros::{Display, EnumIter};

/// Map of attribute names to values for an element or declaration.
///
/// Ordered so that debug output and serialized trees are deterministic.
pub type AttributesMap = BTreeMap<String, String>;

/// A type-safe index into a [`DomTree`](crate::DomTree).
///
/// Handles are never reused, so a `NodeId` that was valid once stays valid
/// for the lifetime of the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document created with the tree is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// The closed set of node kinds.
///
/// The `Display` form is the kind name used in error messages
/// (e.g. `Text does not exist in document`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum NodeKind {
    /// Owner of a tree; never has a parent.
    Document,
    /// Named container with attributes.
    Element,
    /// Character data leaf.
    Text,
    /// Comment leaf.
    Comment,
    /// Attribute-bearing leaf, e.g. `<?xml version="1.0"?>`.
    Declaration,
}

impl NodeKind {
    /// Whether nodes of this kind can hold ordered children.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Document | Self::Element)
    }
}

/// Kind-specific data carried by a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// A document has no payload of its own.
    Document,
    /// Element data (tag name and attributes).
    Element(ElementData),
    /// Text value. Defaults to the empty string.
    Text(String),
    /// Comment value. Absent unless given.
    Comment(Option<String>),
    /// Declaration attributes.
    Declaration(DeclarationData),
}

impl NodeData {
    /// The kind tag of this payload.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Document => NodeKind::Document,
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
            Self::Comment(_) => NodeKind::Comment,
            Self::Declaration(_) => NodeKind::Declaration,
        }
    }
}

/// Read/write access to a flat attribute map.
///
/// Implemented by the node payloads that carry attributes.
pub trait AttributeStore {
    /// The underlying map.
    fn attributes(&self) -> &AttributesMap;

    /// The underlying map, mutably.
    fn attributes_mut(&mut self) -> &mut AttributesMap;

    /// Value of `name`, if set. An empty value is still a value.
    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes().get(name).map(String::as_str)
    }

    /// Whether `name` is set.
    fn has_attribute(&self, name: &str) -> bool {
        self.attributes().contains_key(name)
    }

    /// Set `name` to `value`, overwriting any previous value.
    fn set_attribute(&mut self, name: &str, value: &str) -> &AttributesMap {
        let _previous = self
            .attributes_mut()
            .insert(name.to_string(), value.to_string());
        self.attributes()
    }

    /// Remove `name`. Removing an unset name leaves the map unchanged.
    fn remove_attribute(&mut self, name: &str) -> &AttributesMap {
        let _removed = self.attributes_mut().remove(name);
        self.attributes()
    }
}

/// Element-specific data.
///
/// The tag name is fixed at creation. A qualified name such as `svg:rect`
/// is split at the first colon into a prefix and a local name; the split is
/// purely lexical and does not resolve namespaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    tag_name: String,
    prefix: Option<String>,
    local_name: String,
    /// The element's attributes.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data for `tag_name` with the given attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>, attrs: AttributesMap) -> Self {
        let tag_name = tag_name.into();
        let (prefix, local_name) = match tag_name.split_once(':') {
            Some((prefix, local)) => (Some(prefix.to_string()), local.to_string()),
            None => (None, tag_name.clone()),
        };
        Self {
            tag_name,
            prefix,
            local_name,
            attrs,
        }
    }

    /// The full tag name as written.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Text before the first `:` in the tag name, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Tag name without its prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }
}

impl AttributeStore for ElementData {
    fn attributes(&self) -> &AttributesMap {
        &self.attrs
    }

    fn attributes_mut(&mut self) -> &mut AttributesMap {
        &mut self.attrs
    }
}

/// Declaration-specific data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationData {
    /// The declaration's attributes (`version`, `encoding`, ...).
    pub attrs: AttributesMap,
}

impl AttributeStore for DeclarationData {
    fn attributes(&self) -> &AttributesMap {
        &self.attrs
    }

    fn attributes_mut(&mut self) -> &mut AttributesMap {
        &mut self.attrs
    }
}

/// A node stored in the arena.
///
/// Structural fields are private: `parent` and `children` change only through
/// the mutation methods on [`DomTree`](crate::DomTree).
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) data: NodeData,
    pub(crate) namespace_uri: Option<String>,
    pub(crate) root_document: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) const fn new(
        data: NodeData,
        namespace_uri: Option<String>,
        root_document: Option<NodeId>,
    ) -> Self {
        Self {
            data,
            namespace_uri,
            root_document,
            parent: None,
            children: Vec::new(),
        }
    }

    /// The node's kind tag.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    /// The node's kind-specific data.
    #[must_use]
    pub const fn data(&self) -> &NodeData {
        &self.data
    }

    /// The namespace URI stamped at creation, if any.
    #[must_use]
    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace_uri.as_deref()
    }

    /// The owning document. A document owns itself.
    #[must_use]
    pub const fn root_document(&self) -> Option<NodeId> {
        self.root_document
    }

    /// The container this node is attached to, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered children. Always empty for leaf kinds.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_only_document_and_element_are_containers() {
        let containers: Vec<NodeKind> = NodeKind::iter().filter(|k| k.is_container()).collect();
        assert_eq!(containers, vec![NodeKind::Document, NodeKind::Element]);
    }

    #[test]
    fn test_kind_display_names() {
        assert_eq!(NodeKind::Text.to_string(), "Text");
        assert_eq!(NodeKind::Declaration.to_string(), "Declaration");
    }

    #[test]
    fn test_prefixed_tag_name_split() {
        let data = ElementData::new("svg:rect", AttributesMap::new());
        assert_eq!(data.tag_name(), "svg:rect");
        assert_eq!(data.prefix(), Some("svg"));
        assert_eq!(data.local_name(), "rect");

        let nested = ElementData::new("a:b:c", AttributesMap::new());
        assert_eq!(nested.prefix(), Some("a"));
        assert_eq!(nested.local_name(), "b:c");
    }

    #[test]
    fn test_unprefixed_tag_name() {
        let data = ElementData::new("div", AttributesMap::new());
        assert_eq!(data.prefix(), None);
        assert_eq!(data.local_name(), "div");
    }

    #[test]
    fn test_attribute_store() {
        let mut data = DeclarationData::default();
        let _ = data.set_attribute("version", "1.0");
        let _ = data.set_attribute("empty", "");
        assert_eq!(data.get_attribute("version"), Some("1.0"));
        assert_eq!(data.get_attribute("empty"), Some(""));
        assert_eq!(data.get_attribute("missing"), None);
        assert!(data.has_attribute("empty"));

        let after = data.set_attribute("version", "1.1").clone();
        assert_eq!(after.get("version").map(String::as_str), Some("1.1"));

        let remaining = data.remove_attribute("version").clone();
        assert_eq!(remaining.len(), 1);
        assert!(!data.has_attribute("version"));

        let unchanged = data.remove_attribute("foobar").clone();
        assert_eq!(unchanged, remaining);
    }
}
