//! Option bags for node construction.

use crate::node::{AttributesMap, DeclarationData, ElementData, NodeData, NodeId};

/// Fields shared by every node kind. Everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeOptions {
    /// Namespace URI to stamp on the node.
    pub namespace_uri: Option<String>,
    /// Owning document. Ignored for documents, which own themselves.
    pub root_document: Option<NodeId>,
    /// Container to append the new node to.
    pub parent: Option<NodeId>,
}

impl NodeOptions {
    /// Options with every field unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace URI.
    #[must_use]
    pub fn namespace_uri(mut self, namespace_uri: impl Into<String>) -> Self {
        self.namespace_uri = Some(namespace_uri.into());
        self
    }

    /// Set the owning document.
    #[must_use]
    pub const fn root_document(mut self, document: NodeId) -> Self {
        self.root_document = Some(document);
        self
    }

    /// Append the new node to `parent` once created.
    #[must_use]
    pub const fn parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Kind-specific construction fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeInit {
    /// A new, empty document.
    Document,
    /// An element with a tag name and initial attributes.
    Element {
        /// Tag name, possibly prefixed (`svg:rect`).
        tag_name: String,
        /// Initial attributes.
        attributes: AttributesMap,
    },
    /// A text node with its value.
    Text(String),
    /// A comment, with or without a value.
    Comment(Option<String>),
    /// A declaration with initial attributes.
    Declaration(AttributesMap),
}

impl NodeInit {
    /// Element with no attributes.
    #[must_use]
    pub fn element(tag_name: impl Into<String>) -> Self {
        Self::Element {
            tag_name: tag_name.into(),
            attributes: AttributesMap::new(),
        }
    }

    /// Text node with the given value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Comment with the given value.
    #[must_use]
    pub fn comment(value: impl Into<String>) -> Self {
        Self::Comment(Some(value.into()))
    }

    /// Declaration with no attributes.
    #[must_use]
    pub fn declaration() -> Self {
        Self::Declaration(AttributesMap::new())
    }

    /// Add an attribute. Has no effect on kinds without attributes.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            Self::Element { attributes, .. } | Self::Declaration(attributes) => {
                let _previous = attributes.insert(name.into(), value.into());
            }
            Self::Document | Self::Text(_) | Self::Comment(_) => {}
        }
        self
    }

    pub(crate) fn into_data(self) -> NodeData {
        match self {
            Self::Document => NodeData::Document,
            Self::Element {
                tag_name,
                attributes,
            } => NodeData::Element(ElementData::new(tag_name, attributes)),
            Self::Text(value) => NodeData::Text(value),
            Self::Comment(value) => NodeData::Comment(value),
            Self::Declaration(attrs) => NodeData::Declaration(DeclarationData { attrs }),
        }
    }
}
