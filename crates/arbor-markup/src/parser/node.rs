use arbor_dom::AttributesMap;
use serde::Serialize;

/// A parsed element: name, attributes and ordered children.
///
/// Serializes as `{"name", "attributes", "children"}` with text children
/// inlined as plain strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkupNode {
    /// Tag name.
    pub name: String,
    /// Attributes from the open tag.
    pub attributes: AttributesMap,
    /// Child elements and text runs, in document order.
    pub children: Vec<MarkupChild>,
}

/// One entry in a [`MarkupNode`]'s children.
///
/// Adjacent text runs stay separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MarkupChild {
    /// A nested element.
    Node(MarkupNode),
    /// A run of text.
    Text(String),
}

impl MarkupNode {
    /// Element with no attributes or children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder: add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _previous = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder: append a child element.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(MarkupChild::Node(child));
        self
    }

    /// Builder: append a text run.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(MarkupChild::Text(text.into()));
        self
    }

    /// Child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            MarkupChild::Node(node) => Some(node),
            MarkupChild::Text(_) => None,
        })
    }
}
