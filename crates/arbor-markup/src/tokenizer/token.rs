use core::fmt;

use arbor_dom::AttributesMap;
use serde::Serialize;

/// A token produced by the markup tokenizer.
///
/// Serializes as `{"type": "open" | "close" | "content", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Token {
    /// `<name attr="value">`, or the first half of `<name/>`.
    #[serde(rename = "open")]
    OpenTag {
        /// Tag name, everything up to the first whitespace.
        name: String,
        /// Parsed `name="value"` pairs. Later duplicates win.
        attributes: AttributesMap,
    },

    /// `</name>`, or the second half of `<name/>`.
    #[serde(rename = "close")]
    CloseTag {
        /// Tag name, trimmed.
        name: String,
    },

    /// Trimmed, non-empty text between tags.
    Content {
        /// The text.
        text: String,
    },
}

impl Token {
    /// Open tag with no attributes.
    #[must_use]
    pub fn open(name: impl Into<String>) -> Self {
        Self::OpenTag {
            name: name.into(),
            attributes: AttributesMap::new(),
        }
    }

    /// Close tag.
    #[must_use]
    pub fn close(name: impl Into<String>) -> Self {
        Self::CloseTag { name: name.into() }
    }

    /// Content token.
    #[must_use]
    pub fn content(text: impl Into<String>) -> Self {
        Self::Content { text: text.into() }
    }

    /// Add an attribute to an open tag. Other tokens are returned unchanged.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::OpenTag { attributes, .. } = &mut self {
            let _previous = attributes.insert(name.into(), value.into());
        }
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenTag { name, attributes } => {
                write!(f, "<{name}")?;
                for (key, value) in attributes {
                    write!(f, " {key}=\"{value}\"")?;
                }
                write!(f, ">")
            }
            Self::CloseTag { name } => write!(f, "</{name}>"),
            Self::Content { text } => write!(f, "{text:?}"),
        }
    }
}
