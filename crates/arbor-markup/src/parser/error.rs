use thiserror::Error;

/// Why a token stream does not form a single well-nested tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// A close tag arrived with no open tag to match.
    #[error("Unexpected close tag: </{name}>")]
    UnexpectedClose {
        /// Name on the close tag.
        name: String,
    },

    /// A close tag did not match the innermost open tag.
    #[error("Mismatched closing tag: </{open}> but got </{close}>")]
    MismatchedClose {
        /// Name of the innermost open tag.
        open: String,
        /// Name on the close tag.
        close: String,
    },

    /// A second top-level element was closed.
    #[error("Multiple root elements are not allowed")]
    MultipleRoots,

    /// Text appeared while no element was open.
    #[error("Content \"{text}\" found outside of a root element")]
    ContentOutsideRoot {
        /// The stray text.
        text: String,
    },

    /// Input ended with an element still open.
    #[error("Unclosed tag: <{name}>")]
    Unclosed {
        /// Innermost open tag.
        name: String,
    },

    /// Input held no element at all.
    #[error("No root element found")]
    NoRoot,
}
