//! Errors raised by node construction and mutation.
//!
//! Display strings are part of the public contract: callers match on them.

use thiserror::Error;

use crate::node::NodeKind;

/// A requested mutation would violate a structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// The target is not a live node with the container capability.
    #[error("HierarchyRequestError: The parent node is not a valid parent.")]
    InvalidParent,

    /// The node to insert is not a live node of this tree.
    #[error("HierarchyRequestError: The node is not an instance of Node.")]
    NotANode,

    /// Inserting the node would make it its own ancestor.
    #[error("HierarchyRequestError: The new child is an ancestor of the parent.")]
    AncestorCycle,

    /// The node to remove or replace is not a child of the container.
    #[error("HierarchyRequestError: The parent does not contain the child.")]
    NotAChild,

    /// Documents are always roots.
    #[error("HierarchyRequestError: Documents cannot be inserted as a child.")]
    DocumentAsChild,

    /// Rejected by the configured [`PlacementPolicy`](crate::PlacementPolicy).
    #[error("HierarchyRequestError: {0}")]
    Placement(String),

    /// `insert_before` reference node is not a child of a document.
    #[error("{kind} does not exist in document")]
    NotFoundInDocument {
        /// Kind of the missing reference node.
        kind: NodeKind,
    },

    /// `insert_before` reference node is not a child of an element.
    #[error("{kind} is not exist in <{tag_name}>")]
    NotFoundInElement {
        /// Kind of the missing reference node.
        kind: NodeKind,
        /// Tag name of the element that was searched.
        tag_name: String,
    },
}

/// An argument was absent or of the wrong shape for the operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    /// A required node handle does not refer to a live node.
    #[error("The node is null.")]
    NullNode,

    /// A value was assigned to a node kind that carries no value.
    #[error("Unexpected value type: {kind} has no node value")]
    UnexpectedValueType {
        /// Kind of the node that was assigned to.
        kind: NodeKind,
    },

    /// The node passed as an owning document is not a document.
    #[error("Unexpected node type: {kind} is not a Document")]
    NotADocument {
        /// Kind of the node that was passed.
        kind: NodeKind,
    },
}

/// Any error returned by [`DomTree`](crate::DomTree) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// Structural violation.
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    /// Bad argument.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}

impl DomError {
    /// The hierarchy error, if this is one.
    #[must_use]
    pub const fn as_hierarchy(&self) -> Option<&HierarchyError> {
        match self {
            Self::Hierarchy(err) => Some(err),
            Self::InvalidArgument(_) => None,
        }
    }
}

/// Result alias for tree operations.
pub type Result<T, E = DomError> = std::result::Result<T, E>;
