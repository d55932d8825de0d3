//! Node tree implementation for Arbor.
//!
//! This crate provides an arena-based node tree with five node kinds
//! (Document, Element, Text, Comment, Declaration) and guarded structural
//! mutation.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships. A container owns its children through its ordered child
//! list; a child's parent is a non-owning back-reference that only the
//! mutation methods ([`DomTree::append_child`], [`DomTree::remove_child`],
//! [`DomTree::insert_before`], [`DomTree::replace_child`]) write.
//!
//! Tree invariants:
//! - no node is its own ancestor
//! - a node is attached to at most one container
//! - a document never has a parent and is its own root document
//!
//! Every mutation checks its guards before touching anything, so a failed
//! call leaves the tree unchanged.

mod clone;
mod error;
mod mutation;
mod node;
mod options;
mod placement;
mod print;
mod tree;

pub use error::{DomError, HierarchyError, InvalidArgument, Result};
pub use node::{
    AttributeStore, AttributesMap, DeclarationData, ElementData, Node, NodeData, NodeId, NodeKind,
};
pub use options::{NodeInit, NodeOptions};
pub use placement::{DomConfig, Placement, PlacementPolicy, PlacementRule};
pub use print::{format_tree, print_tree};
pub use tree::{AncestorIterator, DomTree};
