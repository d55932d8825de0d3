//! Guarded child mutation: append, remove, insert-before and replace.
//!
//! Guards run in a fixed order, and all of them run before anything is
//! touched, so a failed call leaves the tree unchanged:
//!
//! 1. container guard (`parent` is a live Document or Element)
//! 2. node guard (the node to insert is live)
//! 3. reference lookup (`insert_before` only)
//! 4. placement guard (never a document as child, then the tree's policy)
//! 5. ancestry guard (the node is not `parent` or one of its ancestors)
//!
//! A node that already has a parent is detached from it before insertion:
//! insertion moves, it never copies.

use std::collections::HashSet;

use crate::error::{HierarchyError, InvalidArgument, Result};
use crate::node::{NodeId, NodeKind};
use crate::placement::Placement;
use crate::tree::DomTree;

impl DomTree {
    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first. Returns `child`.
    ///
    /// # Errors
    ///
    /// A [`HierarchyError`] if `parent` is not a container, `child` is not a
    /// live node, the placement policy rejects it, or `child` is `parent` or
    /// one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.guard_parent(parent)?;
        self.guard_node(child)?;
        self.guard_placement(&Placement {
            parent,
            child,
            before: None,
            replacing: None,
        })?;
        self.guard_ancestry(parent, child)?;

        self.release(parent, child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(child)
    }

    /// Remove `child` from `parent`. The survivors keep their order and
    /// `child` is left detached.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument::NullNode`] if `child` is not live, then
    /// [`HierarchyError::InvalidParent`] or [`HierarchyError::NotAChild`].
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.is_live(child) {
            return Err(InvalidArgument::NullNode.into());
        }
        self.guard_parent(parent)?;
        if !self.contains(parent, child) {
            return Err(HierarchyError::NotAChild.into());
        }

        self.unlink(parent, child);
        Ok(())
    }

    /// Insert `new_node` immediately before `reference` in `parent`'s
    /// children. With no reference this is [`append_child`](Self::append_child).
    ///
    /// # Errors
    ///
    /// The same errors as `append_child`, plus a not-found error naming the
    /// reference's kind when `reference` is not a child of `parent`:
    /// `"<Kind> does not exist in document"` for documents and
    /// `"<Kind> is not exist in <tag>"` for elements.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<NodeId> {
        let Some(reference) = reference else {
            return self.append_child(parent, new_node);
        };

        self.guard_parent(parent)?;
        self.guard_node(new_node)?;
        if !self.contains(parent, reference) {
            return Err(self.not_found(parent, reference));
        }
        self.guard_placement(&Placement {
            parent,
            child: new_node,
            before: Some(reference),
            replacing: None,
        })?;
        self.guard_ancestry(parent, new_node)?;

        if new_node == reference {
            return Ok(new_node);
        }

        self.release(parent, new_node);
        let index = self
            .index_of(parent, reference)
            .unwrap_or(self.nodes[parent.0].children.len());
        self.nodes[parent.0].children.insert(index, new_node);
        self.nodes[new_node.0].parent = Some(parent);
        Ok(new_node)
    }

    /// Put `new_child` where `old_child` is and detach `old_child`.
    /// Returns `old_child`.
    ///
    /// This behaves as removing `old_child` and inserting `new_child` before
    /// its former next sibling, with every guard checked up front.
    ///
    /// # Errors
    ///
    /// The same errors as `append_child`, or [`HierarchyError::NotAChild`]
    /// if `old_child` is not a child of `parent`.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> Result<NodeId> {
        self.guard_parent(parent)?;
        self.guard_node(new_child)?;
        if !self.contains(parent, old_child) {
            return Err(HierarchyError::NotAChild.into());
        }
        if new_child == old_child {
            return Ok(old_child);
        }

        let before = self
            .children(parent)
            .iter()
            .skip_while(|&&id| id != old_child)
            .skip(1)
            .find(|&&id| id != new_child)
            .copied();
        self.guard_placement(&Placement {
            parent,
            child: new_child,
            before,
            replacing: Some(old_child),
        })?;
        self.guard_ancestry(parent, new_child)?;

        self.release(parent, new_child);
        if let Some(index) = self.index_of(parent, old_child) {
            self.nodes[parent.0].children[index] = new_child;
        }
        self.nodes[new_child.0].parent = Some(parent);
        if self.nodes[old_child.0].parent == Some(parent) {
            self.nodes[old_child.0].parent = None;
        }
        Ok(old_child)
    }

    // =========================================================================
    // Guards
    // =========================================================================

    fn guard_parent(&self, parent: NodeId) -> Result<(), HierarchyError> {
        match self.kind(parent) {
            Some(kind) if kind.is_container() => Ok(()),
            _ => Err(HierarchyError::InvalidParent),
        }
    }

    fn guard_node(&self, node: NodeId) -> Result<(), HierarchyError> {
        if self.is_live(node) {
            Ok(())
        } else {
            Err(HierarchyError::NotANode)
        }
    }

    fn guard_placement(&self, placement: &Placement) -> Result<(), HierarchyError> {
        if self.kind(placement.child) == Some(NodeKind::Document) {
            return Err(HierarchyError::DocumentAsChild);
        }
        self.config.placement.check(self, placement)
    }

    fn guard_ancestry(&self, parent: NodeId, child: NodeId) -> Result<(), HierarchyError> {
        if parent == child || self.is_descendant_of(parent, child) {
            return Err(HierarchyError::AncestorCycle);
        }
        // Shallow clones share child handles, so the parent chain alone does
        // not see every path from `child` down to `parent`.
        if self.reaches(child, parent) {
            return Err(HierarchyError::AncestorCycle);
        }
        Ok(())
    }

    /// Whether `target` can be reached from `from` by following child lists.
    fn reaches(&self, from: NodeId, target: NodeId) -> bool {
        let mut seen = HashSet::new();
        let mut pending = self.children(from).to_vec();
        while let Some(id) = pending.pop() {
            if id == target {
                return true;
            }
            if seen.insert(id) {
                pending.extend_from_slice(self.children(id));
            }
        }
        false
    }

    // =========================================================================
    // Unchecked helpers
    // =========================================================================

    /// Remove `child` from its current parent's list, if it has one.
    fn detach(&mut self, child: NodeId) {
        if let Some(old_parent) = self.nodes[child.0].parent {
            self.unlink(old_parent, child);
        }
    }

    /// Detach `child`, and drop any entry for it in `target`'s list.
    ///
    /// A shallow clone can list a child whose parent is elsewhere, so
    /// detaching alone would leave that entry behind as a duplicate.
    fn release(&mut self, target: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[target.0].children.retain(|&id| id != child);
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.retain(|&id| id != child);
        if self.nodes[child.0].parent == Some(parent) {
            self.nodes[child.0].parent = None;
        }
    }
}
