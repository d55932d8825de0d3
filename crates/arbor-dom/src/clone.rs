//! Node cloning.

use crate::error::{InvalidArgument, Result};
use crate::node::{Node, NodeData, NodeId};
use crate::tree::DomTree;

impl DomTree {
    /// Clone a node into a new, detached node.
    ///
    /// A shallow clone copies the node's own fields. For a container it also
    /// copies the child list as-is: the clone lists the same child handles,
    /// and those children keep their original parent. A deep clone instead
    /// clones every descendant and attaches each copy to its cloned parent.
    /// Leaf kinds ignore `deep`. Attribute maps are always copied.
    ///
    /// Cloning a document yields a document that owns itself; on a deep clone
    /// the copied descendants are owned by the new document.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument::NullNode`] if `id` is not live.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> Result<NodeId> {
        let source = self.get(id).ok_or(InvalidArgument::NullNode)?;
        let children = if deep {
            Vec::new()
        } else {
            source.children.clone()
        };
        let copy = Node {
            children,
            ..self.detached_copy(id)
        };
        let new_id = self.push(copy);

        let (old_document, new_document) = if matches!(self.nodes[id.0].data, NodeData::Document)
        {
            self.nodes[new_id.0].root_document = Some(new_id);
            (Some(id), Some(new_id))
        } else {
            (None, None)
        };

        if deep {
            // Explicit work list: deep trees must not exhaust the call stack.
            let mut pending = vec![(id, new_id)];
            while let Some((source, target)) = pending.pop() {
                let source_children = self.nodes[source.0].children.clone();
                for child in source_children {
                    let mut copy = self.detached_copy(child);
                    copy.parent = Some(target);
                    if old_document.is_some() && copy.root_document == old_document {
                        copy.root_document = new_document;
                    }
                    let child_copy = self.push(copy);
                    self.nodes[target.0].children.push(child_copy);
                    pending.push((child, child_copy));
                }
            }
        }

        Ok(new_id)
    }

    /// Copy of a node's own fields with no parent and no children.
    fn detached_copy(&self, id: NodeId) -> Node {
        let node = &self.nodes[id.0];
        Node::new(
            node.data.clone(),
            node.namespace_uri.clone(),
            node.root_document,
        )
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }
}
