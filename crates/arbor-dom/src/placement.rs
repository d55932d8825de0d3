//! Placement rules: which kinds may be inserted where.
//!
//! The mutation engine consults the tree's [`PlacementPolicy`] after the
//! node-kind guards and before the ancestry guard. One rule is not
//! configurable: a document is never inserted as a child.

use std::fmt;

use serde::Deserialize;

use crate::error::HierarchyError;
use crate::node::{NodeId, NodeKind};
use crate::tree::DomTree;

/// A custom placement rule.
pub type PlacementRule = fn(&DomTree, &Placement) -> Result<(), HierarchyError>;

/// A pending insertion, as seen by a placement rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// The container receiving the node.
    pub parent: NodeId,
    /// The node being inserted.
    pub child: NodeId,
    /// The sibling the node will precede, or `None` to append.
    pub before: Option<NodeId>,
    /// The child being replaced, for `replace_child`.
    pub replacing: Option<NodeId>,
}

impl Placement {
    /// The parent's children as they will be around the inserted node:
    /// `child` and `replacing` are excluded.
    #[must_use]
    pub fn siblings(&self, tree: &DomTree) -> Vec<NodeId> {
        tree.children(self.parent)
            .iter()
            .copied()
            .filter(|&id| id != self.child && Some(id) != self.replacing)
            .collect()
    }

    /// Index the node will occupy within [`siblings`](Self::siblings).
    #[must_use]
    pub fn position(&self, siblings: &[NodeId]) -> usize {
        self.before
            .and_then(|before| siblings.iter().position(|&id| id == before))
            .unwrap_or(siblings.len())
    }
}

/// Which node kinds a container accepts, and in what order.
#[derive(Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementPolicy {
    /// No restrictions beyond the fixed document rule.
    #[default]
    Permissive,
    /// Documents accept only elements, comments and declarations; at most
    /// one element and one declaration, and the declaration comes first.
    DocumentRules,
    /// Caller-supplied rule.
    #[serde(skip)]
    Custom(PlacementRule),
}

impl fmt::Debug for PlacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permissive => f.write_str("Permissive"),
            Self::DocumentRules => f.write_str("DocumentRules"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PlacementPolicy {
    /// Check a pending insertion against this policy.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::Placement`] (or whatever a custom rule
    /// returns) when the insertion is not allowed.
    pub fn check(&self, tree: &DomTree, placement: &Placement) -> Result<(), HierarchyError> {
        match self {
            Self::Permissive => Ok(()),
            Self::DocumentRules => document_rules(tree, placement),
            Self::Custom(rule) => rule(tree, placement),
        }
    }
}

/// Tree-wide settings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DomConfig {
    /// Placement policy applied by every insertion.
    pub placement: PlacementPolicy,
}

const DOCUMENT_CHILD_KINDS: &str =
    "Only Element, Comment and Declaration nodes can be children of a document.";
const ONE_ELEMENT: &str = "A document can have only one document element.";
const ONE_DECLARATION: &str = "A document can have only one declaration.";
const DECLARATION_FIRST: &str = "The declaration must be the first child of a document.";

fn document_rules(tree: &DomTree, placement: &Placement) -> Result<(), HierarchyError> {
    if tree.kind(placement.parent) != Some(NodeKind::Document) {
        return Ok(());
    }

    let siblings = placement.siblings(tree);
    let position = placement.position(&siblings);
    let has_kind = |kind| siblings.iter().any(|&id| tree.kind(id) == Some(kind));
    let displaces_declaration = position == 0
        && siblings
            .first()
            .is_some_and(|&first| tree.kind(first) == Some(NodeKind::Declaration));

    let violation = match tree.kind(placement.child) {
        Some(NodeKind::Element) if has_kind(NodeKind::Element) => Some(ONE_ELEMENT),
        Some(NodeKind::Element | NodeKind::Comment) if displaces_declaration => {
            Some(DECLARATION_FIRST)
        }
        Some(NodeKind::Element | NodeKind::Comment) => None,
        Some(NodeKind::Declaration) if has_kind(NodeKind::Declaration) => Some(ONE_DECLARATION),
        Some(NodeKind::Declaration) if position != 0 => Some(DECLARATION_FIRST),
        Some(NodeKind::Declaration) => None,
        Some(NodeKind::Text | NodeKind::Document) | None => Some(DOCUMENT_CHILD_KINDS),
    };

    violation.map_or(Ok(()), |message| {
        Err(HierarchyError::Placement(message.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_toml() {
        let config: DomConfig = toml::from_str("placement = \"document-rules\"").unwrap();
        assert!(matches!(config.placement, PlacementPolicy::DocumentRules));

        let config: DomConfig = toml::from_str("").unwrap();
        assert!(matches!(config.placement, PlacementPolicy::Permissive));
    }

    #[test]
    fn test_config_rejects_unknown_policy() {
        assert!(toml::from_str::<DomConfig>("placement = \"custom\"").is_err());
        assert!(toml::from_str::<DomConfig>("placement = \"strict\"").is_err());
    }

    #[test]
    fn test_position_skips_moving_node() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        let b = tree.create_element("b");
        let c = tree.create_element("c");
        for id in [a, b, c] {
            let _ = tree.append_child(NodeId::ROOT, id).unwrap();
        }

        let placement = Placement {
            parent: NodeId::ROOT,
            child: a,
            before: Some(c),
            replacing: None,
        };
        let siblings = placement.siblings(&tree);
        assert_eq!(siblings, vec![b, c]);
        assert_eq!(placement.position(&siblings), 1);
    }
}
