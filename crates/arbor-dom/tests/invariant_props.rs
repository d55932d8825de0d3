//! Property tests: random mutation and clone sequences keep the tree
//! coherent, and a rejected mutation leaves it untouched.

use std::collections::HashSet;

use arbor_dom::{DomTree, NodeId};
use quickcheck_macros::quickcheck;

/// Document, six elements, three text nodes.
fn seed_tree() -> DomTree {
    let mut tree = DomTree::new();
    for tag in ["a", "b", "c", "d", "e", "f"] {
        let _ = tree.create_element(tag);
    }
    for value in ["x", "y", "z"] {
        let _ = tree.create_text(value);
    }
    tree
}

fn pick(tree: &DomTree, raw: u8) -> NodeId {
    // One slot past the end exercises the unknown-node paths.
    NodeId(usize::from(raw) % (tree.len() + 1))
}

fn snapshot(tree: &DomTree) -> Vec<(Option<NodeId>, Vec<NodeId>)> {
    (0..tree.len())
        .map(|i| (tree.parent(NodeId(i)), tree.children(NodeId(i)).to_vec()))
        .collect()
}

/// Nodes created by a shallow clone, whose child lists may alias children
/// owned elsewhere.
type Aliasing = HashSet<NodeId>;

/// Deep clones can double the tree; stop cloning past this size.
const CLONE_LIMIT: usize = 64;

fn coherent(tree: &DomTree, aliasing: &Aliasing) -> bool {
    let mut owned = vec![0usize; tree.len()];
    for i in 0..tree.len() {
        let id = NodeId(i);
        let children = tree.children(id);
        let distinct: HashSet<_> = children.iter().collect();
        if distinct.len() != children.len() {
            return false;
        }
        for &child in children {
            if tree.parent(child) == Some(id) {
                owned[child.0] += 1;
            } else if !aliasing.contains(&id) {
                return false;
            }
        }
        match tree.parent(id) {
            Some(parent) if !tree.contains(parent, id) => return false,
            _ => {}
        }
        // The ancestor chain must end before it could revisit a node.
        if tree.ancestors(id).take(tree.len() + 1).count() > tree.len() {
            return false;
        }
        if tree.ancestors(id).take(tree.len()).any(|ancestor| ancestor == id) {
            return false;
        }
        if reaches_itself(tree, id) {
            return false;
        }
    }
    tree.parent(NodeId::ROOT).is_none() && owned.iter().all(|&count| count <= 1)
}

/// Whether following child lists from `id` leads back to `id`.
fn reaches_itself(tree: &DomTree, id: NodeId) -> bool {
    let mut seen = HashSet::new();
    let mut pending = tree.children(id).to_vec();
    while let Some(current) = pending.pop() {
        if current == id {
            return true;
        }
        if seen.insert(current) {
            pending.extend_from_slice(tree.children(current));
        }
    }
    false
}

fn apply(tree: &mut DomTree, aliasing: &mut Aliasing, op: (u8, u8, u8, u8)) -> bool {
    let (selector, a, b, c) = op;
    let parent = pick(tree, a);
    let child = pick(tree, b);
    match selector % 6 {
        0 => tree.append_child(parent, child).is_ok(),
        1 => tree.remove_child(parent, child).is_ok(),
        2 => {
            let reference = (c % 2 == 0).then(|| pick(tree, c / 2));
            tree.insert_before(parent, child, reference).is_ok()
        }
        3 => {
            let old = pick(tree, c);
            tree.replace_child(parent, child, old).is_ok()
        }
        deep if tree.len() < CLONE_LIMIT => match tree.clone_node(child, deep == 5) {
            Ok(copy) => {
                if deep == 4 {
                    let _ = aliasing.insert(copy);
                }
                true
            }
            Err(_) => false,
        },
        _ => false,
    }
}

#[quickcheck]
fn prop_mutations_keep_tree_coherent(ops: Vec<(u8, u8, u8, u8)>) -> bool {
    let mut tree = seed_tree();
    let mut aliasing = Aliasing::new();
    for op in ops {
        let before = snapshot(&tree);
        let ok = apply(&mut tree, &mut aliasing, op);
        if !ok && snapshot(&tree) != before {
            return false;
        }
        if !coherent(&tree, &aliasing) {
            return false;
        }
    }
    true
}

#[quickcheck]
fn prop_remove_detaches(ops: Vec<(u8, u8, u8, u8)>, target: u8) -> bool {
    let mut tree = seed_tree();
    let mut aliasing = Aliasing::new();
    for op in ops {
        let _ = apply(&mut tree, &mut aliasing, op);
    }
    let child = pick(&tree, target);
    match tree.parent(child) {
        Some(parent) => {
            let siblings: Vec<_> = tree
                .children(parent)
                .iter()
                .copied()
                .filter(|&id| id != child)
                .collect();
            tree.remove_child(parent, child).is_ok()
                && tree.parent(child).is_none()
                && tree.children(parent) == siblings.as_slice()
        }
        None => true,
    }
}
