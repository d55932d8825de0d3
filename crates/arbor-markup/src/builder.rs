//! Convert parsed markup into DOM nodes.
//!
//! Elements become [`NodeInit::Element`]s and text runs become text nodes.
//! Every node is attached through the tree's own mutation methods, so the
//! tree's placement policy applies to built documents too.

use arbor_dom::{DomConfig, DomError, DomTree, Node, NodeId, NodeInit, NodeOptions};

use crate::parser::{MarkupChild, MarkupNode};

/// Build a fresh document holding `roots` as its children.
///
/// # Errors
///
/// Any [`DomError`] raised while attaching a node.
pub fn build_document(roots: &[MarkupNode]) -> Result<DomTree, DomError> {
    build_document_with(DomConfig::default(), roots)
}

/// [`build_document`] with explicit tree settings.
///
/// # Errors
///
/// Any [`DomError`] raised while attaching a node, including placement
/// errors from `config`.
pub fn build_document_with(config: DomConfig, roots: &[MarkupNode]) -> Result<DomTree, DomError> {
    let mut tree = DomTree::with_config(config);
    let document = tree.root();
    for root in roots {
        let _element = append_markup(&mut tree, document, root)?;
    }
    Ok(tree)
}

/// Append `node` and its whole subtree under `parent`. Returns the element
/// created for `node`.
///
/// Nodes are stamped with `parent`'s root document when it has one.
///
/// # Errors
///
/// Any [`DomError`] raised while attaching a node. Nodes attached before the
/// failure stay attached.
pub fn append_markup(
    tree: &mut DomTree,
    parent: NodeId,
    node: &MarkupNode,
) -> Result<NodeId, DomError> {
    let top = create_child(tree, parent, element_init(node))?;

    // Children are created in order when their parent is visited, so the
    // pending stack only decides which subtree is filled next.
    let mut pending = vec![(node, top)];
    while let Some((source, target)) = pending.pop() {
        for child in &source.children {
            match child {
                MarkupChild::Node(element) => {
                    let id = create_child(tree, target, element_init(element))?;
                    pending.push((element, id));
                }
                MarkupChild::Text(text) => {
                    let _text = create_child(tree, target, NodeInit::text(text.as_str()))?;
                }
            }
        }
    }
    Ok(top)
}

fn element_init(node: &MarkupNode) -> NodeInit {
    NodeInit::Element {
        tag_name: node.name.clone(),
        attributes: node.attributes.clone(),
    }
}

fn create_child(tree: &mut DomTree, parent: NodeId, init: NodeInit) -> Result<NodeId, DomError> {
    let options = NodeOptions::new().parent(parent);
    match tree.get(parent).and_then(Node::root_document) {
        Some(document) => tree.create_node(document, init, options),
        None => tree.create(init, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_dom::NodeKind;

    #[test]
    fn test_append_markup_keeps_order() {
        let markup = MarkupNode::new("say")
            .with_text("hello")
            .with_child(MarkupNode::new("b").with_text("world"))
            .with_text("!");
        let tree = build_document(&[markup]).unwrap();

        let say = tree.document_element(tree.root()).unwrap();
        let kinds: Vec<_> = tree
            .children(say)
            .iter()
            .filter_map(|&id| tree.kind(id))
            .collect();
        assert_eq!(kinds, vec![NodeKind::Text, NodeKind::Element, NodeKind::Text]);
        assert_eq!(tree.text_content(say), "helloworld!");
    }
}
