//! Indented text rendering of a subtree, for debugging.

use std::fmt::Write;

use crate::node::{AttributesMap, NodeData, NodeId};
use crate::tree::DomTree;

/// Print a subtree to stdout.
pub fn print_tree(tree: &DomTree, id: NodeId) {
    print!("{}", format_tree(tree, id));
}

/// Render a subtree, one node per line, two spaces per level.
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, 0, &mut out);
    out
}

fn write_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let prefix = "  ".repeat(indent);
    let _ = match node.data() {
        NodeData::Document => writeln!(out, "{prefix}Document"),
        NodeData::Element(data) => {
            if data.attrs.is_empty() {
                writeln!(out, "{prefix}<{}>", data.tag_name())
            } else {
                writeln!(
                    out,
                    "{prefix}<{} {}>",
                    data.tag_name(),
                    format_attributes(&data.attrs)
                )
            }
        }
        NodeData::Text(value) => {
            let display = value.replace('\n', "\\n").replace(' ', "\u{00B7}");
            writeln!(out, "{prefix}\"{display}\"")
        }
        NodeData::Comment(value) => {
            writeln!(out, "{prefix}<!-- {} -->", value.as_deref().unwrap_or(""))
        }
        NodeData::Declaration(data) => {
            if data.attrs.is_empty() {
                writeln!(out, "{prefix}<?xml?>")
            } else {
                writeln!(out, "{prefix}<?xml {}?>", format_attributes(&data.attrs))
            }
        }
    };
    for &child_id in tree.children(id) {
        write_node(tree, child_id, indent + 1, out);
    }
}

fn format_attributes(attrs: &AttributesMap) -> String {
    attrs
        .iter()
        .map(|(k, v)| {
            if v.is_empty() {
                k.clone()
            } else {
                format!("{k}=\"{v}\"")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
