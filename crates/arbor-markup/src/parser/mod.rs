//! Stack-based markup parser.
//!
//! Consumes the tokenizer's output and produces a single generic tree of
//! [`MarkupNode`]s, rejecting streams that do not nest properly.

mod core;
mod error;
mod node;

pub use self::core::{MarkupParser, parse, parse_str};
pub use error::StructureError;
pub use node::{MarkupChild, MarkupNode};
