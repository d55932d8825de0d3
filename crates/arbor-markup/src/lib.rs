//! Markup tokenizer and parser for Arbor.
//!
//! # Scope
//!
//! - **Tokenizer**: one pass over the input producing open-tag, close-tag and
//!   content tokens. Attributes are `name="value"` or `name='value'`;
//!   `<name/>` yields an open and a close token.
//! - **Parser**: stack-based nesting check producing exactly one root
//!   [`MarkupNode`], or a [`StructureError`].
//! - **Builder**: turns parser output into nodes of an [`arbor_dom::DomTree`].
//!
//! # Not Implemented
//!
//! - Comments, processing instructions and CDATA sections
//! - Entity and character references
//! - Namespace resolution
//! - Streaming input

mod builder;
/// Stack-based parser producing generic markup nodes.
pub mod parser;
/// Markup tokenizer.
pub mod tokenizer;

pub use builder::{append_markup, build_document, build_document_with};
pub use parser::{MarkupChild, MarkupNode, MarkupParser, StructureError, parse, parse_str};
pub use tokenizer::{MarkupTokenizer, Token, TokenizeIssue, tokenize};
