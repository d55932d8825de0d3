//! Markup tokenizer.
//!
//! Turns raw text into a flat stream of open-tag, close-tag and content
//! tokens in one left-to-right pass.

mod core;
mod token;

pub use self::core::{MarkupTokenizer, TokenizeIssue, tokenize};
pub use token::Token;
