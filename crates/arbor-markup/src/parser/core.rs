use super::error::StructureError;
use super::node::{MarkupChild, MarkupNode};
use crate::tokenizer::{Token, tokenize};

/// Stack-based tree builder over a token stream.
///
/// Open tags push a node; a matching close tag pops it and attaches it to
/// the new top of the stack, or records it as the root when the stack is
/// empty. Content is appended to the innermost open node.
pub struct MarkupParser {
    tokens: Vec<Token>,
    stack: Vec<MarkupNode>,
    root: Option<MarkupNode>,
}

impl MarkupParser {
    /// Create a parser over `tokens`.
    #[must_use]
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            stack: Vec::new(),
            root: None,
        }
    }

    /// Run the parser to completion.
    ///
    /// On success the result holds exactly one root.
    ///
    /// # Errors
    ///
    /// The first [`StructureError`] met, in token order. An unclosed tag is
    /// reported at end of input and names the innermost open tag; an empty
    /// stream is [`StructureError::NoRoot`].
    pub fn run(mut self) -> Result<Vec<MarkupNode>, StructureError> {
        let tokens = std::mem::take(&mut self.tokens);
        for token in tokens {
            match token {
                Token::OpenTag { name, attributes } => self.stack.push(MarkupNode {
                    name,
                    attributes,
                    children: Vec::new(),
                }),
                Token::CloseTag { name } => self.close(name)?,
                Token::Content { text } => self.content(text)?,
            }
        }

        if let Some(open) = self.stack.pop() {
            return Err(StructureError::Unclosed { name: open.name });
        }
        self.root.map(|root| vec![root]).ok_or(StructureError::NoRoot)
    }

    fn close(&mut self, name: String) -> Result<(), StructureError> {
        let Some(node) = self.stack.pop() else {
            return Err(StructureError::UnexpectedClose { name });
        };
        if node.name != name {
            return Err(StructureError::MismatchedClose {
                open: node.name,
                close: name,
            });
        }

        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(MarkupChild::Node(node));
        } else if self.root.is_some() {
            return Err(StructureError::MultipleRoots);
        } else {
            self.root = Some(node);
        }
        Ok(())
    }

    fn content(&mut self, text: String) -> Result<(), StructureError> {
        match self.stack.last_mut() {
            Some(parent) => {
                parent.children.push(MarkupChild::Text(text));
                Ok(())
            }
            None => Err(StructureError::ContentOutsideRoot { text }),
        }
    }
}

/// Parse a token stream in one call.
///
/// # Errors
///
/// See [`MarkupParser::run`].
pub fn parse(tokens: Vec<Token>) -> Result<Vec<MarkupNode>, StructureError> {
    MarkupParser::new(tokens).run()
}

/// Tokenize and parse `input`.
///
/// # Errors
///
/// See [`MarkupParser::run`].
pub fn parse_str(input: &str) -> Result<Vec<MarkupNode>, StructureError> {
    parse(tokenize(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclosed_names_innermost() {
        let err = parse(vec![Token::open("outer"), Token::open("inner")]).unwrap_err();
        assert_eq!(err.to_string(), "Unclosed tag: <inner>");
    }

    #[test]
    fn test_adjacent_content_stays_separate() {
        let roots = parse(vec![
            Token::open("p"),
            Token::content("a"),
            Token::content("b"),
            Token::close("p"),
        ])
        .unwrap();
        assert_eq!(roots, vec![MarkupNode::new("p").with_text("a").with_text("b")]);
    }
}
