use arbor_common::warning::warn_once;
use arbor_dom::AttributesMap;
use once_cell::sync::Lazy;
use regex::Regex;

use super::token::Token;

/// `name = "value"` or `name = 'value'`, with optional spaces around `=`.
static ATTRIBUTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("attribute pattern is valid")
});

/// Input the tokenizer accepted but had to guess about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeIssue {
    /// What was wrong.
    pub message: String,
    /// Byte offset of the `<` that started the offending tag.
    pub offset: usize,
}

/// Single-pass markup scanner.
///
/// The scanner never fails. Text between tags is trimmed and dropped when
/// empty. A tag missing its `>` runs to the end of the input; that and empty
/// tag names are recorded as [`TokenizeIssue`]s and reported once through
/// the shared warning channel.
pub struct MarkupTokenizer {
    input: String,
    pos: usize,
    token_stream: Vec<Token>,
    issues: Vec<TokenizeIssue>,
}

impl MarkupTokenizer {
    /// Create a tokenizer positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: String) -> Self {
        Self {
            input,
            pos: 0,
            token_stream: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Run the tokenizer to completion.
    pub fn run(&mut self) {
        while self.pos < self.input.len() {
            let rest = &self.input[self.pos..];
            if rest.starts_with("</") {
                self.consume_close_tag();
            } else if rest.starts_with('<') {
                self.consume_open_tag();
            } else {
                self.consume_content();
            }
        }
    }

    /// Issues recorded so far.
    #[must_use]
    pub fn issues(&self) -> &[TokenizeIssue] {
        &self.issues
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after `run()`.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    fn consume_close_tag(&mut self) {
        let start = self.pos;
        let (end, _) = self.tag_end();
        let name = self.input[start + 2..end].trim().to_string();
        if name.is_empty() {
            self.record_issue(start, "empty close tag name");
        }
        self.token_stream.push(Token::CloseTag { name });
    }

    fn consume_open_tag(&mut self) {
        let start = self.pos;
        let (end, terminated) = self.tag_end();
        let mut body = &self.input[start + 1..end];
        let self_closing = terminated && body.ends_with('/');
        if self_closing {
            body = &body[..body.len() - 1];
        }

        let body = body.trim();
        let (name, rest) = body
            .split_once(char::is_whitespace)
            .unwrap_or((body, ""));
        let name = name.to_string();
        let attributes = parse_attributes(rest);

        if name.is_empty() {
            self.record_issue(start, "empty tag name");
        }
        self.token_stream.push(Token::OpenTag {
            name: name.clone(),
            attributes,
        });
        if self_closing {
            self.token_stream.push(Token::CloseTag { name });
        }
    }

    fn consume_content(&mut self) {
        let rest = &self.input[self.pos..];
        let len = rest.find('<').unwrap_or(rest.len());
        let text = rest[..len].trim();
        if !text.is_empty() {
            self.token_stream.push(Token::Content {
                text: text.to_string(),
            });
        }
        self.pos += len;
    }

    /// Find the `>` closing the tag at `self.pos` and step past it.
    ///
    /// Returns the index of the `>` (or the end of input when there is
    /// none) and whether a `>` was found.
    fn tag_end(&mut self) -> (usize, bool) {
        if let Some(offset) = self.input[self.pos..].find('>') {
            let end = self.pos + offset;
            self.pos = end + 1;
            (end, true)
        } else {
            let start = self.pos;
            self.pos = self.input.len();
            self.record_issue(start, "unterminated tag");
            (self.input.len(), false)
        }
    }

    fn record_issue(&mut self, offset: usize, message: &str) {
        let _first = warn_once("Tokenizer", &format!("{message} at byte {offset}"));
        self.issues.push(TokenizeIssue {
            message: message.to_string(),
            offset,
        });
    }
}

/// Collect `name="value"` pairs from the part of a tag after its name.
fn parse_attributes(source: &str) -> AttributesMap {
    let mut attributes = AttributesMap::new();
    for caps in ATTRIBUTE_RE.captures_iter(source) {
        let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
        let _previous = attributes.insert(caps[1].to_string(), value.to_string());
    }
    attributes
}

/// Tokenize `input` in one call.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = MarkupTokenizer::new(input.to_string());
    tokenizer.run();
    tokenizer.into_tokens()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attributes_quotes() {
        let attrs = parse_attributes(r#"a="1" b = '2' c="x y""#);
        assert_eq!(attrs.get("a").map(String::as_str), Some("1"));
        assert_eq!(attrs.get("b").map(String::as_str), Some("2"));
        assert_eq!(attrs.get("c").map(String::as_str), Some("x y"));
    }

    #[test]
    fn test_parse_attributes_ignores_bare_words() {
        let attrs = parse_attributes("checked disabled=yes id=\"k\"");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("id").map(String::as_str), Some("k"));
    }

    #[test]
    fn test_unterminated_tag_is_recorded() {
        arbor_common::warning::set_enabled(false);
        let mut tokenizer = MarkupTokenizer::new("<a>text<b x=\"1\"".to_string());
        tokenizer.run();
        assert_eq!(
            tokenizer.issues(),
            &[TokenizeIssue {
                message: "unterminated tag".to_string(),
                offset: 7,
            }]
        );
        let tokens = tokenizer.into_tokens();
        assert_eq!(
            tokens,
            vec![
                Token::open("a"),
                Token::content("text"),
                Token::open("b").with_attribute("x", "1"),
            ]
        );
    }
}
