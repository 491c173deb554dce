//! Lexer trait and the content-type dispatch table

use crate::error::FormatError;
use crate::highlight::json::JsonLexer;
use crate::highlight::plain::PlainLexer;
use crate::highlight::syntax::ScopeLexer;
use crate::highlight::token::TokenStream;

/// A content-specific tokenizer
pub trait Lexer: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Rewrite the body before tokenizing (pretty-printing, etc.)
    fn prepare(&self, body: String) -> Result<String, FormatError> {
        Ok(body)
    }

    /// Start a single-pass tokenization of `text`
    fn tokenise<'a>(&self, text: &'a str) -> TokenStream<'a>;
}

/// Predicate over a lowercased `Content-Type` value
pub type ContentTypeMatcher = fn(&str) -> bool;

struct Entry {
    matcher: ContentTypeMatcher,
    lexer: Box<dyn Lexer>,
}

/// Ordered (predicate, lexer) table; the first matching entry wins
pub struct LexerRegistry {
    entries: Vec<Entry>,
    fallback: Box<dyn Lexer>,
}

impl LexerRegistry {
    /// Empty table that always answers with `fallback`
    pub fn new(fallback: impl Lexer + 'static) -> Self {
        LexerRegistry {
            entries: Vec::new(),
            fallback: Box::new(fallback),
        }
    }

    /// Append an entry with lower priority than every existing one
    pub fn with(mut self, matcher: ContentTypeMatcher, lexer: impl Lexer + 'static) -> Self {
        self.entries.push(Entry {
            matcher,
            lexer: Box::new(lexer),
        });
        self
    }

    pub fn select(&self, content_type: &str) -> &dyn Lexer {
        let content_type = content_type.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|entry| (entry.matcher)(&content_type))
            .map(|entry| entry.lexer.as_ref())
            .unwrap_or_else(|| self.fallback.as_ref())
    }
}

impl Default for LexerRegistry {
    fn default() -> Self {
        LexerRegistry::new(PlainLexer)
            .with(is_json, JsonLexer::new())
            .with(is_xml, ScopeLexer::new("xml", "xml"))
            .with(is_html, ScopeLexer::new("html", "html"))
    }
}

pub fn is_json(content_type: &str) -> bool {
    content_type.contains("application/json")
}

pub fn is_xml(content_type: &str) -> bool {
    content_type.contains("application/xml") || content_type.contains("text/xml")
}

pub fn is_html(content_type: &str) -> bool {
    content_type.contains("text/html")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(content_type: &str) -> &'static str {
        LexerRegistry::default().select(content_type).name()
    }

    #[test]
    fn test_dispatch_table() {
        assert_eq!(selected("application/json; charset=utf-8"), "json");
        assert_eq!(selected("application/xml"), "xml");
        assert_eq!(selected("text/xml; charset=iso-8859-1"), "xml");
        assert_eq!(selected("text/html; charset=utf-8"), "html");
        assert_eq!(selected("application/octet-stream"), "plain");
        assert_eq!(selected(""), "plain");
    }

    #[test]
    fn test_priority_order() {
        // A value naming several types resolves to the earliest table entry
        assert_eq!(selected("text/html, application/json"), "json");
        assert_eq!(selected("text/html; profile=text/xml"), "xml");
    }

    #[test]
    fn test_matching_ignores_case() {
        assert_eq!(selected("Application/JSON"), "json");
    }

    #[test]
    fn test_custom_table() {
        let registry = LexerRegistry::new(PlainLexer).with(|ct| ct.contains("+json"), JsonLexer::new());
        assert_eq!(registry.select("application/problem+json").name(), "json");
        assert_eq!(registry.select("application/json").name(), "plain");
    }
}
