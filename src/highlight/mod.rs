//! Response highlighting - content-type dispatch, tokenization and color emission
//!
//! The formatter picks a lexer for the response's `Content-Type`, lets it
//! pretty-print the body if it wants to, and feeds the resulting tokens
//! through a [`TokenColorEmitter`] to produce annotated text.

pub mod annotated;
pub mod emitter;
pub mod json;
pub mod lexer;
pub mod plain;
pub mod syntax;
pub mod theme;
pub mod token;

use std::sync::OnceLock;

pub use annotated::{color_directive_count, parse_annotated, strip_markup, StyledRun};
pub use emitter::{escape, unescape, TokenColorEmitter};
pub use lexer::{Lexer, LexerRegistry};
pub use syntax::ScopeLexer;
pub use theme::StyleTheme;
pub use token::{Token, TokenStream};

use crate::constants::THEME_NAME;
use crate::error::FormatError;

/// Turns raw response bodies into annotated text
pub struct ResponseFormatter {
    registry: LexerRegistry,
    emitter: TokenColorEmitter,
}

impl ResponseFormatter {
    pub fn new(registry: LexerRegistry, theme: StyleTheme) -> Self {
        ResponseFormatter {
            registry,
            emitter: TokenColorEmitter::new(theme),
        }
    }

    pub fn format(&self, body: &[u8], content_type: &str) -> Result<String, FormatError> {
        let lexer = self.registry.select(content_type);
        tracing::debug!(lexer = lexer.name(), content_type, bytes = body.len(), "Formatting response");

        let text = lexer.prepare(String::from_utf8_lossy(body).into_owned())?;
        Ok(self.emitter.emit(lexer.tokenise(&text)))
    }
}

impl Default for ResponseFormatter {
    fn default() -> Self {
        ResponseFormatter::new(
            LexerRegistry::default(),
            StyleTheme::named_or_fallback(THEME_NAME),
        )
    }
}

/// Format with the default lexer table and theme
pub fn format_response(body: &[u8], content_type: &str) -> Result<String, FormatError> {
    static FORMATTER: OnceLock<ResponseFormatter> = OnceLock::new();
    FORMATTER
        .get_or_init(ResponseFormatter::default)
        .format(body, content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Color of the first run whose text is exactly `text`
    fn run_color(annotated: &str, text: &str) -> Option<String> {
        parse_annotated(annotated)
            .into_iter()
            .find(|run| run.text == text)
            .and_then(|run| run.color)
    }

    #[test]
    fn test_json_is_pretty_printed_and_colored() {
        let out = format_response(br#"{"a":1,"s":"x"}"#, "application/json").unwrap();
        assert_eq!(strip_markup(&out), "{\n  \"a\": 1,\n  \"s\": \"x\"\n}");

        let number = run_color(&out, "1").unwrap();
        let string = run_color(&out, "x").unwrap();
        assert_ne!(number, string);
    }

    #[test]
    fn test_invalid_json_fails() {
        let result = format_response(b"<html>oops</html>", "application/json; charset=utf-8");
        assert!(matches!(result, Err(FormatError::InvalidJson(_))));
    }

    #[test]
    fn test_octet_stream_is_passthrough() {
        let body = b"raw bytes, no color";
        let out = format_response(body, "application/octet-stream").unwrap();
        assert_eq!(out, "raw bytes, no color");
        assert_eq!(color_directive_count(&out), 0);
    }

    #[test]
    fn test_plain_text_brackets_survive() {
        let out = format_response(b"[INFO] ready", "text/plain").unwrap();
        assert_eq!(out, "[[INFO]] ready");
        assert_eq!(strip_markup(&out), "[INFO] ready");
    }

    #[test]
    fn test_xml_is_not_reindented() {
        let body = b"<a><b>1</b></a>";
        let out = format_response(body, "text/xml").unwrap();
        assert_eq!(strip_markup(&out), "<a><b>1</b></a>");
        assert!(color_directive_count(&out) > 0);
    }

    #[test]
    fn test_html_is_colored() {
        let out = format_response(b"<p class=\"x\">hi</p>", "text/html").unwrap();
        assert!(run_color(&out, "p").is_some());
        assert_eq!(strip_markup(&out), "<p class=\"x\">hi</p>");
    }

    #[test]
    fn test_json_field_set_survives() {
        let payload = serde_json::json!({
            "name": "widget [v2]",
            "tags": ["a", "b"],
            "price": 9.5,
            "stock": null,
            "nested": {"ok": true}
        });
        let body = serde_json::to_vec(&payload).unwrap();
        let out = format_response(&body, "application/json").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&strip_markup(&out)).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn test_fallback_theme_formatter() {
        let formatter = ResponseFormatter::new(LexerRegistry::default(), StyleTheme::named_or_fallback("missing"));
        assert_eq!(formatter.emitter.theme().name(), theme::FALLBACK_THEMES[0]);
        let out = formatter.format(br#"{"k":2}"#, "application/json").unwrap();
        assert!(run_color(&out, "2").is_some());
        assert_eq!(strip_markup(&out), "{\n  \"k\": 2\n}");
    }
}
