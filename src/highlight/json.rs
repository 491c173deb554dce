//! JSON lexer and 2-space re-indenter

use serde::de::IgnoredAny;

use crate::error::FormatError;
use crate::highlight::lexer::Lexer;
use crate::highlight::syntax::ScopeLexer;
use crate::highlight::token::TokenStream;

const INDENT: &str = "  ";

/// Pretty-prints, then tokenizes with the bundled JSON grammar
pub struct JsonLexer {
    scopes: ScopeLexer,
}

impl JsonLexer {
    pub fn new() -> Self {
        JsonLexer {
            scopes: ScopeLexer::new("json", "json"),
        }
    }
}

impl Default for JsonLexer {
    fn default() -> Self {
        JsonLexer::new()
    }
}

impl Lexer for JsonLexer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn prepare(&self, body: String) -> Result<String, FormatError> {
        pretty_print(&body)
    }

    fn tokenise<'a>(&self, text: &'a str) -> TokenStream<'a> {
        self.scopes.tokenise(text)
    }
}

/// Re-indent a JSON document with two spaces per level.
///
/// Literals are copied through untouched, so key order, number spelling and
/// string escapes survive exactly as the server sent them.
pub fn pretty_print(text: &str) -> Result<String, FormatError> {
    serde_json::from_str::<IgnoredAny>(text).map_err(FormatError::InvalidJson)?;

    let mut out = String::with_capacity(text.len() + text.len() / 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            '{' | '[' => {
                out.push(ch);
                while chars.next_if(|c| is_whitespace(*c)).is_some() {}
                match chars.next_if(|c| *c == '}' || *c == ']') {
                    Some(close) => out.push(close),
                    None => {
                        depth += 1;
                        newline(&mut out, depth);
                    }
                }
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                newline(&mut out, depth);
                out.push(ch);
            }
            ',' => {
                out.push(',');
                newline(&mut out, depth);
            }
            ':' => out.push_str(": "),
            c if is_whitespace(c) => {}
            c => out.push(c),
        }
    }

    Ok(out)
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_print_object() {
        let pretty = pretty_print(r#"{"a":1,"b":[true,null],"c":{}}"#).unwrap();
        assert_eq!(
            pretty,
            "{\n  \"a\": 1,\n  \"b\": [\n    true,\n    null\n  ],\n  \"c\": {}\n}"
        );
    }

    #[test]
    fn test_pretty_print_matches_serde() {
        // Keys already sorted, since serde_json::Value orders them
        let input = r#" { "a_name" : "x", "b_items": [1, 2.5, {"k": "v"}], "c_empty": [ ] } "#;
        let value: serde_json::Value = serde_json::from_str(input).unwrap();
        assert_eq!(pretty_print(input).unwrap(), serde_json::to_string_pretty(&value).unwrap());
    }

    #[test]
    fn test_pretty_print_keeps_literals() {
        let pretty = pretty_print(r#"{"z":1e3,"a":"\"[x]\", {y}: \\"}"#).unwrap();
        assert_eq!(pretty, "{\n  \"z\": 1e3,\n  \"a\": \"\\\"[x]\\\", {y}: \\\\\"\n}");
    }

    #[test]
    fn test_pretty_print_rejects_invalid() {
        assert!(matches!(pretty_print("{bad json"), Err(FormatError::InvalidJson(_))));
        assert!(pretty_print("").is_err());
    }

    #[test]
    fn test_json_lexer_tokenises_pretty_text() {
        let lexer = JsonLexer::new();
        let pretty = lexer.prepare(r#"{"k":[1,2]}"#.to_string()).unwrap();
        let tokens: Vec<_> = lexer.tokenise(&pretty).collect();
        let joined: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(joined, pretty);
        assert!(tokens.iter().any(|t| t.text == "2" && t.has_scope("constant.numeric")));
    }
}
