//! Token stream to annotated text
//!
//! Output uses inline color directives: `[#rrggbb]` switches the foreground
//! color and `[-]` resets it. Square brackets inside token text are doubled so
//! the renderer prints them instead of reading them as directives.

use crate::highlight::theme::StyleTheme;
use crate::highlight::token::Token;

pub const RESET_DIRECTIVE: &str = "[-]";

pub struct TokenColorEmitter {
    theme: StyleTheme,
}

impl TokenColorEmitter {
    pub fn new(theme: StyleTheme) -> Self {
        TokenColorEmitter { theme }
    }

    pub fn theme(&self) -> &StyleTheme {
        &self.theme
    }

    /// Emit every token in stream order
    pub fn emit<'a>(&self, tokens: impl IntoIterator<Item = Token<'a>>) -> String {
        let mut out = String::new();
        for token in tokens {
            self.emit_token(&mut out, token);
        }
        out
    }

    fn emit_token(&self, out: &mut String, token: Token<'_>) {
        if token.text.is_empty() {
            return;
        }
        // Whitespace looks the same in any color
        let color = if token.text.trim().is_empty() {
            None
        } else {
            self.theme.foreground(&token.scopes)
        };
        match color {
            Some(color) => {
                out.push('[');
                out.push_str(&color);
                out.push(']');
                escape_into(out, token.text);
                out.push_str(RESET_DIRECTIVE);
            }
            None => escape_into(out, token.text),
        }
    }
}

/// Double every `[` and `]`
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        if ch == '[' || ch == ']' {
            out.push(ch);
        }
        out.push(ch);
    }
}

/// Inverse of [`escape`]
pub fn unescape(text: &str) -> String {
    text.replace("[[", "[").replace("]]", "]")
}
