//! Style themes - scope stack to foreground color

use std::fmt;
use std::sync::OnceLock;

use syntect::highlighting::{Color, Highlighter, Theme, ThemeSet};
use syntect::parsing::ScopeStack;

/// Tried in order when the requested theme is not bundled
pub const FALLBACK_THEMES: [&str; 3] = ["base16-eighties.dark", "base16-mocha.dark", "Solarized (dark)"];

/// Bundled themes, loaded on first use
pub fn theme_set() -> &'static ThemeSet {
    static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

/// Fixed mapping from token scopes to a `#rrggbb` foreground color.
///
/// Text the theme paints in its default foreground, and unclassified text,
/// get no color so they are emitted without directives.
pub struct StyleTheme {
    name: &'static str,
    highlighter: Highlighter<'static>,
    default_foreground: Option<Color>,
}

impl StyleTheme {
    fn from_theme(name: &'static str, theme: &'static Theme) -> Self {
        StyleTheme {
            name,
            highlighter: Highlighter::new(theme),
            default_foreground: theme.settings.foreground,
        }
    }

    /// A bundled theme by its exact name
    pub fn named(name: &str) -> Option<StyleTheme> {
        theme_set()
            .themes
            .get_key_value(name)
            .map(|(key, theme)| StyleTheme::from_theme(key.as_str(), theme))
    }

    /// First available fallback theme, or a theme that colors nothing
    pub fn fallback() -> StyleTheme {
        FALLBACK_THEMES
            .iter()
            .find_map(|name| StyleTheme::named(name))
            .unwrap_or_else(|| {
                static EMPTY: OnceLock<Theme> = OnceLock::new();
                StyleTheme::from_theme("none", EMPTY.get_or_init(Theme::default))
            })
    }

    /// The named theme, or the fallback theme if it does not exist
    pub fn named_or_fallback(name: &str) -> StyleTheme {
        StyleTheme::named(name).unwrap_or_else(|| {
            let fallback = StyleTheme::fallback();
            tracing::warn!(theme = name, fallback = fallback.name(), "Unknown style theme, using fallback");
            fallback
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn foreground(&self, scopes: &ScopeStack) -> Option<String> {
        if scopes.as_slice().is_empty() {
            return None;
        }
        let color = self.highlighter.style_for_stack(scopes.as_slice()).foreground;
        if Some(color) == self.default_foreground {
            return None;
        }
        Some(format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b))
    }
}

impl fmt::Debug for StyleTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleTheme").field("name", &self.name).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::THEME_NAME;
    use std::str::FromStr;

    fn stack(scopes: &str) -> ScopeStack {
        ScopeStack::from_str(scopes).unwrap()
    }

    #[test]
    fn test_configured_theme_is_bundled() {
        assert_eq!(StyleTheme::named(THEME_NAME).unwrap().name(), THEME_NAME);
    }

    #[test]
    fn test_literals_are_colored() {
        let theme = StyleTheme::named(THEME_NAME).unwrap();
        let number = theme.foreground(&stack("source.json constant.numeric.json")).unwrap();
        let string = theme.foreground(&stack("source.json string.quoted.double.json")).unwrap();
        assert!(number.starts_with('#') && number.len() == 7);
        assert_ne!(number, string);
    }

    #[test]
    fn test_unclassified_text_is_uncolored() {
        let theme = StyleTheme::named(THEME_NAME).unwrap();
        assert_eq!(theme.foreground(&ScopeStack::new()), None);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        assert!(StyleTheme::named("monokai-pro").is_none());
        assert_eq!(StyleTheme::named_or_fallback("monokai-pro").name(), FALLBACK_THEMES[0]);
    }
}
