//! Reading annotated text back into colored runs

/// A stretch of text sharing one foreground color
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledRun {
    /// `#rrggbb`, or `None` for the default color
    pub color: Option<String>,
    pub text: String,
}

enum Directive {
    Color(String),
    Reset,
}

fn parse_directive(tag: &str) -> Option<Directive> {
    if tag == "-" {
        return Some(Directive::Reset);
    }
    let hex = tag.strip_prefix('#')?;
    (hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
        .then(|| Directive::Color(tag.to_string()))
}

enum Event {
    Char(char),
    Directive(Directive),
}

/// Walk annotated text, resolving escapes.
///
/// Brackets that do not form a known directive are kept as literal text.
fn scan(text: &str, mut on_event: impl FnMut(Event)) {
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        if let Some(tail) = rest.strip_prefix("[[") {
            on_event(Event::Char('['));
            rest = tail;
            continue;
        }
        if let Some(tail) = rest.strip_prefix("]]") {
            on_event(Event::Char(']'));
            rest = tail;
            continue;
        }
        if ch == '[' {
            let directive = rest
                .find(']')
                .and_then(|end| parse_directive(&rest[1..end]).map(|d| (d, end)));
            if let Some((directive, end)) = directive {
                on_event(Event::Directive(directive));
                rest = &rest[end + 1..];
                continue;
            }
        }
        on_event(Event::Char(ch));
        rest = &rest[ch.len_utf8()..];
    }
}

/// Split annotated text into runs of one color each
pub fn parse_annotated(text: &str) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    let mut color: Option<String> = None;
    let mut current = String::new();

    scan(text, |event| match event {
        Event::Char(ch) => current.push(ch),
        Event::Directive(directive) => {
            flush(&mut runs, &mut current, &color);
            color = match directive {
                Directive::Color(c) => Some(c),
                Directive::Reset => None,
            };
        }
    });
    flush(&mut runs, &mut current, &color);
    runs
}

fn flush(runs: &mut Vec<StyledRun>, current: &mut String, color: &Option<String>) {
    if !current.is_empty() {
        runs.push(StyledRun {
            color: color.clone(),
            text: std::mem::take(current),
        });
    }
}

/// Plain text with all directives removed and escapes resolved
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    scan(text, |event| {
        if let Event::Char(ch) = event {
            out.push(ch);
        }
    });
    out
}

/// Number of color directives, resets excluded
pub fn color_directive_count(text: &str) -> usize {
    let mut count = 0;
    scan(text, |event| {
        if let Event::Directive(Directive::Color(_)) = event {
            count += 1;
        }
    });
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::emitter::escape;

    #[test]
    fn test_parse_runs() {
        let runs = parse_annotated("[#f92672]\"a\"[-]: [#ae81ff]1[-]");
        assert_eq!(
            runs,
            vec![
                StyledRun { color: Some("#f92672".into()), text: "\"a\"".into() },
                StyledRun { color: None, text: ": ".into() },
                StyledRun { color: Some("#ae81ff".into()), text: "1".into() },
            ]
        );
    }

    #[test]
    fn test_strip_resolves_escapes() {
        let stripped = strip_markup("[#e6db74]\"[[x]]\"[-] [[-]]");
        assert_eq!(stripped, "\"[x]\" [-]");
    }

    #[test]
    fn test_strip_inverts_escape() {
        for sample in ["[", "]", "[-]", "[#abcdef]", "x]]y[[z", "[[[-]]]"] {
            assert_eq!(strip_markup(&escape(sample)), sample);
        }
    }

    #[test]
    fn test_unknown_tag_is_literal() {
        assert_eq!(strip_markup("[red]x"), "[red]x");
        assert_eq!(color_directive_count("[red]x"), 0);
    }

    #[test]
    fn test_directive_count() {
        assert_eq!(color_directive_count("[#111111]a[-]b[#222222]c[-]"), 2);
        assert_eq!(color_directive_count("[#111111]a[-][#111111]b[-]"), 2);
        assert_eq!(color_directive_count("plain"), 0);
    }
}
