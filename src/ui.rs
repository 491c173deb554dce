//! Widget helpers shared by the terminal drawing code

use ratatui::{prelude::*, widgets::*};

use crate::highlight::parse_annotated;
use crate::messages::render::ConsoleLevel;
use crate::models::HttpMethod;

/// Border style for a panel given its focus and edit state
pub fn panel_border(is_focused: bool, is_editing: bool) -> Style {
    if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Renders a bordered text input
pub fn render_input<'a>(content: &'a str, title: String, border: Style) -> Paragraph<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);

    Paragraph::new(content).block(block)
}

/// Parse `#rrggbb` into an RGB color
pub fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Turn annotated response text into colored lines
pub fn render_annotated(text: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();

    for run in parse_annotated(text) {
        let style = run
            .color
            .as_deref()
            .and_then(hex_color)
            .map(|c| Style::default().fg(c))
            .unwrap_or_default();

        let mut parts = run.text.split('\n').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                spans.push(Span::styled(part.to_string(), style));
            }
            if parts.peek().is_some() {
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
        }
    }
    lines.push(Line::from(spans));
    lines
}

/// Terminal column of a byte cursor inside a bordered input, clamped to the inner area
pub fn cursor_x(area: Rect, text: &str, byte_pos: usize) -> u16 {
    let chars = text
        .get(..byte_pos)
        .unwrap_or(text)
        .chars()
        .count();
    let offset = u16::try_from(chars).unwrap_or(u16::MAX);
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    area.x.saturating_add(offset).saturating_add(1).min(max_x)
}

/// Status line color, keyed on the numeric code at its start
pub fn status_color(status: &str) -> Color {
    let code = status
        .split_whitespace()
        .next()
        .and_then(|c| c.parse::<u16>().ok())
        .unwrap_or(0);
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: HttpMethod) -> Color {
    match method {
        HttpMethod::GET => Color::Green,
        HttpMethod::POST => Color::Yellow,
    }
}

/// Console line color
pub fn console_color(level: ConsoleLevel) -> Color {
    match level {
        ConsoleLevel::Info => Color::Gray,
        ConsoleLevel::Success => Color::Green,
        ConsoleLevel::Warning => Color::Yellow,
        ConsoleLevel::Error => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_x_counts_chars_not_bytes() {
        let area = Rect::new(2, 0, 40, 3);
        // "héllo": the cursor after 'é' sits at byte 3 but column 2
        assert_eq!(cursor_x(area, "héllo", 3), 2 + 2 + 1);
        assert_eq!(cursor_x(area, "héllo", "héllo".len()), 2 + 5 + 1);
        assert_eq!(cursor_x(area, "", 0), 3);
    }

    #[test]
    fn test_cursor_x_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 3);
        let long = "x".repeat(70_000);
        assert_eq!(cursor_x(area, &long, long.len()), 8);
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#f92672"), Some(Color::Rgb(0xf9, 0x26, 0x72)));
        assert_eq!(hex_color("f92672"), None);
        assert_eq!(hex_color("#zz0000"), None);
    }

    #[test]
    fn test_annotated_lines() {
        let lines = render_annotated("[#f8f8f2]{[-]\n  [#f92672]\"[[a]]\"[-]\n[#f8f8f2]}[-]");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].spans.len(), 2);
        assert_eq!(lines[1].spans[0].content, "  ");
        assert_eq!(lines[1].spans[1].content, "\"[a]\"");
        assert_eq!(lines[1].spans[1].style.fg, Some(Color::Rgb(0xf9, 0x26, 0x72)));
    }

    #[test]
    fn test_plain_text_has_no_color() {
        let lines = render_annotated("a\n\nb");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].spans.is_empty());
        assert_eq!(lines[2].spans[0].style.fg, None);
    }

    #[test]
    fn test_status_color() {
        assert_eq!(status_color("200 OK"), Color::Green);
        assert_eq!(status_color("404 Not Found"), Color::Red);
        assert_eq!(status_color(""), Color::Yellow);
    }
}
