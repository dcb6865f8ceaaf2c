use ratatui::style::Style;
use ratatui::text::Span;

use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Pad `spans` with `style` out to `width` cells
pub(super) fn pad_to(spans: &mut Vec<Span<'_>>, width: usize, style: Style) {
    let used = spans_width(spans);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), style));
    }
}

/// `YYYY-MM-DD` from an ISO-8601 timestamp
pub(super) fn created_date(created_at: &str) -> &str {
    created_at.split('T').next().unwrap_or(created_at)
}

/// Spans for an editable text field with a block cursor at byte `cursor`
pub(super) fn text_with_cursor<'a>(
    text: &str,
    cursor: usize,
    style: Style,
    cursor_style: Style,
) -> Vec<Span<'a>> {
    let cursor = cursor.min(text.len());
    let (before, after) = text.split_at(cursor);
    vec![
        Span::styled(before.to_string(), style),
        Span::styled("\u{258C}", cursor_style), // ▌
        Span::styled(after.to_string(), style),
    ]
}
