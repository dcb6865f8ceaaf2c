use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells. Tabs count as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_display_width).sum()
}

/// Truncate to `max_cells` terminal cells, ending with `…` when anything was cut.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let budget = max_cells - 1; // room for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = grapheme_display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Next grapheme boundary after `byte_offset`. Returns None if at end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    let step = s[byte_offset..]
        .graphemes(true)
        .next()
        .map_or(s.len() - byte_offset, str::len);
    Some(byte_offset + step)
}

/// Previous grapheme boundary before `byte_offset`. Returns None if at start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset]
        .grapheme_indices(true)
        .next_back()
        .map(|(i, _)| i)
}

fn grapheme_display_width(g: &str) -> usize {
    if g == "\t" { 4 } else { UnicodeWidthStr::width(g) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_cells() {
        assert_eq!(display_width("Boston"), 6);
        assert_eq!(display_width("東京マラソン"), 12);
        assert_eq!(display_width("🏃"), 2);
        assert_eq!(display_width("cafe\u{0301}"), 4);
        assert_eq!(display_width("a\tb"), 6);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncate_fits_or_ellipsizes() {
        assert_eq!(truncate_to_width("5k", 10), "5k");
        assert_eq!(truncate_to_width("taper", 5), "taper");
        assert_eq!(truncate_to_width("marathon week", 8), "maratho\u{2026}");
        assert_eq!(truncate_to_width("東京マラソン", 5), "東京\u{2026}");
        assert_eq!(truncate_to_width("🏃🏃🏃", 4), "🏃\u{2026}");
        assert_eq!(truncate_to_width("hello", 1), "\u{2026}");
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn boundaries_step_over_clusters() {
        let s = "a🏃b";
        assert_eq!(next_grapheme_boundary(s, 0), Some(1));
        assert_eq!(next_grapheme_boundary(s, 1), Some(5));
        assert_eq!(next_grapheme_boundary(s, 6), None);
        assert_eq!(prev_grapheme_boundary(s, 5), Some(1));
        assert_eq!(prev_grapheme_boundary(s, 0), None);

        let accented = "cafe\u{0301}!";
        assert_eq!(next_grapheme_boundary(accented, 3), Some(6));
        assert_eq!(prev_grapheme_boundary(accented, 6), Some(3));

        let family = "👨\u{200D}👩\u{200D}👧";
        assert_eq!(next_grapheme_boundary(family, 0), Some(family.len()));
    }
}
