//! Greedy word wrapping with a hard-break fallback.
//!
//! Widths are counted in code points. A line breaks at the last space inside
//! the window when that space sits past the window's midpoint; otherwise the
//! line is cut at exactly `max_width`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub content: String,
    pub continuation: bool,
}

pub fn width(text: &str) -> usize {
    text.chars().count()
}

pub fn wrap(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    let mut rest = text;
    while width(rest) > max_width {
        let split = byte_offset(rest, break_point(rest, max_width));
        lines.push(rest[..split].trim_end().to_string());
        rest = rest[split..].trim_start();
    }
    lines.push(rest.to_string());
    lines
}

/// Wraps `text`, then puts `suffix` on the last line if it still fits, or on
/// a line of its own (trimmed) if it doesn't. A blank suffix is dropped.
pub fn wrap_with_suffix(text: &str, suffix: &str, max_width: usize) -> Vec<String> {
    let mut lines = wrap(text, max_width);
    if suffix.trim().is_empty() {
        return lines;
    }
    match lines.last_mut() {
        Some(last) if width(last) + width(suffix) <= max_width => last.push_str(suffix),
        _ => lines.push(suffix.trim().to_string()),
    }
    lines
}

pub fn display_lines(text: &str, suffix: &str, max_width: usize) -> Vec<DisplayLine> {
    wrap_with_suffix(text, suffix, max_width)
        .into_iter()
        .enumerate()
        .map(|(idx, content)| DisplayLine {
            content,
            continuation: idx > 0,
        })
        .collect()
}

fn break_point(text: &str, max_width: usize) -> usize {
    text.chars()
        .take(max_width + 1)
        .enumerate()
        .filter(|&(_, c)| c == ' ')
        .map(|(idx, _)| idx)
        .last()
        .filter(|&idx| idx > max_width / 2)
        .unwrap_or(max_width)
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap("short text", 120), vec!["short text"]);
    }

    #[test]
    fn empty_text_still_yields_a_line() {
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn long_word_is_hard_broken() {
        assert_eq!(wrap("aaaaaaaaaaaaaaaa", 10), vec!["aaaaaaaaaa", "aaaaaa"]);
    }

    #[test]
    fn breaks_at_space_past_midpoint() {
        assert_eq!(wrap("buy milk and eggs", 10), vec!["buy milk", "and eggs"]);
    }

    #[test]
    fn space_before_midpoint_is_ignored() {
        // the only space sits at column 2, not past 10 / 2
        assert_eq!(wrap("ab cdefghijklmnop", 10), vec!["ab cdefghi", "jklmnop"]);
    }

    #[test]
    fn space_exactly_at_width_is_a_break() {
        assert_eq!(wrap("abcdefghij klm", 10), vec!["abcdefghij", "klm"]);
    }

    #[test]
    fn counts_code_points_not_bytes() {
        let lines = wrap("åäöåäöåäöåäö", 5);
        assert_eq!(lines, vec!["åäöåä", "öåäöå", "äö"]);
    }

    #[test]
    fn wrapped_lines_fit_and_rejoin() {
        let texts = [
            "the quick brown fox jumps over the lazy dog while the cat sleeps soundly",
            "",
            " ",
            "   leading spaces",
            "trailing spaces    ",
            "  both  ends  ",
            "repeated     gaps     between     words",
            "köp mjölk och ägg på vägen hem från jobbet",
            "日本語 のテキスト と 空白 が 混ざって いる",
            "a supercalifragilisticexpialidocious word",
            "xxxxxxxxxxxxxxxxxxxx yyyyyyyyyyyyyyyyyyyy z",
            "z xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx",
            "a b c d e f g h i j k l m n o p",
        ];
        for text in texts {
            for max in 1..40 {
                let lines = wrap(text, max);
                assert!(!lines.is_empty(), "{text:?} at {max}");
                assert!(
                    lines.iter().all(|l| width(l) <= max),
                    "{text:?} at {max}: {lines:?}"
                );
                let squashed: String = lines.concat().split_whitespace().collect();
                let original: String = text.split_whitespace().collect();
                assert_eq!(squashed, original, "{text:?} at {max}");
            }
        }
    }

    #[test]
    fn edge_spaces_are_trimmed_only_at_breaks() {
        assert_eq!(wrap("  buy milk  ", 6), vec!["  buy", "milk  "]);
        assert_eq!(wrap("abc   ", 3), vec!["abc", ""]);
    }

    #[test]
    fn suffix_joins_last_line_when_it_fits() {
        let lines = wrap_with_suffix("buy milk", "  2026-10-16 09:30", 40);
        assert_eq!(lines, vec!["buy milk  2026-10-16 09:30"]);
    }

    #[test]
    fn suffix_moves_to_own_line_when_too_long() {
        let lines = wrap_with_suffix("buy milk and eggs", "  09:30", 10);
        assert_eq!(lines, vec!["buy milk", "and eggs", "09:30"]);
    }

    #[test]
    fn blank_suffix_changes_nothing() {
        assert_eq!(wrap_with_suffix("abc", "   ", 3), vec!["abc"]);
    }

    #[test]
    fn display_lines_mark_continuations() {
        let lines = display_lines("buy milk and eggs", "", 10);
        let flags: Vec<bool> = lines.iter().map(|l| l.continuation).collect();
        assert_eq!(flags, vec![false, true]);
        assert_eq!(lines[1].content, "and eggs");
    }
}
