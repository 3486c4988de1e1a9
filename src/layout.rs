//! Word wrapping and the scrolling row window.
//!
//! Rows are a pure projection of the target words and a column budget. Each word is
//! rendered followed by one separator column; the budget is charged for word glyphs only,
//! and a row closes before the word that would push it past the budget. A word wider than
//! the budget still gets a row of its own.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

/// Rows shown at once
pub const WINDOW_ROWS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Indexes of the words on this row
    pub words: Range<usize>,
    /// Rendered columns, separators included
    pub width: usize,
}

pub fn word_width(word: &[char]) -> usize {
    word.iter().map(|c| c.width().unwrap_or(0)).sum()
}

pub fn layout<I>(words: I, display_width: usize) -> Vec<Row>
where
    I: IntoIterator,
    I::Item: AsRef<[char]>,
{
    let mut rows: Vec<Row> = Vec::new();
    let mut glyphs = 0;

    for (idx, word) in words.into_iter().enumerate() {
        let w = word_width(word.as_ref());
        match rows.last_mut() {
            Some(row) if glyphs + w <= display_width => {
                row.words.end = idx + 1;
                row.width += w + 1;
                glyphs += w;
            }
            _ => {
                rows.push(Row {
                    words: idx..idx + 1,
                    width: w + 1,
                });
                glyphs = w;
            }
        }
    }

    rows
}

/// Largest glyph budget whose rows all render within `columns`, trailing separator
/// excluded. Falls back to 0 (one word per row) when nothing fits.
pub fn fit_budget<I>(words: I, columns: usize) -> usize
where
    I: IntoIterator,
    I::Item: AsRef<[char]>,
{
    let words: Vec<I::Item> = words.into_iter().collect();
    (1..=columns)
        .rev()
        .find(|&budget| {
            layout(&words, budget)
                .iter()
                .all(|row| row.width.saturating_sub(1) <= columns)
        })
        .unwrap_or(0)
}

/// Column offset of the start of word `idx` in the fully rendered text
pub fn word_offset<I>(words: I, idx: usize) -> usize
where
    I: IntoIterator,
    I::Item: AsRef<[char]>,
{
    words
        .into_iter()
        .take(idx)
        .map(|w| word_width(w.as_ref()) + 1)
        .sum()
}

/// Row containing the column `offset`; offsets past the end land on the last row
pub fn active_row(rows: &[Row], offset: usize) -> usize {
    let mut start = 0;
    let mut active = 0;
    for (idx, row) in rows.iter().enumerate() {
        if start > offset {
            break;
        }
        active = idx;
        start += row.width;
    }
    active
}

/// Rows to display so that the row holding `offset` stays visible
pub fn scroll_window(rows: &[Row], offset: usize) -> Range<usize> {
    let total = rows.len();
    if total == 0 {
        return 0..0;
    }

    let active = active_row(rows, offset);
    if active == 0 {
        0..total.min(WINDOW_ROWS)
    } else if active == total - 1 {
        total.saturating_sub(WINDOW_ROWS)..total
    } else {
        active - 1..active + 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<Vec<char>> {
        text.split_whitespace().map(|w| w.chars().collect()).collect()
    }

    #[test]
    fn test_breaks_before_word_that_exceeds_budget() {
        let rows = layout(words("alpha beta gamma delta"), 10);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].words, 0..2);
        assert_eq!(rows[1].words, 2..4);
        assert_eq!(rows[0].width, "alpha beta ".len());
    }

    #[test]
    fn test_wide_budget_keeps_one_row() {
        let rows = layout(words("ab cd"), 80);

        assert_eq!(rows, vec![Row { words: 0..2, width: 6 }]);
    }

    #[test]
    fn test_zero_width_gives_one_word_per_row() {
        let rows = layout(words("a bb ccc"), 0);

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.words.len() == 1));
    }

    #[test]
    fn test_oversized_word_gets_own_row() {
        let rows = layout(words("a enormous b"), 4);

        assert_eq!(
            rows.iter().map(|r| r.words.clone()).collect::<Vec<_>>(),
            vec![0..1, 1..2, 2..3]
        );
    }

    #[test]
    fn test_empty_input_gives_no_rows() {
        let rows = layout(Vec::<Vec<char>>::new(), 10);

        assert!(rows.is_empty());
        assert_eq!(scroll_window(&rows, 0), 0..0);
    }

    #[test]
    fn test_measures_display_columns() {
        // each CJK glyph is two columns wide
        let rows = layout(words("日本 語"), 4);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].width, 5);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let w = words("the quick brown fox jumps over the lazy dog");

        assert_eq!(layout(&w, 12), layout(&w, 12));
    }

    #[test]
    fn test_fit_budget_leaves_room_for_separators() {
        let w = words(&"word ".repeat(50));

        let budget = fit_budget(&w, 70);

        assert_eq!(budget, 59);
        assert!(layout(&w, budget).iter().all(|r| r.width - 1 <= 70));
        assert_eq!(layout(&w, budget)[0].words.len(), 14);
    }

    #[test]
    fn test_fit_budget_without_room() {
        assert_eq!(fit_budget(words("abc de"), 2), 0);
        assert_eq!(fit_budget(words("abc de"), 0), 0);
        assert_eq!(fit_budget(words("a b"), 70), 70);
    }

    #[test]
    fn test_word_offset() {
        let w = words("ab cde f");

        assert_eq!(word_offset(&w, 0), 0);
        assert_eq!(word_offset(&w, 1), 3);
        assert_eq!(word_offset(&w, 2), 7);
    }

    #[test]
    fn test_first_row_window() {
        let rows = layout(words("alpha beta gamma delta"), 10);

        assert_eq!(scroll_window(&rows, 0), 0..2);
        assert_eq!(scroll_window(&rows, 6), 0..2);
    }

    #[test]
    fn test_window_centres_on_middle_rows() {
        // one word per row
        let w = words("aa bb cc dd ee");
        let rows = layout(&w, 2);
        assert_eq!(rows.len(), 5);

        assert_eq!(scroll_window(&rows, word_offset(&w, 0)), 0..3);
        assert_eq!(scroll_window(&rows, word_offset(&w, 1)), 0..3);
        assert_eq!(scroll_window(&rows, word_offset(&w, 2)), 1..4);
        assert_eq!(scroll_window(&rows, word_offset(&w, 3)), 2..5);
        assert_eq!(scroll_window(&rows, word_offset(&w, 4)), 2..5);
    }

    #[test]
    fn test_row_boundary_belongs_to_next_row() {
        let w = words("aa bb cc");
        let rows = layout(&w, 2);

        assert_eq!(active_row(&rows, 2), 0);
        assert_eq!(active_row(&rows, 3), 1);
        assert_eq!(active_row(&rows, 1000), 2);
    }

    #[test]
    fn test_window_never_exceeds_row_count() {
        let w = words("aa bb");
        let rows = layout(&w, 2);

        assert_eq!(scroll_window(&rows, 0), 0..2);
        assert_eq!(scroll_window(&rows, 3), 0..2);
    }
}
