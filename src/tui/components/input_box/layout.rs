//! Visual row layout for the input box.
//!
//! The buffer is split into rows, each a byte range into the buffer, so that
//! drawing, cursor placement, and vertical movement all agree on where every
//! character ends up. Hard newlines end a row (the `\n` itself belongs to no
//! row); long lines are word-wrapped with `textwrap`'s first-fit algorithm and
//! overlong words are broken.

use std::ops::Range;

use textwrap::WordSeparator;
use textwrap::core::break_words;
use textwrap::wrap_algorithms::wrap_first_fit;
use unicode_width::UnicodeWidthStr;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Starting height; the box never shrinks below this many rows
pub(super) const MIN_VISIBLE_LINES: u16 = 3;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 8;

/// Inner text width for an outer area width. 0 if the area is too narrow.
pub(super) fn inner_width(outer_width: u16) -> u16 {
    outer_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

pub(super) struct WrapLayout {
    rows: Vec<Range<usize>>,
}

impl WrapLayout {
    pub fn new(text: &str, width: u16) -> Self {
        let mut rows = Vec::new();
        let mut line_start = 0;
        for line in text.split('\n') {
            wrap_line(line, line_start, width.max(1) as usize, &mut rows);
            line_start += line.len() + 1;
        }
        Self { rows }
    }

    /// Saturates at `u16::MAX` for very long drafts.
    pub fn row_count(&self) -> u16 {
        u16::try_from(self.rows.len()).unwrap_or(u16::MAX)
    }

    pub fn rows(&self) -> &[Range<usize>] {
        &self.rows
    }

    /// Row holding byte offset `pos`. At a soft wrap the cursor belongs to
    /// the start of the next row.
    pub fn row_of(&self, pos: usize) -> usize {
        self.rows
            .iter()
            .rposition(|r| r.start <= pos)
            .unwrap_or(0)
    }

    /// (column, row) of byte offset `pos`.
    pub fn cursor_cell(&self, text: &str, pos: usize) -> (u16, u16) {
        let row = self.row_of(pos);
        let start = self.rows[row].start;
        let col = u16::try_from(text[start..pos].width()).unwrap_or(u16::MAX);
        (col, u16::try_from(row).unwrap_or(u16::MAX))
    }

    /// Byte offset closest to `col` on `row`.
    pub fn pos_at(&self, text: &str, row: usize, col: u16) -> usize {
        let range = self.rows[row].clone();
        let soft_end = self
            .rows
            .get(row + 1)
            .is_some_and(|next| next.start == range.end);

        let mut used = 0usize;
        for (i, c) in text[range.clone()].char_indices() {
            let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if used + w > col as usize {
                return range.start + i;
            }
            used += w;
        }

        // The end of a soft-wrapped row is drawn at the start of the next one
        if soft_end && range.end > range.start {
            text[range.clone()]
                .char_indices()
                .next_back()
                .map_or(range.end, |(i, _)| range.start + i)
        } else {
            range.end
        }
    }
}

/// Append the rows of one hard line starting at byte `offset`.
fn wrap_line(line: &str, offset: usize, width: usize, rows: &mut Vec<Range<usize>>) {
    if line.is_empty() {
        rows.push(offset..offset);
        return;
    }

    let words = break_words(WordSeparator::AsciiSpace.find_words(line), width);
    let wrapped = wrap_first_fit(&words, &[width as f64]);

    let first = rows.len();
    let mut cursor = offset;
    for fragments in wrapped {
        let len: usize = fragments
            .iter()
            .map(|w| w.word.len() + w.whitespace.len())
            .sum();
        rows.push(cursor..cursor + len);
        cursor += len;
    }

    // Whatever the word splitter did not cover stays on the last row
    let line_end = offset + line.len();
    if rows.len() == first {
        rows.push(offset..line_end);
    } else if let Some(last) = rows.last_mut() {
        last.end = line_end;
    }
}

/// Number of rows `text` needs at `width`, always at least 1.
pub(super) fn row_count(text: &str, width: u16) -> u16 {
    WrapLayout::new(text, width).row_count().max(1)
}

/// Byte offset of the char boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

/// Byte offset of the char boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..].chars().next().map_or(pos, |c| pos + c.len_utf8())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Start of the word before `pos`, skipping separators first (readline
/// `backward-word`).
pub(super) fn prev_word_start(text: &str, pos: usize) -> usize {
    let before = &text[..pos];
    let trimmed = before.trim_end_matches(|c| !is_word_char(c));
    trimmed
        .char_indices()
        .rev()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(0, |(i, c)| i + c.len_utf8())
}

/// End of the word after `pos`, skipping separators first (readline
/// `forward-word`).
pub(super) fn next_word_end(text: &str, pos: usize) -> usize {
    let after = &text[pos..];
    let skipped = after.len() - after.trim_start_matches(|c| !is_word_char(c)).len();
    after[skipped..]
        .char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(text.len(), |(i, _)| pos + skipped + i)
}
