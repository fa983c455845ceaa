//! Selection-based text edits for the markdown content buffer.
//!
//! # Responsibility
//! - Wrap the current selection in a delimiter pair.
//! - Prefix the line that contains the caret.
//! - Report the selection the host input should restore after each edit.
//!
//! # Invariants
//! - Offsets are byte offsets on UTF-8 char boundaries.
//! - Externally supplied ranges are clamped to `[0, buffer.len()]` and
//!   snapped down to the nearest char boundary before use.
//! - Edits never touch text outside the inserted delimiters or prefix.

/// Caret or highlighted span inside the content buffer.
///
/// `start <= end` always holds; `start == end` is a bare caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    /// Creates a range, swapping the bounds when given in reverse.
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Creates a collapsed range (caret only).
    pub fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn is_caret(self) -> bool {
        self.start == self.end
    }

    /// Clamps both bounds into `buffer` and onto char boundaries.
    pub fn clamp_to(self, buffer: &str) -> Self {
        Self::new(
            floor_char_boundary(buffer, self.start),
            floor_char_boundary(buffer, self.end),
        )
    }
}

/// Result of one primitive edit: the new buffer and the selection to restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub buffer: String,
    pub selection: SelectionRange,
}

/// Inserts `before` ahead of the selection and `after` behind it.
///
/// The originally selected text stays selected between the delimiters. With a
/// bare caret the caret lands between the two inserted delimiters.
pub fn wrap_selection(buffer: &str, range: SelectionRange, before: &str, after: &str) -> TextEdit {
    let range = range.clamp_to(buffer);
    let mut wrapped = String::with_capacity(buffer.len() + before.len() + after.len());
    wrapped.push_str(&buffer[..range.start]);
    wrapped.push_str(before);
    wrapped.push_str(&buffer[range.start..range.end]);
    wrapped.push_str(after);
    wrapped.push_str(&buffer[range.end..]);

    TextEdit {
        buffer: wrapped,
        selection: SelectionRange::new(range.start + before.len(), range.end + before.len()),
    }
}

/// Inserts `prefix` at the start of the line holding `caret`.
///
/// Prefixes accumulate: applying `"# "` twice yields `"# # "`. The returned
/// selection is a caret advanced by `prefix.len()` from its old position.
pub fn prefix_current_line(buffer: &str, caret: usize, prefix: &str) -> TextEdit {
    let caret = floor_char_boundary(buffer, caret);
    let start = line_start(buffer, caret);
    let mut prefixed = String::with_capacity(buffer.len() + prefix.len());
    prefixed.push_str(&buffer[..start]);
    prefixed.push_str(prefix);
    prefixed.push_str(&buffer[start..]);

    TextEdit {
        buffer: prefixed,
        selection: SelectionRange::caret(caret + prefix.len()),
    }
}

/// Returns the offset where the line containing `pos` begins.
///
/// A position directly after a `\n` belongs to the following line.
pub fn line_start(buffer: &str, pos: usize) -> usize {
    let pos = floor_char_boundary(buffer, pos);
    buffer[..pos].rfind('\n').map(|idx| idx + 1).unwrap_or(0)
}

fn floor_char_boundary(buffer: &str, pos: usize) -> usize {
    let mut pos = pos.min(buffer.len());
    while !buffer.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::{line_start, prefix_current_line, wrap_selection, SelectionRange};

    #[test]
    fn wrap_keeps_selected_text_selected() {
        let edit = wrap_selection("say hello now", SelectionRange::new(4, 9), "**", "**");
        assert_eq!(edit.buffer, "say **hello** now");
        assert_eq!(edit.selection, SelectionRange::new(6, 11));
        assert_eq!(&edit.buffer[edit.selection.start..edit.selection.end], "hello");
    }

    #[test]
    fn wrap_grows_buffer_by_both_delimiters() {
        let buffers = ["", "abc", "line one\nline two", "héllo wörld"];
        for buffer in buffers {
            let range = SelectionRange::new(0, buffer.len());
            let edit = wrap_selection(buffer, range, "[", "](url)");
            assert_eq!(edit.buffer.len(), buffer.len() + 1 + 6);
            assert_eq!(&edit.buffer[edit.selection.start..edit.selection.end], buffer);
        }
    }

    #[test]
    fn wrap_with_caret_places_caret_between_delimiters() {
        let edit = wrap_selection("ab", SelectionRange::caret(1), "_", "_");
        assert_eq!(edit.buffer, "a__b");
        assert_eq!(edit.selection, SelectionRange::caret(2));
    }

    #[test]
    fn wrap_at_buffer_end_appends_adjacent_delimiters() {
        let edit = wrap_selection("text", SelectionRange::caret(4), "**", "**");
        assert_eq!(edit.buffer, "text****");
        assert_eq!(edit.selection, SelectionRange::caret(6));
    }

    #[test]
    fn wrap_clamps_out_of_range_selection() {
        let edit = wrap_selection("abc", SelectionRange::new(2, 99), "_", "_");
        assert_eq!(edit.buffer, "ab_c_");
        assert_eq!(edit.selection, SelectionRange::new(3, 4));
    }

    #[test]
    fn wrap_snaps_offsets_inside_multibyte_chars() {
        // 'é' occupies bytes 1..3; offset 2 snaps back to 1.
        let edit = wrap_selection("héllo", SelectionRange::new(2, 3), "_", "_");
        assert_eq!(edit.buffer, "h_é_llo");
    }

    #[test]
    fn prefix_targets_only_the_caret_line() {
        let edit = prefix_current_line("hello\nworld", 7, "- ");
        assert_eq!(edit.buffer, "hello\n- world");
        assert_eq!(edit.selection, SelectionRange::caret(9));
    }

    #[test]
    fn prefix_accumulates_on_repeat() {
        let once = prefix_current_line("x", 0, "# ");
        let twice = prefix_current_line(&once.buffer, once.selection.start, "# ");
        assert_eq!(twice.buffer, "# # x");

        let thrice = prefix_current_line(&twice.buffer, twice.selection.start, "# ");
        assert_eq!(thrice.buffer, "# # # x");
        assert_eq!(thrice.selection, SelectionRange::caret(6));
    }

    #[test]
    fn prefix_on_empty_buffer_inserts_prefix() {
        let edit = prefix_current_line("", 0, "> ");
        assert_eq!(edit.buffer, "> ");
        assert_eq!(edit.selection, SelectionRange::caret(2));
    }

    #[test]
    fn caret_after_newline_belongs_to_next_line() {
        assert_eq!(line_start("ab\ncd", 3), 3);
        assert_eq!(line_start("ab\ncd", 2), 0);
        assert_eq!(line_start("\nab", 0), 0);

        let edit = prefix_current_line("ab\ncd", 3, "- ");
        assert_eq!(edit.buffer, "ab\n- cd");
    }
}
