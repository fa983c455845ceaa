//! Detail-view state for one loaded note.

use crate::model::note::{Note, NoteId};
use crate::preview::{render_html, summary_or_placeholder};

/// Note currently shown on `/notes/<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteView {
    note: Note,
    summarizing: bool,
}

impl NoteView {
    pub fn new(note: Note) -> Self {
        Self {
            note,
            summarizing: false,
        }
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    /// Whether a summarize request is outstanding.
    pub fn is_summarizing(&self) -> bool {
        self.summarizing
    }

    /// Summary text, or the "No summary yet" placeholder.
    pub fn summary_display(&self) -> &str {
        summary_or_placeholder(self.note.summary.as_deref())
    }

    /// Content rendered for the read-only pane.
    pub fn content_html(&self) -> String {
        render_html(&self.note.content)
    }

    /// Marks a summarize request as outstanding and returns the note id to
    /// summarize, or `None` while an earlier request is still pending.
    pub fn begin_summarize(&mut self) -> Option<NoteId> {
        if self.summarizing {
            return None;
        }
        self.summarizing = true;
        Some(self.note.id.clone())
    }

    /// Clears the outstanding flag; a returned note replaces the viewed one.
    pub fn finish_summarize(&mut self, summarized: Option<Note>) {
        self.summarizing = false;
        if let Some(note) = summarized {
            self.note = note;
        }
    }

    /// Swaps in the note returned by an update or summarize call.
    pub(crate) fn replace(&mut self, note: Note) {
        self.note = note;
    }
}

#[cfg(test)]
mod tests {
    use super::NoteView;
    use crate::model::note::Note;

    fn note(summary: Option<&str>) -> Note {
        Note {
            id: "n1".to_string(),
            user_id: "u1".to_string(),
            title: "Plan".to_string(),
            content: "body".to_string(),
            summary: summary.map(str::to_string),
            tags: Vec::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn summarizing_flag_spans_the_request() {
        let mut view = NoteView::new(note(None));
        assert_eq!(view.begin_summarize().as_deref(), Some("n1"));
        assert!(view.is_summarizing());
        assert_eq!(view.begin_summarize(), None);

        view.finish_summarize(Some(note(Some("short"))));
        assert!(!view.is_summarizing());
        assert_eq!(view.summary_display(), "short");
    }

    #[test]
    fn failed_summarize_keeps_note_and_clears_flag() {
        let mut view = NoteView::new(note(None));
        view.begin_summarize();
        view.finish_summarize(None);
        assert!(!view.is_summarizing());
        assert_eq!(view.summary_display(), "No summary yet");
        assert!(view.begin_summarize().is_some());
    }
}
