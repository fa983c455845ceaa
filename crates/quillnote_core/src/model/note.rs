//! Note shapes exchanged with the notes backend.
//!
//! # Responsibility
//! - Mirror the backend's JSON for full notes and list rows.
//! - Define the write payload sent on create/update.
//!
//! # Invariants
//! - Core never derives or validates `Note` beyond decoding it.
//! - `NotePayload` carries exactly `title`, `content` and `tags`.

use serde::{Deserialize, Serialize};

/// Opaque backend-assigned note identifier.
pub type NoteId = String;

/// Full note as returned by `GET /notes/:id` and every write endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// AI summary; `None` until the note has been summarized.
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Note {
    /// Summary text for display, or `None` when absent or blank.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Row returned by `GET /notes?q=`.
///
/// The backend may send only `{id, title}`; the remaining fields default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<&Note> for NoteSummary {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            summary: note.summary.clone(),
            tags: note.tags.clone(),
        }
    }
}

/// Body of `POST /notes` and `PUT /notes/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePayload {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}
