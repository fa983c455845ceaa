//! Notes backend contract.
//!
//! # Responsibility
//! - Describe the six HTTP endpoints the client consumes.
//! - Let flows run against HTTP or an in-memory stand-in.
//!
//! # Invariants
//! - Every call carries a bearer token; callers check for it first.
//! - `delete_note` succeeds on status alone and never decodes a body.

use crate::api::error::ApiResult;
use crate::model::note::{Note, NotePayload, NoteSummary};

/// Remote persistence and summarization for notes.
pub trait NotesBackend {
    /// `GET /notes?q=<query>`.
    fn list_notes(&self, token: &str, query: &str) -> ApiResult<Vec<NoteSummary>>;
    /// `GET /notes/:id`.
    fn get_note(&self, token: &str, id: &str) -> ApiResult<Note>;
    /// `POST /notes`.
    fn create_note(&self, token: &str, payload: &NotePayload) -> ApiResult<Note>;
    /// `PUT /notes/:id`.
    fn update_note(&self, token: &str, id: &str, payload: &NotePayload) -> ApiResult<Note>;
    /// `DELETE /notes/:id`.
    fn delete_note(&self, token: &str, id: &str) -> ApiResult<()>;
    /// `POST /notes/:id/summarize`.
    fn summarize_note(&self, token: &str, id: &str) -> ApiResult<Note>;
}
