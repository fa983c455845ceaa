//! Client core for QuillNote, a markdown note-taking app.
//!
//! Holds everything behind the note screens that is not view markup: the
//! toolbar's text edits, the editor draft, list refresh coordination and
//! the backend flows for listing, editing, deleting and summarizing notes.

pub mod api;
pub mod config;
pub mod draft;
pub mod editor;
pub mod logging;
pub mod model;
pub mod preview;
pub mod refresh;
pub mod service;

pub use api::auth::{EnvToken, StaticToken, TokenSource};
pub use api::backend::NotesBackend;
pub use api::error::{ApiError, ApiResult};
pub use api::http::HttpNotesBackend;
pub use config::{ClientConfig, ConfigError, LogConfig};
pub use draft::{DraftError, NoteDraft, SaveError};
pub use editor::text_range::{prefix_current_line, wrap_selection, SelectionRange, TextEdit};
pub use editor::toolbar::{EditorSession, ToolbarAction, ToolbarCommand, UnknownCommand};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, NotePayload, NoteSummary};
pub use model::route::Route;
pub use refresh::coordinator::{FetchDeps, FetchOutcome, FetchTicket, ListCoordinator};
pub use refresh::signal::RefreshSignal;
pub use service::error::{NoteOpError, NoteOpErrorKind, NoteOperation};
pub use service::note_view::NoteView;
pub use service::notes_service::{NoteOpResult, NotesService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
