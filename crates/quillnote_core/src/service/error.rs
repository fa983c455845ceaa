//! User-facing failures of note flows.

use crate::api::error::ApiError;
use crate::draft::{DraftError, SaveError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Flow a failure belongs to; selects the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteOperation {
    LoadList,
    LoadNote,
    Create,
    Update,
    Delete,
    Summarize,
}

impl NoteOperation {
    /// Headline shown when the flow fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::LoadList => "Failed to load notes.",
            Self::LoadNote => "Failed to load note.",
            Self::Create => "Failed to save note.",
            Self::Update => "Update failed.",
            Self::Delete => "Deletion failed.",
            Self::Summarize => "Summarisation failed.",
        }
    }

    /// Actionable message shown when no token is available.
    pub fn sign_in_message(self) -> &'static str {
        match self {
            Self::LoadList => "You need to be logged in to view your notes.",
            Self::LoadNote => "Sign in to open this note.",
            Self::Create => "You must be signed in to create a note.",
            Self::Update => "Sign in to update this note.",
            Self::Delete => "Sign in required to delete this note.",
            Self::Summarize => "Please sign in to summarise this note.",
        }
    }

    /// Confirmation shown when the flow succeeds, if any.
    pub fn success_message(self) -> Option<&'static str> {
        match self {
            Self::LoadList | Self::LoadNote => None,
            Self::Create => Some("Note created!"),
            Self::Update => Some("Note updated successfully"),
            Self::Delete => Some("Note deleted successfully"),
            Self::Summarize => Some("Note summarised"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoadList => "load_list",
            Self::LoadNote => "load_note",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Summarize => "summarize",
        }
    }
}

/// Failure category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteOpErrorKind {
    /// No bearer token; nothing was sent.
    SignInRequired,
    /// Draft rejected before any network call.
    Invalid(DraftError),
    /// Backend answered with a non-success status.
    Backend { status: u16, detail: String },
    /// No usable response (transport failure or undecodable body).
    Transport(String),
}

/// Failure of one note flow. Always recoverable by retrying the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteOpError {
    pub op: NoteOperation,
    pub kind: NoteOpErrorKind,
}

impl NoteOpError {
    pub fn new(op: NoteOperation, kind: NoteOpErrorKind) -> Self {
        Self { op, kind }
    }

    pub fn sign_in_required(op: NoteOperation) -> Self {
        Self::new(op, NoteOpErrorKind::SignInRequired)
    }

    pub fn from_api(op: NoteOperation, err: ApiError) -> Self {
        let kind = match err {
            ApiError::Status { status, .. } => NoteOpErrorKind::Backend {
                status,
                detail: err.detail(),
            },
            ApiError::Transport(_) | ApiError::Decode(_) => {
                NoteOpErrorKind::Transport(err.detail())
            }
        };
        Self::new(op, kind)
    }

    pub fn from_save(op: NoteOperation, err: SaveError<NoteOpError>) -> Self {
        match err {
            SaveError::Draft(draft_err) => Self::new(op, NoteOpErrorKind::Invalid(draft_err)),
            SaveError::Persist(op_err) => op_err,
        }
    }

    pub fn is_sign_in_required(&self) -> bool {
        self.kind == NoteOpErrorKind::SignInRequired
    }

    /// Secondary line under the headline, if any.
    pub fn detail(&self) -> Option<String> {
        match &self.kind {
            NoteOpErrorKind::SignInRequired => None,
            NoteOpErrorKind::Invalid(err) => Some(err.to_string()),
            NoteOpErrorKind::Backend { detail, .. } | NoteOpErrorKind::Transport(detail) => {
                Some(detail.clone())
            }
        }
    }
}

impl Display for NoteOpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_sign_in_required() {
            return f.write_str(self.op.sign_in_message());
        }
        match self.detail() {
            Some(detail) => write!(f, "{} {detail}", self.op.failure_message()),
            None => f.write_str(self.op.failure_message()),
        }
    }
}

impl Error for NoteOpError {}
