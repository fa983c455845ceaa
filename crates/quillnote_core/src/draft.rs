//! In-memory draft for the note being created or edited.
//!
//! # Responsibility
//! - Own title, content and tags for one editing session.
//! - Gate saves on non-empty title and content.
//! - Enforce one in-flight save per draft.
//!
//! # Invariants
//! - Tags keep insertion order, are trimmed, non-empty and unique
//!   (case-sensitive).
//! - A failed save leaves title, content and tags untouched.
//! - The refresh signal is bumped only after a successful save.

use crate::model::note::{Note, NotePayload};
use crate::refresh::signal::RefreshSignal;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons a draft refuses to start a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    /// Title is empty after trimming.
    MissingTitle,
    /// Content is empty after trimming.
    MissingContent,
    /// A previous save has not finished yet.
    SaveInFlight,
}

impl Display for DraftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => f.write_str("title must not be empty"),
            Self::MissingContent => f.write_str("content must not be empty"),
            Self::SaveInFlight => f.write_str("a save is already in progress"),
        }
    }
}

impl Error for DraftError {}

/// Failure of `NoteDraft::save`.
#[derive(Debug)]
pub enum SaveError<E> {
    /// Rejected before any persistence call.
    Draft(DraftError),
    /// The persistence call itself failed.
    Persist(E),
}

impl<E: Display> Display for SaveError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft(err) => write!(f, "{err}"),
            Self::Persist(err) => write!(f, "{err}"),
        }
    }
}

impl<E: Error + 'static> Error for SaveError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Draft(err) => Some(err),
            Self::Persist(err) => Some(err),
        }
    }
}

/// Unsaved note state behind the editor.
///
/// A clone copies the edited values but never the pending-save flag; only
/// the draft that started a save can finish it.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NoteDraft {
    title: String,
    content: String,
    tags: Vec<String>,
    tag_input: String,
    saving: bool,
}

impl Clone for NoteDraft {
    fn clone(&self) -> Self {
        Self {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
            tag_input: self.tag_input.clone(),
            saving: false,
        }
    }
}

impl NoteDraft {
    /// Empty draft for a new note.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft seeded with initial values. Initial tags go through the same
    /// trim/dedupe rules as `add_tag`.
    pub fn with_values(
        title: impl Into<String>,
        content: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        let mut draft = Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        };
        for tag in tags {
            draft.add_tag(&tag);
        }
        draft
    }

    /// Draft for editing an existing note.
    pub fn from_note(note: &Note) -> Self {
        Self::with_values(note.title.clone(), note.content.clone(), note.tags.clone())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Uncommitted text in the tag field.
    pub fn tag_input(&self) -> &str {
        &self.tag_input
    }

    /// Whether a save is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_tag_input(&mut self, value: impl Into<String>) {
        self.tag_input = value.into();
    }

    /// Appends a trimmed tag. Returns `false` for blank or duplicate input.
    pub fn add_tag(&mut self, raw: &str) -> bool {
        let tag = raw.trim();
        if tag.is_empty() || self.tags.iter().any(|existing| existing == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Whether the tag field holds something worth adding.
    pub fn can_add_tag(&self) -> bool {
        !self.tag_input.trim().is_empty()
    }

    /// Adds the tag field's text and clears the field either way.
    pub fn commit_tag_input(&mut self) -> bool {
        let raw = std::mem::take(&mut self.tag_input);
        self.add_tag(&raw)
    }

    /// Checks the save preconditions other than single-flight.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        if self.content.trim().is_empty() {
            return Err(DraftError::MissingContent);
        }
        Ok(())
    }

    /// True iff trimmed title and trimmed content are both non-empty.
    pub fn can_save(&self) -> bool {
        self.validate().is_ok()
    }

    /// Snapshot sent to the backend.
    pub fn payload(&self) -> NotePayload {
        NotePayload {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Marks a save as started and returns the payload to persist.
    ///
    /// # Errors
    /// - `SaveInFlight` while a previous save is pending.
    /// - `MissingTitle` / `MissingContent` when validation fails.
    pub fn begin_save(&mut self) -> Result<NotePayload, DraftError> {
        if self.saving {
            return Err(DraftError::SaveInFlight);
        }
        self.validate()?;
        self.saving = true;
        Ok(self.payload())
    }

    /// Clears the pending flag and bumps `refresh` when `succeeded`.
    pub fn finish_save(&mut self, succeeded: bool, refresh: &RefreshSignal) {
        self.saving = false;
        if succeeded {
            let key = refresh.bump();
            info!(
                "event=draft_save module=draft status=ok tags={} content_len={} refresh_key={key}",
                self.tags.len(),
                self.content.len()
            );
        } else {
            warn!("event=draft_save module=draft status=error");
        }
    }

    /// Runs `persist` on the current snapshot as one single-flight save.
    pub fn save<T, E, F>(&mut self, refresh: &RefreshSignal, persist: F) -> Result<T, SaveError<E>>
    where
        F: FnOnce(&NotePayload) -> Result<T, E>,
    {
        let payload = self.begin_save().map_err(SaveError::Draft)?;
        let result = persist(&payload);
        self.finish_save(result.is_ok(), refresh);
        result.map_err(SaveError::Persist)
    }
}
