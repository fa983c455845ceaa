//! Note flows behind the list, editor and detail screens.
//!
//! # Responsibility
//! - Check for a bearer token before any backend call.
//! - Run list, load, create, update, delete and summarize against a backend.
//! - Bump the session refresh signal after every successful write.
//!
//! # Invariants
//! - A missing token fails with `SignInRequired` and sends nothing.
//! - Failures are always returned to the caller, never swallowed.
//! - There are no automatic retries.

use crate::api::auth::TokenSource;
use crate::api::backend::NotesBackend;
use crate::draft::NoteDraft;
use crate::logging::sanitize_message;
use crate::model::note::{Note, NoteSummary};
use crate::model::route::Route;
use crate::refresh::coordinator::{FetchOutcome, FetchTicket, ListCoordinator};
use crate::refresh::signal::RefreshSignal;
use crate::service::error::{NoteOpError, NoteOperation};
use crate::service::note_view::NoteView;
use log::{debug, info, warn};

const MAX_LOGGED_DETAIL_CHARS: usize = 120;

/// Result alias for note flows.
pub type NoteOpResult<T> = Result<T, NoteOpError>;

/// Note flows for one browsing session.
pub struct NotesService<B: NotesBackend, T: TokenSource> {
    backend: B,
    tokens: T,
    refresh: RefreshSignal,
}

impl<B: NotesBackend, T: TokenSource> NotesService<B, T> {
    /// Creates a service that bumps `refresh` after successful writes.
    pub fn new(backend: B, tokens: T, refresh: RefreshSignal) -> Self {
        Self {
            backend,
            tokens,
            refresh,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Handle to the session refresh signal.
    pub fn refresh_signal(&self) -> &RefreshSignal {
        &self.refresh
    }

    /// Fetches the list when its dependencies changed since the last fetch.
    ///
    /// Returns `Ok(None)` when the visible list is already current.
    pub fn sync_list(&self, list: &mut ListCoordinator) -> NoteOpResult<Option<FetchOutcome>> {
        if !list.needs_fetch() {
            return Ok(None);
        }
        self.fetch_list(list).map(Some)
    }

    /// Issues and resolves one list fetch.
    pub fn fetch_list(&self, list: &mut ListCoordinator) -> NoteOpResult<FetchOutcome> {
        let ticket = list.begin_fetch();
        match self.resolve_fetch(&ticket) {
            Ok(rows) => Ok(list.complete_fetch(&ticket, rows)),
            Err(err) => {
                list.fail_fetch(&ticket);
                Err(err)
            }
        }
    }

    /// Performs the network half of a fetch issued by `begin_fetch`.
    ///
    /// Hosts that overlap fetches call this per ticket and hand the result
    /// to `complete_fetch`, which drops superseded responses.
    pub fn resolve_fetch(&self, ticket: &FetchTicket) -> NoteOpResult<Vec<NoteSummary>> {
        let op = NoteOperation::LoadList;
        let token = self.token(op)?;
        let rows = self
            .backend
            .list_notes(&token, ticket.query())
            .map_err(|err| self.fail(NoteOpError::from_api(op, err)))?;
        info!(
            "event=list_fetch module=service status=ok seq={} count={}",
            ticket.seq(),
            rows.len()
        );
        Ok(rows)
    }

    /// Loads one note for the detail view.
    pub fn load_note(&self, id: &str) -> NoteOpResult<NoteView> {
        let op = NoteOperation::LoadNote;
        let token = self.token(op)?;
        let note = self
            .backend
            .get_note(&token, id)
            .map_err(|err| self.fail(NoteOpError::from_api(op, err)))?;
        info!("event=note_load module=service status=ok note_id={}", note.id);
        Ok(NoteView::new(note))
    }

    /// Saves `draft` as a new note and returns it with the route to open.
    pub fn create_note(&self, draft: &mut NoteDraft) -> NoteOpResult<(Note, Route)> {
        let op = NoteOperation::Create;
        let created = draft
            .save(&self.refresh, |payload| {
                let token = self.token(op)?;
                self.backend
                    .create_note(&token, payload)
                    .map_err(|err| NoteOpError::from_api(op, err))
            })
            .map_err(|err| self.fail(NoteOpError::from_save(op, err)))?;
        info!(
            "event=note_create module=service status=ok note_id={}",
            created.id
        );
        let route = Route::Note(created.id.clone());
        Ok((created, route))
    }

    /// Saves `draft` over the note shown in `view`.
    ///
    /// On success the view shows the returned note.
    pub fn update_note(&self, view: &mut NoteView, draft: &mut NoteDraft) -> NoteOpResult<()> {
        let op = NoteOperation::Update;
        let id = view.note().id.clone();
        let updated = draft
            .save(&self.refresh, |payload| {
                let token = self.token(op)?;
                self.backend
                    .update_note(&token, &id, payload)
                    .map_err(|err| NoteOpError::from_api(op, err))
            })
            .map_err(|err| self.fail(NoteOpError::from_save(op, err)))?;
        info!("event=note_update module=service status=ok note_id={id}");
        view.replace(updated);
        Ok(())
    }

    /// Deletes a note and returns the route to navigate to.
    pub fn delete_note(&self, id: &str) -> NoteOpResult<Route> {
        let op = NoteOperation::Delete;
        let token = self.token(op)?;
        self.backend
            .delete_note(&token, id)
            .map_err(|err| self.fail(NoteOpError::from_api(op, err)))?;
        let key = self.refresh.bump();
        info!("event=note_delete module=service status=ok note_id={id} refresh_key={key}");
        Ok(Route::Notes)
    }

    /// Requests an AI summary for the note in `view`.
    ///
    /// On success the view shows the returned note with its summary. While
    /// an earlier request on the same view is pending this does nothing.
    pub fn summarize_note(&self, view: &mut NoteView) -> NoteOpResult<()> {
        let Some(id) = view.begin_summarize() else {
            debug!("event=note_summarize module=service status=skipped reason=in_flight");
            return Ok(());
        };
        match self.resolve_summary(&id) {
            Ok(summarized) => {
                view.finish_summarize(Some(summarized));
                Ok(())
            }
            Err(err) => {
                view.finish_summarize(None);
                Err(err)
            }
        }
    }

    /// Performs the network half of a summarize started by
    /// `NoteView::begin_summarize`.
    ///
    /// Hosts that keep the view responsive while waiting call this off the
    /// render path and hand the result to `NoteView::finish_summarize`.
    pub fn resolve_summary(&self, id: &str) -> NoteOpResult<Note> {
        let op = NoteOperation::Summarize;
        let token = self.token(op)?;
        let summarized = self
            .backend
            .summarize_note(&token, id)
            .map_err(|err| self.fail(NoteOpError::from_api(op, err)))?;
        info!(
            "event=note_summarize module=service status=ok note_id={} summary_len={}",
            summarized.id,
            summarized.summary.as_deref().map_or(0, str::len)
        );
        Ok(summarized)
    }

    fn token(&self, op: NoteOperation) -> NoteOpResult<String> {
        self.tokens.token().ok_or_else(|| {
            warn!(
                "event=auth_missing module=service status=error op={}",
                op.as_str()
            );
            NoteOpError::sign_in_required(op)
        })
    }

    fn fail(&self, err: NoteOpError) -> NoteOpError {
        if !err.is_sign_in_required() {
            let detail = err.detail().unwrap_or_default();
            warn!(
                "event=note_op module=service status=error op={} detail={}",
                err.op.as_str(),
                sanitize_message(&detail, MAX_LOGGED_DETAIL_CHARS)
            );
        }
        err
    }
}
