use quillnote_core::{
    ApiError, ApiResult, DraftError, FetchOutcome, ListCoordinator, Note, NoteDraft,
    NoteOpErrorKind, NoteOperation, NotePayload, NoteSummary, NotesBackend, NotesService,
    NoteView, RefreshSignal, Route, StaticToken,
};
use std::cell::{Cell, RefCell};

#[derive(Default)]
struct FakeBackend {
    notes: RefCell<Vec<Note>>,
    calls: RefCell<Vec<String>>,
    next_error: RefCell<Option<ApiError>>,
    next_id: Cell<u32>,
}

impl FakeBackend {
    fn with_notes(notes: Vec<Note>) -> Self {
        let backend = Self::default();
        *backend.notes.borrow_mut() = notes;
        backend
    }

    fn fail_next(&self, err: ApiError) {
        *self.next_error.borrow_mut() = Some(err);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) -> ApiResult<()> {
        self.calls.borrow_mut().push(call);
        match self.next_error.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn find(&self, id: &str) -> ApiResult<Note> {
        self.notes
            .borrow()
            .iter()
            .find(|note| note.id == id)
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                body: "note not found".to_string(),
            })
    }
}

impl NotesBackend for FakeBackend {
    fn list_notes(&self, _token: &str, query: &str) -> ApiResult<Vec<NoteSummary>> {
        self.record(format!("GET /notes?q={query}"))?;
        Ok(self
            .notes
            .borrow()
            .iter()
            .filter(|note| note.title.contains(query) || note.content.contains(query))
            .map(NoteSummary::from)
            .collect())
    }

    fn get_note(&self, _token: &str, id: &str) -> ApiResult<Note> {
        self.record(format!("GET /notes/{id}"))?;
        self.find(id)
    }

    fn create_note(&self, _token: &str, payload: &NotePayload) -> ApiResult<Note> {
        self.record("POST /notes".to_string())?;
        self.next_id.set(self.next_id.get() + 1);
        let note = note_from(&format!("new-{}", self.next_id.get()), payload);
        self.notes.borrow_mut().push(note.clone());
        Ok(note)
    }

    fn update_note(&self, _token: &str, id: &str, payload: &NotePayload) -> ApiResult<Note> {
        self.record(format!("PUT /notes/{id}"))?;
        let mut notes = self.notes.borrow_mut();
        let slot = notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(ApiError::Status {
                status: 404,
                body: "note not found".to_string(),
            })?;
        *slot = note_from(id, payload);
        Ok(slot.clone())
    }

    fn delete_note(&self, _token: &str, id: &str) -> ApiResult<()> {
        self.record(format!("DELETE /notes/{id}"))?;
        self.notes.borrow_mut().retain(|note| note.id != id);
        Ok(())
    }

    fn summarize_note(&self, _token: &str, id: &str) -> ApiResult<Note> {
        self.record(format!("POST /notes/{id}/summarize"))?;
        let mut note = self.find(id)?;
        note.summary = Some(format!("summary of {}", note.title));
        Ok(note)
    }
}

fn note_from(id: &str, payload: &NotePayload) -> Note {
    Note {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        title: payload.title.clone(),
        content: payload.content.clone(),
        summary: None,
        tags: payload.tags.clone(),
        created_at: "2024-05-01T10:00:00Z".to_string(),
        updated_at: "2024-05-01T10:00:00Z".to_string(),
    }
}

fn seeded_note(id: &str, title: &str) -> Note {
    note_from(
        id,
        &NotePayload {
            title: title.to_string(),
            content: format!("body of {title}"),
            tags: Vec::new(),
        },
    )
}

fn signed_in(backend: FakeBackend) -> NotesService<FakeBackend, StaticToken> {
    NotesService::new(
        backend,
        StaticToken::new(Some("token-1".to_string())),
        RefreshSignal::new(),
    )
}

#[test]
fn list_sync_fetches_once_per_dependency_change() {
    let service = signed_in(FakeBackend::with_notes(vec![
        seeded_note("a", "rust notes"),
        seeded_note("b", "go notes"),
    ]));
    let mut list = ListCoordinator::new(service.refresh_signal().clone());

    assert_eq!(service.sync_list(&mut list).unwrap(), Some(FetchOutcome::Applied));
    assert_eq!(list.notes().len(), 2);
    assert_eq!(service.sync_list(&mut list).unwrap(), None);

    list.set_query("rust");
    service.sync_list(&mut list).unwrap();
    assert_eq!(list.notes().len(), 1);
    assert_eq!(list.notes()[0].id, "a");

    assert_eq!(
        service.backend().calls(),
        vec!["GET /notes?q=".to_string(), "GET /notes?q=rust".to_string()]
    );
}

#[test]
fn create_bumps_refresh_and_list_refetches() {
    let service = signed_in(FakeBackend::default());
    let mut list = ListCoordinator::new(service.refresh_signal().clone());
    service.sync_list(&mut list).unwrap();
    assert!(list.is_empty_result());

    let mut draft = NoteDraft::new();
    draft.set_title("Groceries");
    draft.set_content("- milk");
    draft.add_tag("home");
    let (created, route) = service.create_note(&mut draft).unwrap();
    assert_eq!(route, Route::Note(created.id.clone()));
    assert_eq!(created.tags, vec!["home".to_string()]);
    assert_eq!(service.refresh_signal().key(), 1);

    assert!(list.needs_fetch());
    service.sync_list(&mut list).unwrap();
    assert_eq!(list.notes()[0].title, "Groceries");
}

#[test]
fn missing_token_fails_before_any_request() {
    let service = NotesService::new(
        FakeBackend::with_notes(vec![seeded_note("a", "x")]),
        StaticToken::signed_out(),
        RefreshSignal::new(),
    );
    let mut list = ListCoordinator::new(service.refresh_signal().clone());

    let err = service.fetch_list(&mut list).unwrap_err();
    assert!(err.is_sign_in_required());
    assert_eq!(err.op, NoteOperation::LoadList);
    assert!(!list.is_loading());

    let mut draft = NoteDraft::with_values("t", "c", Vec::new());
    let err = service.create_note(&mut draft).unwrap_err();
    assert!(err.is_sign_in_required());
    assert!(!draft.is_saving());

    assert!(service.delete_note("a").unwrap_err().is_sign_in_required());
    assert!(service.backend().calls().is_empty());
    assert_eq!(service.refresh_signal().key(), 0);
}

#[test]
fn invalid_draft_is_rejected_without_network() {
    let service = signed_in(FakeBackend::default());
    let mut draft = NoteDraft::with_values("title", "   ", Vec::new());

    let err = service.create_note(&mut draft).unwrap_err();
    assert_eq!(
        err.kind,
        NoteOpErrorKind::Invalid(DraftError::MissingContent)
    );
    assert!(service.backend().calls().is_empty());
}

#[test]
fn failed_update_keeps_draft_and_view() {
    let service = signed_in(FakeBackend::with_notes(vec![seeded_note("a", "Original")]));
    let mut view = service.load_note("a").unwrap();
    let mut draft = NoteDraft::from_note(view.note());
    draft.set_title("Edited");
    draft.add_tag("wip");
    let before = draft.clone();

    service.backend().fail_next(ApiError::Status {
        status: 500,
        body: "database unavailable".to_string(),
    });
    let err = service.update_note(&mut view, &mut draft).unwrap_err();
    assert_eq!(err.to_string(), "Update failed. database unavailable");
    assert_eq!(draft, before);
    assert_eq!(view.note().title, "Original");
    assert_eq!(service.refresh_signal().key(), 0);

    service.update_note(&mut view, &mut draft).unwrap();
    assert_eq!(view.note().title, "Edited");
    assert_eq!(view.note().tags, vec!["wip".to_string()]);
    assert_eq!(service.refresh_signal().key(), 1);
}

#[test]
fn delete_navigates_home_and_refreshes() {
    let service = signed_in(FakeBackend::with_notes(vec![seeded_note("a", "x")]));
    let route = service.delete_note("a").unwrap();
    assert_eq!(route, Route::Notes);
    assert_eq!(service.refresh_signal().key(), 1);

    let err = service.load_note("a").unwrap_err();
    assert_eq!(err.to_string(), "Failed to load note. note not found");
}

#[test]
fn summarize_replaces_viewed_note() {
    let service = signed_in(FakeBackend::with_notes(vec![seeded_note("a", "Plan")]));
    let mut view = service.load_note("a").unwrap();
    assert_eq!(view.summary_display(), "No summary yet");

    service.summarize_note(&mut view).unwrap();
    assert_eq!(view.summary_display(), "summary of Plan");
    assert!(!view.is_summarizing());
}

#[test]
fn summarize_stays_pending_until_resolved() {
    let service = signed_in(FakeBackend::with_notes(vec![seeded_note("a", "Plan")]));
    let mut view = service.load_note("a").unwrap();

    let id = view.begin_summarize().unwrap();
    assert!(view.is_summarizing());
    service.summarize_note(&mut view).unwrap();
    assert!(view.is_summarizing());
    assert!(!service
        .backend()
        .calls()
        .iter()
        .any(|call| call.ends_with("/summarize")));

    let summarized = service.resolve_summary(&id).unwrap();
    assert!(view.is_summarizing());
    view.finish_summarize(Some(summarized));
    assert!(!view.is_summarizing());
    assert_eq!(view.summary_display(), "summary of Plan");
}

#[test]
fn summarize_failure_surfaces_transport_detail() {
    let service = signed_in(FakeBackend::with_notes(vec![seeded_note("a", "Plan")]));
    let mut view: NoteView = service.load_note("a").unwrap();
    service
        .backend()
        .fail_next(ApiError::Transport("connection refused".to_string()));

    let err = service.summarize_note(&mut view).unwrap_err();
    assert_eq!(err.to_string(), "Summarisation failed. connection refused");
    assert!(!view.is_summarizing());
    assert_eq!(view.note().summary, None);
}

#[test]
fn overlapping_fetches_show_only_latest_trigger() {
    let service = signed_in(FakeBackend::with_notes(vec![
        seeded_note("a", "alpha"),
        seeded_note("b", "beta"),
    ]));
    let mut list = ListCoordinator::new(service.refresh_signal().clone());

    list.set_query("alpha");
    let first = list.begin_fetch();
    list.set_query("beta");
    let second = list.begin_fetch();

    let second_rows = service.resolve_fetch(&second).unwrap();
    let first_rows = service.resolve_fetch(&first).unwrap();
    assert_eq!(list.complete_fetch(&second, second_rows), FetchOutcome::Applied);
    assert_eq!(list.complete_fetch(&first, first_rows), FetchOutcome::Stale);

    assert_eq!(list.notes().len(), 1);
    assert_eq!(list.notes()[0].title, "beta");
    assert!(!list.is_loading());
}
