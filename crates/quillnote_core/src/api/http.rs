//! HTTP implementation of the notes backend.
//!
//! # Responsibility
//! - Issue authenticated JSON requests against the configured base URL.
//! - Map non-success statuses to `ApiError::Status` with the body text.
//!
//! # Invariants
//! - Every request is bounded by the configured global timeout.
//! - Tokens and note bodies are never logged.

use crate::api::backend::NotesBackend;
use crate::api::error::{ApiError, ApiResult};
use crate::config::ClientConfig;
use crate::model::note::{Note, NotePayload, NoteSummary};
use log::debug;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use ureq::http::Response;
use ureq::{Agent, Body};

/// `ureq`-backed client for the notes API.
#[derive(Clone)]
pub struct HttpNotesBackend {
    base_url: String,
    agent: Agent,
}

impl HttpNotesBackend {
    /// Creates a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent: config.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl NotesBackend for HttpNotesBackend {
    fn list_notes(&self, token: &str, query: &str) -> ApiResult<Vec<NoteSummary>> {
        let started = Instant::now();
        let response = self
            .agent
            .get(&self.url("/notes"))
            .query("q", query)
            .header("Accept", "application/json")
            .header("Authorization", &bearer(token))
            .call()?;
        log_response("GET", "/notes", &response, started);
        read_json(response)
    }

    fn get_note(&self, token: &str, id: &str) -> ApiResult<Note> {
        let path = note_path(id, "");
        let started = Instant::now();
        let response = self
            .agent
            .get(&self.url(&path))
            .header("Accept", "application/json")
            .header("Authorization", &bearer(token))
            .call()?;
        log_response("GET", &path, &response, started);
        read_json(response)
    }

    fn create_note(&self, token: &str, payload: &NotePayload) -> ApiResult<Note> {
        let started = Instant::now();
        let response = self
            .agent
            .post(&self.url("/notes"))
            .header("Accept", "application/json")
            .header("Authorization", &bearer(token))
            .send_json(payload)?;
        log_response("POST", "/notes", &response, started);
        read_json(response)
    }

    fn update_note(&self, token: &str, id: &str, payload: &NotePayload) -> ApiResult<Note> {
        let path = note_path(id, "");
        let started = Instant::now();
        let response = self
            .agent
            .put(&self.url(&path))
            .header("Accept", "application/json")
            .header("Authorization", &bearer(token))
            .send_json(payload)?;
        log_response("PUT", &path, &response, started);
        read_json(response)
    }

    fn delete_note(&self, token: &str, id: &str) -> ApiResult<()> {
        let path = note_path(id, "");
        let started = Instant::now();
        let response = self
            .agent
            .delete(&self.url(&path))
            .header("Authorization", &bearer(token))
            .call()?;
        log_response("DELETE", &path, &response, started);
        ensure_success(response).map(|_| ())
    }

    fn summarize_note(&self, token: &str, id: &str) -> ApiResult<Note> {
        let path = note_path(id, "/summarize");
        let started = Instant::now();
        let response = self
            .agent
            .post(&self.url(&path))
            .header("Accept", "application/json")
            .header("Authorization", &bearer(token))
            .send_empty()?;
        log_response("POST", &path, &response, started);
        read_json(response)
    }
}

/// `/notes/<id><suffix>` with `id` encoded as a single path segment.
fn note_path(id: &str, suffix: &str) -> String {
    format!("/notes/{}{suffix}", urlencoding::encode(id))
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn ensure_success(response: Response<Body>) -> ApiResult<Response<Body>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    // An unreadable error body still reports the status.
    let body = response
        .into_body()
        .read_to_string()
        .unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

fn read_json<T: DeserializeOwned>(response: Response<Body>) -> ApiResult<T> {
    let response = ensure_success(response)?;
    response
        .into_body()
        .read_json::<T>()
        .map_err(|err| ApiError::Decode(err.to_string()))
}

fn log_response(method: &str, path: &str, response: &Response<Body>, started: Instant) {
    debug!(
        "event=api_call module=api method={} path={} status={} elapsed_ms={}",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
}
