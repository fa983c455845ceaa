//! Note list query state and stale-response handling.
//!
//! # Responsibility
//! - Hold the committed search query, the current route and the refresh key.
//! - Decide when the list must be refetched.
//! - Apply fetch results in trigger order, discarding superseded responses.
//!
//! # Invariants
//! - A change in any of `(query, refresh key, route)` requires a new fetch.
//! - Every fetch gets a strictly increasing sequence number.
//! - Only the latest issued fetch may change the visible list or clear the
//!   loading flag.

use crate::model::note::NoteSummary;
use crate::model::route::Route;
use crate::refresh::signal::RefreshSignal;
use log::{debug, info};

/// Dependency triple a list fetch is issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchDeps {
    pub query: String,
    pub refresh_key: u64,
    pub route: Route,
}

/// Handle for one in-flight list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: String,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Query text the fetch must send.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The ticket was the latest; its result is now visible.
    Applied,
    /// A newer fetch was issued; the result was dropped.
    Stale,
}

/// List-side coordinator for one note-browsing session.
#[derive(Debug)]
pub struct ListCoordinator {
    query: String,
    route: Route,
    refresh: RefreshSignal,
    issued_seq: u64,
    issued_deps: Option<FetchDeps>,
    notes: Vec<NoteSummary>,
    loading: bool,
}

impl ListCoordinator {
    /// Creates a coordinator observing `refresh`.
    pub fn new(refresh: RefreshSignal) -> Self {
        Self {
            query: String::new(),
            route: Route::default(),
            refresh,
            issued_seq: 0,
            issued_deps: None,
            notes: Vec::new(),
            loading: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn refresh_key(&self) -> u64 {
        self.refresh.key()
    }

    /// Visible list from the latest applied fetch.
    pub fn notes(&self) -> &[NoteSummary] {
        &self.notes
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True when the list is settled and empty ("No notes found.").
    pub fn is_empty_result(&self) -> bool {
        !self.loading && self.notes.is_empty()
    }

    /// Replaces the committed query verbatim.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Resets the committed query to empty.
    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn set_route(&mut self, route: Route) {
        self.route = route;
    }

    /// Bumps the shared refresh signal.
    pub fn bump(&self) -> u64 {
        self.refresh.bump()
    }

    pub fn deps(&self) -> FetchDeps {
        FetchDeps {
            query: self.query.clone(),
            refresh_key: self.refresh.key(),
            route: self.route.clone(),
        }
    }

    /// Whether the dependency triple changed since the last issued fetch.
    pub fn needs_fetch(&self) -> bool {
        self.issued_deps.as_ref() != Some(&self.deps())
    }

    /// Issues a new fetch, superseding any still in flight.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let deps = self.deps();
        self.issued_seq += 1;
        self.loading = true;
        debug!(
            "event=list_fetch_begin module=refresh status=ok seq={} query_len={} refresh_key={} route={}",
            self.issued_seq,
            deps.query.len(),
            deps.refresh_key,
            deps.route
        );
        let ticket = FetchTicket {
            seq: self.issued_seq,
            query: deps.query.clone(),
        };
        self.issued_deps = Some(deps);
        ticket
    }

    pub fn is_latest(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.issued_seq
    }

    /// Applies a successful fetch result if `ticket` is still the latest.
    pub fn complete_fetch(&mut self, ticket: &FetchTicket, notes: Vec<NoteSummary>) -> FetchOutcome {
        if !self.is_latest(ticket) {
            info!(
                "event=list_fetch_discard module=refresh status=stale seq={} latest_seq={}",
                ticket.seq, self.issued_seq
            );
            return FetchOutcome::Stale;
        }
        debug!(
            "event=list_fetch_apply module=refresh status=ok seq={} count={}",
            ticket.seq,
            notes.len()
        );
        self.notes = notes;
        self.loading = false;
        FetchOutcome::Applied
    }

    /// Settles a failed fetch. The visible list keeps its previous rows.
    pub fn fail_fetch(&mut self, ticket: &FetchTicket) -> FetchOutcome {
        if !self.is_latest(ticket) {
            return FetchOutcome::Stale;
        }
        self.loading = false;
        FetchOutcome::Applied
    }
}
