//! User-facing note flows.
//!
//! # Responsibility
//! - Orchestrate token checks, backend calls and refresh bumps.
//! - Translate backend failures into per-flow user messages.

pub mod error;
pub mod note_view;
pub mod notes_service;
