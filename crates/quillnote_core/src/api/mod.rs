//! Notes backend access.
//!
//! # Responsibility
//! - Define the backend contract and its failure type.
//! - Provide the HTTP client and bearer token sources.
//!
//! # See also
//! - `service::notes_service` for the user-facing flows built on top.

pub mod auth;
pub mod backend;
pub mod error;
pub mod http;
