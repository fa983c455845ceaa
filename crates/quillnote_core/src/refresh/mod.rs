//! Cross-component list refresh.
//!
//! # Responsibility
//! - Share one refresh counter between note writers and list views.
//! - Coordinate list fetches against query, route and refresh changes.

pub mod coordinator;
pub mod signal;
