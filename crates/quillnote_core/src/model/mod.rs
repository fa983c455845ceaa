//! Domain shapes shared by the client flows.
//!
//! # Responsibility
//! - Define the note shapes exchanged with the backend.
//! - Define the routes that drive list refetches.
//!
//! # Invariants
//! - Notes are owned by the backend; core only decodes what it receives.

pub mod note;
pub mod route;
