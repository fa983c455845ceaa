//! Flutter-facing bindings for the QuillNote client core.

pub mod api;
