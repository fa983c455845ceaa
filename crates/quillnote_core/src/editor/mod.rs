//! Markdown editing primitives behind the note editor toolbar.
//!
//! # Responsibility
//! - Provide pure text-range edits over the draft content buffer.
//! - Map toolbar buttons onto those edits.

pub mod text_range;
pub mod toolbar;
