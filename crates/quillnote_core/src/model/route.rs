//! Note-browsing routes the host navigates between.

use crate::model::note::NoteId;
use std::fmt::{Display, Formatter};

/// Screen currently shown next to the note list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// `/notes`: list only, no note selected.
    #[default]
    Notes,
    /// `/notes/new`: empty editor.
    NewNote,
    /// `/notes/<id>`: one note's detail view.
    Note(NoteId),
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Notes => f.write_str("/notes"),
            Self::NewNote => f.write_str("/notes/new"),
            Self::Note(id) => write!(f, "/notes/{id}"),
        }
    }
}
