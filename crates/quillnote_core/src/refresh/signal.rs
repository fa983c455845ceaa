//! Session-scoped refresh signal shared by note writers and list views.

use log::debug;
use std::cell::Cell;
use std::rc::Rc;

/// Monotonic counter bumped after every successful note write.
///
/// Clones share one counter. The handle is `!Send`: it lives on the UI
/// thread for the lifetime of one note-browsing session.
#[derive(Debug, Clone, Default)]
pub struct RefreshSignal {
    key: Rc<Cell<u64>>,
}

impl RefreshSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current key. Consumers refetch whenever it differs from the key
    /// their last fetch was issued under.
    pub fn key(&self) -> u64 {
        self.key.get()
    }

    /// Increments the key and returns the new value.
    pub fn bump(&self) -> u64 {
        let next = self.key.get().wrapping_add(1);
        self.key.set(next);
        debug!("event=refresh_bump module=refresh status=ok key={next}");
        next
    }
}
