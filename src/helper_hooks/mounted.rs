use std::{cell::Cell, rc::Rc};

/// Whether the component owning a load site is still alive.
///
/// Cheap to clone: every clone observes the same flag. Once
/// [`MountTracker::unmount`] is called the flag stays false.
#[derive(Debug, Clone)]
pub struct MountTracker(Rc<Cell<bool>>);

impl MountTracker {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_mounted(&self) -> bool {
        self.0.get()
    }

    pub fn unmount(&self) {
        self.0.set(false);
    }
}

impl Default for MountTracker {
    fn default() -> Self {
        Self::new()
    }
}
