use std::cell::Cell;

/// A flag that records whether something changed since it was last cleaned.
pub struct Dirty(Cell<bool>);

impl Dirty {
    pub fn clean() -> Self {
        Self(Cell::new(false))
    }

    /// Mark the flag as dirty.
    pub fn smudge(&self) {
        self.0.replace(true);
    }

    pub fn is_dirty(&self) -> bool {
        self.0.get()
    }

    /// Call `f` if the flag is dirty and clean it afterwards. Returns whether `f` was called.
    pub fn if_dirty(&self, mut f: impl FnMut()) -> bool {
        let changed = self.0.get();
        if changed {
            f();
            self.0.replace(false);
        }
        changed
    }
}

impl Default for Dirty {
    fn default() -> Self {
        Self::clean()
    }
}
