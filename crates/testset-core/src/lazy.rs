//! Load-once cell for lazily populated entity fields.
//!
//! A field is either `Unloaded` or `Loaded(value)`. The transition happens at
//! most once; a failed load leaves the cell `Unloaded` so the next access
//! retries.

use std::cell::OnceCell;
use std::fmt;

/// Two-state memo cell: unloaded until the first successful load.
pub struct Lazy<T> {
    cell: OnceCell<T>,
}

impl<T> Lazy<T> {
    /// An empty cell that will load on first access.
    #[must_use]
    pub const fn unloaded() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// A cell that is already loaded with `value`.
    #[must_use]
    pub fn loaded(value: T) -> Self {
        Self {
            cell: OnceCell::from(value),
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// The loaded value, without triggering a load.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Return the loaded value, running `load` first if the cell is unloaded.
    ///
    /// `load` runs only while the cell is unloaded. On error nothing is
    /// stored.
    pub fn get_or_try_load<E>(&self, load: impl FnOnce() -> Result<T, E>) -> Result<&T, E> {
        if let Some(value) = self.cell.get() {
            return Ok(value);
        }
        let value = load()?;
        Ok(self.cell.get_or_init(|| value))
    }
}

impl<T> Default for Lazy<T> {
    fn default() -> Self {
        Self::unloaded()
    }
}

impl<T: fmt::Debug> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => f.debug_tuple("Loaded").field(value).finish(),
            None => f.write_str("Unloaded"),
        }
    }
}
