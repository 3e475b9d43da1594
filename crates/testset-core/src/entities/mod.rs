//! Test set entities: `TestSet` → `Area` → `Question`.
//!
//! Every entity is created from a location only. Metadata and children are
//! read on first access and cached for the lifetime of the object.

mod area;
mod question;
mod testset;

use std::path::Path;

pub use area::{Area, AreaMeta, QuestionCollection};
pub use question::{Question, QuestionMeta};
pub use testset::{AreaCollection, TestSet, TestSetMeta};

/// Identity path of a child named `name` under `parent`.
#[must_use]
pub fn child_identity(parent: &str, name: &str) -> String {
    format!("{parent}/{name}")
}

/// Base name of a directory, used as the test set and area name.
///
/// Paths without a final component (such as `.`) are resolved first.
#[must_use]
pub fn dir_name(path: &Path) -> String {
    if let Some(name) = path.file_name() {
        return name.to_string_lossy().into_owned();
    }
    path.canonicalize()
        .ok()
        .and_then(|resolved| resolved.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| path.display().to_string())
}
