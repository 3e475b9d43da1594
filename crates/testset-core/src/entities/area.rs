use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::collection::LazyCollection;
use crate::entities::{Question, child_identity, dir_name};
use crate::errors::TestSetError;
use crate::layout::Layout;
use crate::lazy::Lazy;
use crate::structured;

/// Questions of one area, keyed by question id.
pub type QuestionCollection = LazyCollection<String, Question>;

/// Contents of an area's metadata file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AreaMeta {
    /// How many of the area's questions are asked in one run.
    pub questions_to_ask: i64,
}

/// A directory of questions with its own quota.
pub struct Area {
    path: PathBuf,
    name: String,
    identity: String,
    meta_path: PathBuf,
    meta: Lazy<AreaMeta>,
    questions: QuestionCollection,
}

impl Area {
    /// An area rooted at `path`. Neither metadata nor questions are read yet.
    pub fn new(path: impl Into<PathBuf>, testset_identity: &str, layout: &Layout) -> Self {
        let path = path.into();
        tracing::trace!(path = %path.display(), "creating area");
        let name = dir_name(&path);
        let identity = child_identity(testset_identity, &name);

        let membership_layout = layout.clone();
        let factory_layout = layout.clone();
        let dir = path.clone();
        let area_identity = identity.clone();
        let questions = LazyCollection::new(
            &path,
            move |entry: &Path| membership_layout.question_id(entry),
            move |id: &String| {
                Question::new(dir.join(factory_layout.question_file(id)), id, &area_identity)
            },
        );

        Self {
            meta_path: path.join(&layout.metadata_file),
            path,
            name,
            identity,
            meta: Lazy::unloaded(),
            questions,
        }
    }

    /// An area holding `meta` and exactly `questions`; nothing is read from disk.
    ///
    /// Question identities must have been built with [`child_identity`] from
    /// this area's identity.
    pub fn loaded(
        path: impl Into<PathBuf>,
        testset_identity: &str,
        layout: &Layout,
        meta: AreaMeta,
        questions: IndexMap<String, Question>,
    ) -> Self {
        let path = path.into();
        let name = dir_name(&path);
        Self {
            meta_path: path.join(&layout.metadata_file),
            identity: child_identity(testset_identity, &name),
            questions: LazyCollection::loaded(&path, questions),
            path,
            name,
            meta: Lazy::loaded(meta),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory base name. Available without reading metadata.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `{testset}/{area}`.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.meta.is_loaded()
    }

    /// Read the area metadata unless it has been read already.
    pub fn load_meta(&self) -> Result<&AreaMeta, TestSetError> {
        self.meta.get_or_try_load(|| {
            tracing::debug!(path = %self.meta_path.display(), "loading area metadata");
            structured::read(&self.meta_path)
        })
    }

    pub fn questions_to_ask(&self) -> Result<i64, TestSetError> {
        Ok(self.load_meta()?.questions_to_ask)
    }

    #[must_use]
    pub const fn questions(&self) -> &QuestionCollection {
        &self.questions
    }

    /// The question with `id`.
    pub fn question(&self, id: &str) -> Result<&Question, TestSetError> {
        self.questions.get(&id.to_string())
    }

    /// Write the area metadata file. Questions are not written.
    pub fn dump_meta(&self) -> Result<(), TestSetError> {
        tracing::debug!(path = %self.meta_path.display(), "dumping area");
        structured::write(&self.meta_path, self.load_meta()?)
    }
}

impl PartialEq for Area {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Area {}

impl PartialOrd for Area {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Area {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl fmt::Debug for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Area")
            .field("identity", &self.identity)
            .field("path", &self.path)
            .field("meta", &self.meta)
            .field("questions", &self.questions)
            .finish()
    }
}
