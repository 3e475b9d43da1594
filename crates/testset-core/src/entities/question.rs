use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entities::child_identity;
use crate::errors::TestSetError;
use crate::lazy::Lazy;
use crate::structured::{self, scalar_map, scalar_string};

/// Contents of a question file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionMeta {
    /// Question kind tag. Only `abc` (single correct answer) is supported.
    #[serde(rename = "type")]
    pub kind: String,
    /// Seconds allowed to answer.
    pub timeout: i64,
    /// Prompt text, may contain markup.
    #[serde(rename = "question")]
    pub prompt: String,
    /// Answer id to answer text, in file order.
    #[serde(deserialize_with = "scalar_map")]
    pub answers: IndexMap<String, String>,
    /// Id of the correct answer.
    #[serde(deserialize_with = "scalar_string")]
    pub correct: String,
}

/// A single multiple-choice question stored in `<area>/<id>.yaml`.
pub struct Question {
    path: PathBuf,
    id: String,
    identity: String,
    meta: Lazy<QuestionMeta>,
}

impl Question {
    /// A question whose metadata will be read from `path` on first access.
    pub fn new(path: impl Into<PathBuf>, id: &str, area_identity: &str) -> Self {
        let path = path.into();
        tracing::trace!(path = %path.display(), "creating question");
        Self {
            path,
            id: id.to_string(),
            identity: child_identity(area_identity, id),
            meta: Lazy::unloaded(),
        }
    }

    /// A question that already holds `meta`; nothing is read from disk.
    pub fn loaded(path: impl Into<PathBuf>, id: &str, area_identity: &str, meta: QuestionMeta) -> Self {
        Self {
            path: path.into(),
            id: id.to_string(),
            identity: child_identity(area_identity, id),
            meta: Lazy::loaded(meta),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `{testset}/{area}/{id}`.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.meta.is_loaded()
    }

    /// Read the question file unless it has been read already.
    pub fn load_meta(&self) -> Result<&QuestionMeta, TestSetError> {
        self.meta.get_or_try_load(|| {
            tracing::debug!(path = %self.path.display(), "loading question metadata");
            structured::read(&self.path)
        })
    }

    pub fn kind(&self) -> Result<&str, TestSetError> {
        Ok(&self.load_meta()?.kind)
    }

    pub fn timeout(&self) -> Result<i64, TestSetError> {
        Ok(self.load_meta()?.timeout)
    }

    pub fn prompt(&self) -> Result<&str, TestSetError> {
        Ok(&self.load_meta()?.prompt)
    }

    pub fn answers(&self) -> Result<&IndexMap<String, String>, TestSetError> {
        Ok(&self.load_meta()?.answers)
    }

    pub fn correct(&self) -> Result<&str, TestSetError> {
        Ok(&self.load_meta()?.correct)
    }

    /// Write the metadata back to the question file.
    pub fn dump_meta(&self) -> Result<(), TestSetError> {
        tracing::debug!(path = %self.path.display(), "dumping question");
        structured::write(&self.path, self.load_meta()?)
    }
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("identity", &self.identity)
            .field("path", &self.path)
            .field("meta", &self.meta)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    const QUESTION: &str = "type: abc\ntimeout: 30\nquestion: Pick b\nanswers:\n  b: this one\n  a: not this\ncorrect: b\n";

    #[test]
    fn new_question_is_unloaded_until_accessed() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("1.yaml");
        fs::write(&path, QUESTION).unwrap();

        let question = Question::new(&path, "1", "set/area");
        assert!(!question.is_loaded());
        assert_eq!(question.identity(), "set/area/1");

        assert_eq!(question.timeout().unwrap(), 30);
        assert!(question.is_loaded());
        assert_eq!(question.kind().unwrap(), "abc");
        assert_eq!(question.prompt().unwrap(), "Pick b");
        assert_eq!(question.correct().unwrap(), "b");
        let ids: Vec<_> = question.answers().unwrap().keys().cloned().collect();
        assert_eq!(ids, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn non_integer_timeout_is_malformed_and_leaves_question_unloaded() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("1.yaml");
        fs::write(&path, QUESTION.replace("timeout: 30", "timeout: soon")).unwrap();

        let question = Question::new(&path, "1", "set/area");
        assert!(matches!(
            question.timeout(),
            Err(TestSetError::MalformedMetadata { .. })
        ));
        assert!(!question.is_loaded());

        fs::write(&path, QUESTION).unwrap();
        assert_eq!(question.timeout().unwrap(), 30);
    }

    #[test]
    fn missing_key_is_malformed() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("1.yaml");
        fs::write(&path, "type: abc\ntimeout: 30\n").unwrap();

        let question = Question::new(&path, "1", "set/area");
        let error = question.load_meta().unwrap_err();
        assert!(matches!(error, TestSetError::MalformedMetadata { .. }));
    }

    #[test]
    fn dump_writes_loaded_meta() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("9.yaml");
        let mut answers = IndexMap::new();
        answers.insert("a".to_string(), "yes".to_string());
        let meta = QuestionMeta {
            kind: "abc".to_string(),
            timeout: 10,
            prompt: "Really?".to_string(),
            answers,
            correct: "a".to_string(),
        };

        Question::loaded(&path, "9", "set/area", meta.clone())
            .dump_meta()
            .unwrap();

        let reread = Question::new(&path, "9", "set/area");
        assert_eq!(reread.load_meta().unwrap(), &meta);
    }
}
