//! On-disk file naming for current and legacy test set trees.

use std::path::Path;

use serde::{Deserialize, Serialize};

fn default_metadata_file() -> String {
    "metadata.yaml".to_string()
}

fn default_question_extension() -> String {
    "yaml".to_string()
}

fn default_description_file() -> String {
    "description".to_string()
}

fn default_quota_file() -> String {
    "questions_to_test.txt".to_string()
}

fn default_question_config() -> String {
    "config".to_string()
}

fn default_question_section() -> String {
    "question".to_string()
}

/// File names used by the current (YAML) layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Layout {
    /// Metadata file present in the test set root and in every area.
    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,

    /// Extension (without dot) of question files.
    #[serde(default = "default_question_extension")]
    pub question_extension: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            metadata_file: default_metadata_file(),
            question_extension: default_question_extension(),
        }
    }
}

impl Layout {
    /// File name of the question with `id`.
    #[must_use]
    pub fn question_file(&self, id: &str) -> String {
        format!("{id}.{}", self.question_extension)
    }

    /// Whether `path` is a directory holding a metadata file, i.e. an area.
    #[must_use]
    pub fn is_area_dir(&self, path: &Path) -> bool {
        path.join(&self.metadata_file).is_file()
    }

    /// Question id for `path` if it is a question file, `None` otherwise.
    #[must_use]
    pub fn question_id(&self, path: &Path) -> Option<String> {
        if !path.is_file() {
            return None;
        }
        let file_name = path.file_name()?.to_str()?;
        if file_name == self.metadata_file {
            return None;
        }
        let id = file_name.strip_suffix(&format!(".{}", self.question_extension))?;
        (!id.is_empty()).then(|| id.to_string())
    }
}

/// File names used by the legacy (INI and plain text) layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LegacyLayout {
    /// Plain text file in the root holding the test set description.
    #[serde(default = "default_description_file")]
    pub description_file: String,

    /// Plain text file marking an area and holding its quota.
    #[serde(default = "default_quota_file")]
    pub quota_file: String,

    /// INI file marking a question directory.
    #[serde(default = "default_question_config")]
    pub question_config: String,

    /// INI section holding the question keys.
    #[serde(default = "default_question_section")]
    pub question_section: String,
}

impl Default for LegacyLayout {
    fn default() -> Self {
        Self {
            description_file: default_description_file(),
            quota_file: default_quota_file(),
            question_config: default_question_config(),
            question_section: default_question_section(),
        }
    }
}
