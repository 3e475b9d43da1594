//! Legacy → current tree conversion.
//!
//! Each area and each question is converted independently. A child that
//! fails is logged, recorded in [`Conversion::skipped`] and left out of the
//! target tree; its siblings still convert. Failures at the test set level
//! (bad source, missing description, occupied target) abort the conversion.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use testset_core::entities::{child_identity, dir_name};
use testset_core::{Area, AreaMeta, Layout, LegacyLayout, Question, TestSet, TestSetMeta};

use crate::error::ConvertError;
use crate::source;

/// Version written to every converted test set; legacy trees are unversioned.
pub const CONVERTED_VERSION: i64 = 1;

/// A legacy area or question that was left out of the target tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub source: PathBuf,
    pub reason: String,
}

/// Result of a conversion: the written tree, fully loaded, and what was skipped.
#[derive(Debug)]
pub struct Conversion {
    pub testset: TestSet,
    pub skipped: Vec<Skipped>,
}

/// Converts legacy trees into the current layout.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    layout: Layout,
    legacy: LegacyLayout,
}

impl Converter {
    #[must_use]
    pub const fn new(layout: Layout, legacy: LegacyLayout) -> Self {
        Self { layout, legacy }
    }

    /// Convert the legacy tree at `from` into a new tree at `to`.
    ///
    /// `to` is created when missing. It must differ from `from` and must not
    /// already hold a test set metadata file or any of the area directories.
    pub fn convert(&self, from: &Path, to: &Path) -> Result<Conversion, ConvertError> {
        tracing::info!(from = %from.display(), to = %to.display(), "converting testset");

        if !from.is_dir() {
            return Err(ConvertError::InvalidSource {
                path: from.to_path_buf(),
            });
        }
        fs::create_dir_all(to).map_err(|source| ConvertError::CreateDir {
            path: to.to_path_buf(),
            source,
        })?;
        if same_dir(from, to) {
            return Err(ConvertError::TargetCollision {
                path: to.to_path_buf(),
            });
        }
        let meta_path = to.join(&self.layout.metadata_file);
        if meta_path.exists() {
            return Err(ConvertError::TargetCollision { path: meta_path });
        }

        let legacy_areas = legacy_children(from, |dir| source::is_area(dir, &self.legacy))?;
        if let Some(occupied) = legacy_areas
            .iter()
            .map(|(name, _)| to.join(name))
            .find(|target| target.exists())
        {
            return Err(ConvertError::TargetCollision { path: occupied });
        }

        let description = source::read_description(from, &self.legacy)?;
        let identity = dir_name(to);

        let mut skipped = Vec::new();
        let mut areas = IndexMap::new();
        for (name, legacy_area) in legacy_areas {
            match self.convert_area(&legacy_area, &to.join(&name), &identity, &mut skipped) {
                Ok(area) => {
                    areas.insert(name, area);
                }
                Err(error) => skip(&mut skipped, legacy_area, &error),
            }
        }

        let testset = TestSet::loaded(
            to,
            self.layout.clone(),
            TestSetMeta {
                description,
                version: CONVERTED_VERSION,
            },
            areas,
        );
        testset.dump_meta()?;

        tracing::info!(
            areas = testset.areas().len()?,
            skipped = skipped.len(),
            "conversion finished"
        );
        Ok(Conversion { testset, skipped })
    }

    fn convert_area(
        &self,
        from: &Path,
        to: &Path,
        testset_identity: &str,
        skipped: &mut Vec<Skipped>,
    ) -> Result<Area, ConvertError> {
        tracing::info!(from = %from.display(), to = %to.display(), "converting area");
        let questions_to_ask = source::read_quota(from, &self.legacy)?;

        fs::create_dir(to).map_err(|source| {
            if source.kind() == io::ErrorKind::AlreadyExists {
                ConvertError::TargetCollision {
                    path: to.to_path_buf(),
                }
            } else {
                ConvertError::CreateDir {
                    path: to.to_path_buf(),
                    source,
                }
            }
        })?;

        let area_identity = child_identity(testset_identity, &dir_name(to));
        let mut questions = IndexMap::new();
        for (id, legacy_question) in
            legacy_children(from, |dir| source::is_question(dir, &self.legacy))?
        {
            let file_name = self.layout.question_file(&id);
            if file_name == self.layout.metadata_file {
                let error = ConvertError::TargetCollision {
                    path: to.join(file_name),
                };
                skip(skipped, legacy_question, &error);
                continue;
            }
            match self.convert_question(&legacy_question, &to.join(file_name), &id, &area_identity)
            {
                Ok(question) => {
                    questions.insert(id, question);
                }
                Err(error) => skip(skipped, legacy_question, &error),
            }
        }

        let area = Area::loaded(
            to,
            testset_identity,
            &self.layout,
            AreaMeta { questions_to_ask },
            questions,
        );
        area.dump_meta()?;
        Ok(area)
    }

    fn convert_question(
        &self,
        from: &Path,
        to: &Path,
        id: &str,
        area_identity: &str,
    ) -> Result<Question, ConvertError> {
        tracing::info!(from = %from.display(), to = %to.display(), "converting question");
        let meta = source::read_question(from, &self.legacy)?;
        let question = Question::loaded(to, id, area_identity, meta);
        question.dump_meta()?;
        Ok(question)
    }
}

/// Convert with the default current and legacy layouts.
pub fn convert(from: &Path, to: &Path) -> Result<Conversion, ConvertError> {
    Converter::default().convert(from, to)
}

fn skip(skipped: &mut Vec<Skipped>, source: PathBuf, error: &ConvertError) {
    tracing::warn!(source = %source.display(), %error, "skipping legacy entry");
    skipped.push(Skipped {
        source,
        reason: error.to_string(),
    });
}

/// Whether both paths name the same existing directory.
fn same_dir(a: &Path, b: &Path) -> bool {
    matches!(
        (fs::canonicalize(a), fs::canonicalize(b)),
        (Ok(a), Ok(b)) if a == b
    )
}

/// Subdirectories of `dir` accepted by `is_member`, sorted by name.
fn legacy_children(
    dir: &Path,
    is_member: impl Fn(&Path) -> bool,
) -> Result<Vec<(String, PathBuf)>, ConvertError> {
    let listing = fs::read_dir(dir).map_err(|error| ConvertError::from_read(dir, error))?;
    let mut children = Vec::new();
    for entry in listing {
        let entry = entry.map_err(|error| ConvertError::from_read(dir, error))?;
        let path = entry.path();
        if path.is_dir() && is_member(&path) {
            children.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    children.sort();
    Ok(children)
}
