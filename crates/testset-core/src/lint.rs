//! Fail-fast validation of a test set tree.
//!
//! `TestSet::lint` walks areas in path order and each area's questions in key
//! order. The first broken rule is returned as
//! [`TestSetError::InvariantViolation`]; nothing further is checked.

use std::fmt;

use crate::entities::{Area, Question, TestSet};
use crate::errors::TestSetError;

/// The only question kind currently supported.
pub const SUPPORTED_KIND: &str = "abc";

/// A content rule that a test set, area or question broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintRule {
    NonPositiveVersion { version: i64 },
    NoAreas,
    EmptyAreaName,
    NonPositiveQuota { questions_to_ask: i64 },
    QuotaExceedsQuestions { questions_to_ask: i64, available: usize },
    UnsupportedKind { kind: String },
    NonPositiveTimeout { timeout: i64 },
    EmptyPrompt,
    NoAnswers,
    AnswerIdNotSingleChar { id: String },
    CorrectNotInAnswers { correct: String },
}

impl fmt::Display for LintRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveVersion { version } => {
                write!(f, "version must be positive, got {version}")
            }
            Self::NoAreas => f.write_str("testset has no areas"),
            Self::EmptyAreaName => f.write_str("area name is empty"),
            Self::NonPositiveQuota { questions_to_ask } => {
                write!(f, "questions_to_ask must be positive, got {questions_to_ask}")
            }
            Self::QuotaExceedsQuestions {
                questions_to_ask,
                available,
            } => write!(
                f,
                "questions_to_ask is {questions_to_ask} but only {available} questions exist"
            ),
            Self::UnsupportedKind { kind } => {
                write!(f, "question type '{kind}' is not supported (expected '{SUPPORTED_KIND}')")
            }
            Self::NonPositiveTimeout { timeout } => {
                write!(f, "timeout must be positive, got {timeout}")
            }
            Self::EmptyPrompt => f.write_str("question text is empty"),
            Self::NoAnswers => f.write_str("question has no answers"),
            Self::AnswerIdNotSingleChar { id } => {
                write!(f, "answer id '{id}' must be a single character")
            }
            Self::CorrectNotInAnswers { correct } => {
                write!(f, "correct answer '{correct}' is not one of the answers")
            }
        }
    }
}

fn ensure(condition: bool, identity: &str, rule: impl FnOnce() -> LintRule) -> Result<(), TestSetError> {
    if condition {
        Ok(())
    } else {
        Err(TestSetError::InvariantViolation {
            identity: identity.to_string(),
            rule: rule(),
        })
    }
}

impl TestSet {
    /// Validate the whole tree, stopping at the first violation.
    pub fn lint(&self) -> Result<(), TestSetError> {
        tracing::debug!(root = %self.root().display(), "linting testset");
        let version = self.version()?;
        ensure(version > 0, self.identity(), || LintRule::NonPositiveVersion {
            version,
        })?;
        ensure(!self.areas().is_empty()?, self.identity(), || LintRule::NoAreas)?;

        for area in self.sorted_areas()? {
            area.lint()?;
        }
        Ok(())
    }
}

impl Area {
    /// Validate the area and then each of its questions.
    pub fn lint(&self) -> Result<(), TestSetError> {
        tracing::debug!(path = %self.path().display(), "linting area");
        ensure(!self.name().is_empty(), self.identity(), || {
            LintRule::EmptyAreaName
        })?;

        let questions_to_ask = self.questions_to_ask()?;
        ensure(questions_to_ask > 0, self.identity(), || {
            LintRule::NonPositiveQuota { questions_to_ask }
        })?;

        let available = self.questions().len()?;
        let within_quota = usize::try_from(questions_to_ask).is_ok_and(|quota| quota <= available);
        ensure(within_quota, self.identity(), || {
            LintRule::QuotaExceedsQuestions {
                questions_to_ask,
                available,
            }
        })?;

        for question in self.questions().values()? {
            question.lint()?;
        }
        Ok(())
    }
}

impl Question {
    /// Validate the question's own content.
    pub fn lint(&self) -> Result<(), TestSetError> {
        tracing::debug!(path = %self.path().display(), "linting question");
        let meta = self.load_meta()?;
        let identity = self.identity();

        ensure(meta.kind == SUPPORTED_KIND, identity, || {
            LintRule::UnsupportedKind {
                kind: meta.kind.clone(),
            }
        })?;
        ensure(meta.timeout > 0, identity, || LintRule::NonPositiveTimeout {
            timeout: meta.timeout,
        })?;
        ensure(!meta.prompt.is_empty(), identity, || LintRule::EmptyPrompt)?;
        ensure(!meta.answers.is_empty(), identity, || LintRule::NoAnswers)?;
        if let Some(id) = meta.answers.keys().find(|id| id.chars().count() != 1) {
            return Err(TestSetError::InvariantViolation {
                identity: identity.to_string(),
                rule: LintRule::AnswerIdNotSingleChar { id: id.clone() },
            });
        }
        ensure(meta.answers.contains_key(&meta.correct), identity, || {
            LintRule::CorrectNotInAnswers {
                correct: meta.correct.clone(),
            }
        })
    }
}
