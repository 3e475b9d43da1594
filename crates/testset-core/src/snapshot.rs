//! Serializable capture of a fully loaded test set, used for JSON output.

use indexmap::IndexMap;
use serde::Serialize;

use crate::entities::{Area, Question, TestSet};
use crate::errors::TestSetError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestSetSnapshot {
    pub name: String,
    pub description: String,
    pub version: i64,
    pub areas: Vec<AreaSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaSnapshot {
    pub name: String,
    pub identity: String,
    pub questions_to_ask: i64,
    pub questions: Vec<QuestionSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSnapshot {
    pub id: String,
    pub identity: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub timeout: i64,
    pub question: String,
    pub answers: IndexMap<String, String>,
    pub correct: String,
}

impl TestSet {
    /// Load everything and capture it, in the same order as [`TestSet::show`].
    pub fn snapshot(&self) -> Result<TestSetSnapshot, TestSetError> {
        let areas = self
            .sorted_areas()?
            .into_iter()
            .map(Area::snapshot)
            .collect::<Result<_, _>>()?;
        Ok(TestSetSnapshot {
            name: self.name().to_string(),
            description: self.description()?.to_string(),
            version: self.version()?,
            areas,
        })
    }
}

impl Area {
    pub fn snapshot(&self) -> Result<AreaSnapshot, TestSetError> {
        let questions = self
            .questions()
            .values()?
            .into_iter()
            .map(Question::snapshot)
            .collect::<Result<_, _>>()?;
        Ok(AreaSnapshot {
            name: self.name().to_string(),
            identity: self.identity().to_string(),
            questions_to_ask: self.questions_to_ask()?,
            questions,
        })
    }
}

impl Question {
    pub fn snapshot(&self) -> Result<QuestionSnapshot, TestSetError> {
        let meta = self.load_meta()?;
        Ok(QuestionSnapshot {
            id: self.id().to_string(),
            identity: self.identity().to_string(),
            kind: meta.kind.clone(),
            timeout: meta.timeout,
            question: meta.prompt.clone(),
            answers: meta.answers.clone(),
            correct: meta.correct.clone(),
        })
    }
}
