//! Human-readable listing of a test set.
//!
//! Areas are printed in path order, questions in key order and answers in
//! file order, so the output is stable for a given tree.

use std::io::Write;

use crate::entities::{Area, Question, TestSet};
use crate::errors::TestSetError;

impl TestSet {
    /// Write the description, version and every area to `out`.
    pub fn show<W: Write>(&self, out: &mut W) -> Result<(), TestSetError> {
        tracing::debug!(root = %self.root().display(), "showing testset");
        writeln!(out, "Description: {}", self.description()?)?;
        writeln!(out, "Version: {}", self.version()?)?;
        writeln!(out, "Areas:")?;
        for area in self.sorted_areas()? {
            area.show(out)?;
        }
        Ok(())
    }

    /// [`TestSet::show`] into a string.
    pub fn render(&self) -> Result<String, TestSetError> {
        let mut out = Vec::new();
        self.show(&mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

impl Area {
    pub fn show<W: Write>(&self, out: &mut W) -> Result<(), TestSetError> {
        writeln!(out, "  - Area: {}", self.name())?;
        writeln!(out, "    Questions to ask: {}", self.questions_to_ask()?)?;
        writeln!(out, "    Questions:")?;
        for question in self.questions().values()? {
            question.show(out)?;
        }
        Ok(())
    }
}

impl Question {
    pub fn show<W: Write>(&self, out: &mut W) -> Result<(), TestSetError> {
        let meta = self.load_meta()?;
        writeln!(out, "      - Type: {}", meta.kind)?;
        writeln!(out, "        Timeout: {}", meta.timeout)?;
        writeln!(out, "        Question: {}", meta.prompt)?;
        writeln!(out, "        Correct: {}", meta.correct)?;
        writeln!(out, "        Answers:")?;
        for (id, text) in &meta.answers {
            writeln!(out, "            {id}) {text}")?;
        }
        Ok(())
    }
}
