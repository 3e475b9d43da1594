use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use testset_config::TestSetConfig;
use testset_core::TestSet;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::counts;
use crate::output::{output_json, output_text};

#[derive(Debug, Serialize)]
struct LintResponse {
    testset: String,
    valid: bool,
    areas: usize,
    questions: usize,
}

/// Handle `--lint`.
pub fn run(dirname: &Path, config: &TestSetConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let testset = TestSet::with_layout(dirname, config.layout.clone());
    testset
        .lint()
        .with_context(|| format!("lint failed for {}", dirname.display()))?;

    let (areas, questions) = counts(&testset)?;
    tracing::info!(testset = testset.name(), areas, questions, "lint passed");

    let response = LintResponse {
        testset: testset.name().to_string(),
        valid: true,
        areas,
        questions,
    };
    match flags.format {
        OutputFormat::Json => output_json(&response),
        OutputFormat::Text => output_text(
            &[format!(
                "{}: OK ({} areas, {} questions)",
                response.testset, response.areas, response.questions
            )],
            flags.quiet,
        ),
    }
}
