use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use testset_config::TestSetConfig;
use testset_legacy::{Conversion, Converter};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::counts;
use crate::output::{output_json, output_text};

#[derive(Debug, Serialize)]
struct SkippedEntry {
    source: PathBuf,
    reason: String,
}

#[derive(Debug, Serialize)]
struct ConvertResponse {
    from: PathBuf,
    to: PathBuf,
    areas: usize,
    questions: usize,
    skipped: Vec<SkippedEntry>,
}

impl ConvertResponse {
    fn new(from: &Path, to: &Path, conversion: Conversion) -> anyhow::Result<Self> {
        let (areas, questions) = counts(&conversion.testset)?;
        Ok(Self {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            areas,
            questions,
            skipped: conversion
                .skipped
                .into_iter()
                .map(|skipped| SkippedEntry {
                    source: skipped.source,
                    reason: skipped.reason,
                })
                .collect(),
        })
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Converted {} into {}: {} areas, {} questions, {} skipped",
            self.from.display(),
            self.to.display(),
            self.areas,
            self.questions,
            self.skipped.len()
        )];
        lines.extend(
            self.skipped
                .iter()
                .map(|entry| format!("  skipped {}: {}", entry.source.display(), entry.reason)),
        );
        lines
    }
}

/// Handle `--convert FROM`, writing the converted tree into `to`.
pub fn run(
    from: &Path,
    to: &Path,
    config: &TestSetConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let converter = Converter::new(config.layout.clone(), config.legacy.clone());
    let conversion = converter
        .convert(from, to)
        .with_context(|| format!("failed to convert {} into {}", from.display(), to.display()))?;

    let response = ConvertResponse::new(from, to, conversion)?;
    match flags.format {
        OutputFormat::Json => output_json(&response),
        OutputFormat::Text => output_text(&response.lines(), flags.quiet),
    }
}
