//! General application configuration.

use serde::{Deserialize, Serialize};

/// How operation results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The indented report printed by `--show`.
    #[default]
    Text,
    /// Pretty printed JSON snapshots.
    Json,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Output format used when `--format` is not given.
    #[serde(default)]
    pub output_format: OutputFormat,
}
