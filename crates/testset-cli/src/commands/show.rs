use std::io::Write;
use std::path::Path;

use anyhow::Context;
use testset_config::TestSetConfig;
use testset_core::TestSet;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output_json;

/// Handle `--show`.
///
/// Text output is the indented report; JSON output is the tree snapshot.
/// Both are printed in `--quiet` mode since they are the requested result.
pub fn run(dirname: &Path, config: &TestSetConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let testset = TestSet::with_layout(dirname, config.layout.clone());
    let context = || format!("failed to show {}", dirname.display());

    match flags.format {
        OutputFormat::Json => {
            let snapshot = testset.snapshot().with_context(context)?;
            output_json(&snapshot)
        }
        OutputFormat::Text => {
            // Render fully before printing so a broken file leaves no partial report.
            let report = testset.render().with_context(context)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(report.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
