use testset_config::TestSetConfig;

use crate::cli::{Cli, GlobalFlags};
use crate::commands;

/// Run the requested operations in order: convert, lint, show.
///
/// Convert goes first so a freshly written tree can be checked in the same
/// invocation. Each later operation reopens the tree from disk.
pub fn dispatch(cli: &Cli, config: &TestSetConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !cli.has_operation() {
        tracing::warn!("no operation requested; pass --lint, --show or --convert");
        return Ok(());
    }

    if let Some(from) = &cli.convert {
        commands::convert::run(from, &cli.dirname, config, flags)?;
    }
    if cli.lint {
        commands::lint::run(&cli.dirname, config, flags)?;
    }
    if cli.show {
        commands::show::run(&cli.dirname, config, flags)?;
    }
    Ok(())
}
