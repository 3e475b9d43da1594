use std::io::Write;

use serde::Serialize;

/// Render a serializable response as pretty JSON.
pub fn render_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Print a serializable response as pretty JSON on stdout.
pub fn output_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = render_json(value)?;
    println!("{rendered}");
    Ok(())
}

/// Print plain text lines on stdout unless `quiet` is set.
pub fn output_text(lines: &[String], quiet: bool) -> anyhow::Result<()> {
    if quiet {
        return Ok(());
    }
    let mut stdout = std::io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}
