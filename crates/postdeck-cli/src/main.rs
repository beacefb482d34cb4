// Postdeck CLI entry point

use std::io::Write;

use anyhow::Context;
use postdeck_cli::{output, CommandRouter};

fn main() -> anyhow::Result<()> {
    let report = match CommandRouter::route() {
        Ok(report) => report,
        Err(e) => {
            output::print_error(&e.user_message());
            tracing::debug!(details = %e.technical_details(), "Command failed");
            std::process::exit(1);
        }
    };

    if !report.is_empty() {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", report).context("Failed to write command output")?;
    }
    Ok(())
}
