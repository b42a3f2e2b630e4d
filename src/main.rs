//! pcmedit CLI
//!
//! Command-line interface for the pcmedit sample-buffer editor.

use clap::Parser;
use env_logger::Env;
use log::info;

use pcmedit::cli::{commands, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("pcmedit v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = commands::run(cli.command) {
        for suggestion in e.recovery_suggestions() {
            eprintln!("hint: {}", suggestion);
        }
        let code = e.error_code();
        return Err(anyhow::Error::new(e).context(format!("pcmedit failed [{}]", code)));
    }
    Ok(())
}
