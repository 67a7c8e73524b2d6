//! Main entry point for RustyGuard.
//!
//! Parses arguments and loads settings, then either runs a single check and
//! prints the result, or starts the TUI and restores the terminal on exit.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use rusty_guard::app::App;
use rusty_guard::cli::{self, Cli};
use rusty_guard::config::persistence;
use rusty_guard::utils::context::ExitGuard;
use rusty_guard::utils::logger;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(persistence::default_settings_path);
    let settings = persistence::load_or_default(&settings_path)?;

    // Keep the guard alive until exit so buffered log lines are flushed
    let _log_guard = logger::init_logging(settings.log_dir.as_deref());

    if let Some(command) = cli.command_line() {
        let tier = cli.tier_or(settings.default_tier);
        return match cli::check_once(&command, tier, &settings).await {
            Ok(analysis) => {
                println!("{}", cli::render_output(&analysis, &command, cli.json)?);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("{}", e.user_message());
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let mut terminal = ratatui::init();
    // Restore on both normal exit and panic
    let _ctx = ExitGuard::with(ratatui::restore);

    let mut app = App::new(settings, settings_path);
    // draw 1st frame
    app.draw(&mut terminal)?;
    app.run(&mut terminal).await?;
    Ok(ExitCode::SUCCESS)
}
