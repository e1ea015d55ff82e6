use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;

use centavo_tui::RunOptions;
use centavo_util::preferences::UserPreferences;

/// Terminal budget editor with BRL money masking.
#[derive(Debug, Parser)]
#[command(name = "centavo", version, about)]
struct Cli {
    /// Budget payload file to open and save. Defaults to the file that was
    /// open last.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Theme name ("dusk" or "paper"); overrides the saved preference.
    #[arg(long)]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let preferences = UserPreferences::new().unwrap_or_else(|error| {
        tracing::warn!("Falling back to in-memory preferences: {error}");
        UserPreferences::ephemeral()
    });
    let budget_file = cli.file.or_else(|| preferences.last_budget_file());

    centavo_tui::run(RunOptions {
        budget_file,
        theme_override: cli.theme,
        preferences,
    })
    .await
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .try_init();
}
