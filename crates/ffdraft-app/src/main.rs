// ffdraft entry point.
//
// Startup sequence:
// 1. Load config
// 2. Initialize tracing (log to file, stdout carries command output)
// 3. Resolve the rankings file (first CLI argument overrides config)
// 4. Import rankings into the player pool
// 5. Run the command session on stdin until quit/EOF

use std::path::{Path, PathBuf};

use anyhow::Context;
use ffdraft_app::session;
use ffdraft_core::config::{self, LoggingConfig};
use ffdraft_core::{paths, PlayerDatabase};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;
    info!("ffdraft starting up");

    // 3. Resolve the rankings file
    let rankings_path = match std::env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => paths::rankings_path(&config.rankings)
            .context("failed to resolve rankings file location")?,
    };

    // 4. Import rankings
    let mut db = PlayerDatabase::with_options(config.rankings.import_options());
    let summary = db
        .import_player_data(&rankings_path)
        .with_context(|| format!("failed to import {}", rankings_path.display()))?;

    if summary.file_found {
        println!(
            "Loaded {} players from {} ({} rows skipped)",
            summary.imported,
            rankings_path.display(),
            summary.dropped
        );
    } else {
        println!(
            "No rankings file at {}; the player pool is empty",
            rankings_path.display()
        );
    }

    // 5. Command session
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let picked = session::run(&mut db, stdin.lock(), stdout.lock())?;

    info!("ffdraft shut down cleanly ({} picks)", picked.len());
    Ok(())
}

/// Initialize tracing to log to a file so stdout stays free for command output.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = Path::new(&logging.dir);
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("ffdraft.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
