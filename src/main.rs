//! glidefile - A keyboard-driven terminal file browser.
//!
//! Usage:
//!   glide [PATH]             Browse PATH (defaults to the current directory)
//!   glide --no-icons         Use plain-text markers instead of Nerd Font glyphs
//!   glide --help             Show help
//!
//! Set `GLIDE_LOG` (e.g. `GLIDE_LOG=debug`) to write a log file to the user
//! cache directory.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "GLIDE_LOG";

#[derive(Parser)]
#[command(
    name = "glidefile",
    version,
    about = "A keyboard-driven terminal file browser",
    long_about = "glidefile browses directories with a live preview pane, an incremental \
                  deep filter and cancellable copy/move transfers.\n\n\
                  Press `s` to filter, `a`/`r`/`d` to add, rename or delete, and \
                  `c`/`x`/`p` to copy, cut and paste."
)]
struct Cli {
    /// Directory to start in (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Render plain-text markers instead of Nerd Font icons
    #[arg(long)]
    no_icons: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging();

    let path = cli.path.canonicalize().context("Invalid path")?;
    if !path.is_dir() {
        color_eyre::eyre::bail!("Not a directory: {}", path.display());
    }

    tracing::info!(path = %path.display(), "starting");
    let config = glidefile_tui::TuiConfig::new(!cli.no_icons);
    glidefile_tui::run_with_config(path, config)?;

    Ok(())
}

/// Install a file logger when `GLIDE_LOG` is set. The terminal belongs to
/// the UI, so nothing is ever written to stdout or stderr.
fn init_logging() {
    let Ok(directive) = std::env::var(LOG_ENV) else {
        return;
    };
    let Some(dir) = dirs::cache_dir().map(|d| d.join("glidefile")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("glidefile.log")) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
