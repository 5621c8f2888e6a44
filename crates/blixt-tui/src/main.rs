//! Standalone slideshow binary for Blixt.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use blixt_core::Phase;
use blixt_tui::app;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "blixt-tui",
    about = "Interactive slideshow: how lightning forms in a storm cloud",
    version
)]
struct Args {
    /// Step to start on (1-5)
    #[arg(long, default_value = "1")]
    step: usize,

    /// RNG seed for particles, bolts, and strikes
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Write logs to this file (RUST_LOG selects the level)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Never open an audio device; narration is fetched but not played
    #[arg(long)]
    no_audio: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    if let Some(path) = &args.log_file {
        init_file_logging(path)?;
    }

    let start = Phase::from_number(args.step).map_err(|e| e.to_string())?;
    let narrator = app::narrator_from_env(args.no_audio);
    let config = app::slideshow_config(args.seed);
    let slideshow = app::SlideshowApp::new(config, start, narrator)
        .map_err(|e| e.to_string())?;

    blixt_tui::terminal::run(slideshow)
}

/// Send tracing output to `path`; the terminal itself belongs to the UI.
fn init_file_logging(path: &Path) -> Result<(), String> {
    let file = File::create(path)
        .map_err(|e| format!("cannot create log file {}: {e}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| format!("cannot install logger: {e}"))
}
