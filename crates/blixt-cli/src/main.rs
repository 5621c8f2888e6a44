//! CLI frontend for Blixt, the lightning-formation slideshow.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "blixt",
    about = "Blixt: how lightning forms in a storm cloud",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all steps of the explanation
    Steps,

    /// Show one step with its full text and narration prompt
    Show {
        /// Step number (1-5)
        step: usize,
    },

    /// Run the particle engine without a display and report charge groups
    Simulate {
        /// Step number (1-5) selecting the motion rules
        #[arg(short, long, default_value = "4")]
        step: usize,

        /// Number of frames to run
        #[arg(short, long, default_value = "600")]
        frames: u64,

        /// RNG seed for deterministic results
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Number of particles
        #[arg(short, long, default_value = "45")]
        count: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Generate one jagged bolt path
    Bolt {
        /// Start point as X,Y
        #[arg(long, default_value = "400,250")]
        from: String,

        /// End point as X,Y
        #[arg(long, default_value = "615,430")]
        to: String,

        /// Number of segments
        #[arg(short, long, default_value = "12")]
        segments: usize,

        /// Jitter amplitude
        #[arg(short, long, default_value = "40")]
        amplitude: f64,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Sample the strike trigger on the final step
    Strikes {
        /// Number of timer firings to sample
        #[arg(short, long, default_value = "1000")]
        ticks: u32,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Decode a file of base64 16-bit PCM and print buffer statistics
    Decode {
        /// File containing base64 text
        file: PathBuf,

        /// Sample rate in Hz
        #[arg(short, long, default_value = "24000")]
        rate: u32,

        /// Number of interleaved channels
        #[arg(short, long, default_value = "1")]
        channels: u16,
    },

    /// Request spoken narration for a step (needs GEMINI_API_KEY or API_KEY)
    Narrate {
        /// Step number (1-5)
        #[arg(short, long, default_value = "1")]
        step: usize,

        /// Write the base64 payload to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Play the audio on the default output device
        #[arg(long)]
        play: bool,
    },

    /// Launch the interactive slideshow
    Tui {
        /// Step to start on (1-5)
        #[arg(short, long, default_value = "1")]
        step: usize,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Never open an audio device
        #[arg(long)]
        no_audio: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // The slideshow owns the terminal and sets up its own logging.
    if !matches!(cli.command, Commands::Tui { .. }) {
        init_logging();
    }

    let result = match cli.command {
        Commands::Steps => commands::steps::run(),
        Commands::Show { step } => commands::show::run(step),
        Commands::Simulate {
            step,
            frames,
            seed,
            count,
            json,
        } => commands::simulate::run(step, frames, seed, count, json),
        Commands::Bolt {
            from,
            to,
            segments,
            amplitude,
            seed,
            json,
        } => commands::bolt::run(&from, &to, segments, amplitude, seed, json),
        Commands::Strikes { ticks, seed, json } => commands::strikes::run(ticks, seed, json),
        Commands::Decode {
            file,
            rate,
            channels,
        } => commands::decode::run(&file, rate, channels),
        Commands::Narrate { step, output, play } => {
            commands::narrate::run(step, output.as_deref(), play)
        }
        Commands::Tui {
            step,
            seed,
            no_audio,
        } => commands::tui::run(step, seed, no_audio),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Log to stderr at the level given by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Ignore a second installation; there is only ever one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
