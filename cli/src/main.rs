//! lanekdf CLI
//!
//! Batch PBKDF2-HMAC-SHA1 command-line tool.

mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{check_mode, derive_files, show_info, KdfArgs};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser)]
#[command(name = "lanekdf")]
#[command(about = "Batch PBKDF2-HMAC-SHA1, one password per lane", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive keys for passwords read one per line (stdin when no FILE)
    Derive {
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,

        #[command(flatten)]
        kdf: KdfArgs,

        /// Derived key length in bytes
        #[arg(short, long, env = "LANEKDF_LENGTH", default_value_t = 20)]
        length: u32,
    },
    /// Verify "hexkey  password" lines (like sha256sum -c)
    Check {
        #[arg(value_name = "FILE")]
        key_file: PathBuf,

        #[command(flatten)]
        kdf: KdfArgs,
    },
    /// Show the executor backend and record layout
    Info {
        /// Worker threads (0 = one per core)
        #[arg(short, long, env = "LANEKDF_THREADS", default_value_t = 0)]
        threads: usize,
    },
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Derive { files, kdf, length } => derive_files(files, kdf, *length)?,
        Commands::Check { key_file, kdf } => check_mode(key_file, kdf)?,
        Commands::Info { threads } => show_info(*threads)?,
    }

    Ok(())
}

/// Log to stderr. `LANEKDF_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("LANEKDF_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
