//! CLI Commands
//!
//! All lanekdf CLI commands organized as separate modules, plus the batch
//! plumbing they share.

mod check;
mod derive;
mod info;

pub use check::check_mode;
pub use derive::derive_files;
pub use info::show_info;

use anyhow::{Context, Result};
use clap::Args;
use lanekdf::{derive_batch, DerivationParams, InputRecord, OutputRecord, SaltRecord};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::io::{self, BufRead};
use tracing::debug;

// =============================================================================
// SHARED ARGUMENTS
// =============================================================================

/// Derivation options common to `derive` and `check`.
#[derive(Args)]
pub struct KdfArgs {
    /// Salt shared by every password
    #[arg(short, long, env = "LANEKDF_SALT")]
    pub salt: String,

    /// Interpret --salt as hex
    #[arg(long)]
    pub salt_hex: bool,

    /// PBKDF2 iteration count
    #[arg(short, long, env = "LANEKDF_ITERATIONS", default_value_t = 4096)]
    pub iterations: u32,

    /// Worker threads (0 = one per core)
    #[arg(short, long, env = "LANEKDF_THREADS", default_value_t = 0)]
    pub threads: usize,

    /// Passwords per batch
    #[arg(short, long, default_value_t = 4096)]
    pub batch: usize,
}

impl KdfArgs {
    fn salt_record(&self) -> Result<SaltRecord> {
        let bytes = if self.salt_hex {
            hex::decode(&self.salt).context("Invalid hex salt")?
        } else {
            self.salt.as_bytes().to_vec()
        };
        Ok(SaltRecord::from_bytes(&bytes)?)
    }

    fn batch_size(&self) -> usize {
        self.batch.max(1)
    }
}

// =============================================================================
// BATCH RUNNER
// =============================================================================

/// A salt, an iteration count and the pool batches run on.
pub struct Deriver {
    salt: SaltRecord,
    iterations: u32,
    pool: ThreadPool,
}

impl Deriver {
    pub fn new(kdf: &KdfArgs) -> Result<Self> {
        let salt = kdf.salt_record()?;
        // Reject a zero iteration count before any input is read.
        DerivationParams::new(kdf.iterations, 0)?;

        Ok(Self {
            salt,
            iterations: kdf.iterations,
            pool: build_pool(kdf.threads)?,
        })
    }

    /// Derive `dk_len` bytes for every password, one lane each.
    pub fn derive<P: AsRef<[u8]>>(
        &self,
        passwords: &[P],
        dk_len: u32,
    ) -> Result<Vec<OutputRecord>> {
        let params = DerivationParams::new(self.iterations, dk_len)?;
        let inputs = passwords
            .iter()
            .enumerate()
            .map(|(i, p)| {
                InputRecord::from_bytes(p.as_ref()).with_context(|| format!("Password #{}", i + 1))
            })
            .collect::<Result<Vec<InputRecord>>>()?;

        let mut outputs: Vec<OutputRecord> = vec![OutputRecord::default(); inputs.len()];
        self.pool
            .install(|| derive_batch(&inputs, &self.salt, &mut outputs, &params))?;

        debug!(lanes = inputs.len(), dk_len, "batch derived");
        Ok(outputs)
    }
}

pub fn build_pool(threads: usize) -> Result<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to start the worker pool")
}

/// Read up to `limit` newline-terminated lines into `lines` (CR/LF stripped).
///
/// Returns the number of lines read; `0` means end of input.
pub fn read_lines<R: BufRead>(
    reader: &mut R,
    limit: usize,
    lines: &mut Vec<Vec<u8>>,
) -> io::Result<usize> {
    lines.clear();
    while lines.len() < limit {
        let mut line = Vec::new();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        lines.push(line);
    }
    Ok(lines.len())
}
