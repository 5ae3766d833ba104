//! Derive Command
//!
//! Streams passwords through the batch engine, `--batch` lanes at a time.

use super::{read_lines, Deriver, KdfArgs};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// Derive keys for every line of `files` (stdin when empty).
///
/// Output format: "hexkey  password", in input order. Passwords are written
/// back byte for byte.
pub fn derive_files(files: &[PathBuf], kdf: &KdfArgs, length: u32) -> Result<()> {
    let deriver = Deriver::new(kdf)?;
    let batch = kdf.batch_size();
    let mut out = BufWriter::new(io::stdout().lock());
    let mut total = 0;

    if files.is_empty() {
        total += derive_stream(&mut io::stdin().lock(), &deriver, batch, length, &mut out)?;
    } else {
        for path in files {
            let file =
                File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
            let mut reader = BufReader::new(file);
            total += derive_stream(&mut reader, &deriver, batch, length, &mut out)
                .with_context(|| format!("While reading: {}", path.display()))?;
        }
    }

    out.flush()?;
    info!(passwords = total, "derivation finished");
    Ok(())
}

fn derive_stream<R: BufRead, W: Write>(
    reader: &mut R,
    deriver: &Deriver,
    batch: usize,
    length: u32,
    out: &mut W,
) -> Result<usize> {
    let mut passwords = Vec::with_capacity(batch);
    let mut total = 0;

    while read_lines(reader, batch, &mut passwords)? > 0 {
        let keys = deriver.derive(&passwords, length)?;
        for (password, key) in passwords.iter().zip(&keys) {
            write!(out, "{}  ", hex::encode(key.derived_key(length as usize)))?;
            out.write_all(password)?;
            writeln!(out)?;
        }
        total += passwords.len();
    }

    Ok(total)
}
