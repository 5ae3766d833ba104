//! Check Command
//!
//! Verify "hexkey  password" lines (like sha256sum -c). Lines are handled as
//! raw bytes, so wordlists in any encoding survive a derive/check round trip.

use super::{read_lines, Deriver, KdfArgs};
use anyhow::{Context, Result};
use lanekdf::{OUTPUT_CAPACITY, PASSWORD_CAPACITY};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

/// One parsed line: the expected key and the password it should derive from.
struct Entry {
    key: Vec<u8>,
    password: Vec<u8>,
}

/// Keys seen and keys that did not verify.
#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    total: usize,
    failed: usize,
}

// =============================================================================
// CHECK
// =============================================================================

/// Verify derived keys from a key file.
pub fn check_mode(key_file: &PathBuf, kdf: &KdfArgs) -> Result<()> {
    let file = File::open(key_file)
        .with_context(|| format!("Failed to open: {}", key_file.display()))?;

    let deriver = Deriver::new(kdf)?;
    let mut reader = BufReader::new(file);
    let mut out = BufWriter::new(io::stdout().lock());

    let tally = check_stream(&mut reader, &deriver, kdf.batch_size(), &mut out)?;

    writeln!(out)?;
    if tally.failed == 0 {
        writeln!(out, "All {} keys verified", tally.total)?;
        out.flush()?;
    } else {
        out.flush()?;
        eprintln!("WARNING: {} of {} keys did NOT match", tally.failed, tally.total);
        std::process::exit(1);
    }

    Ok(())
}

/// Check every entry of `reader`, `batch` keys per derivation.
fn check_stream<R: BufRead, W: Write>(
    reader: &mut R,
    deriver: &Deriver,
    batch: usize,
    out: &mut W,
) -> Result<Tally> {
    let mut lines = Vec::with_capacity(batch);
    let mut pending = Vec::with_capacity(batch);
    let mut tally = Tally::default();

    while read_lines(reader, batch, &mut lines)? > 0 {
        for line in &lines {
            if line.is_empty() || line.starts_with(b"#") {
                continue;
            }

            let Some((hex_key, password)) = split_entry(line) else {
                eprintln!("Warning: Invalid format: {}", String::from_utf8_lossy(line));
                continue;
            };
            tally.total += 1;

            match hex::decode(hex_key.trim_ascii()) {
                Ok(key) if !key.is_empty() && key.len() <= OUTPUT_CAPACITY => {
                    if password.len() > PASSWORD_CAPACITY {
                        report(
                            out,
                            password,
                            &format!("FAILED (password longer than {PASSWORD_CAPACITY} bytes)"),
                        )?;
                        tally.failed += 1;
                        continue;
                    }
                    pending.push(Entry {
                        key,
                        password: password.to_vec(),
                    });
                }
                _ => {
                    report(out, password, "FAILED (invalid key)")?;
                    tally.failed += 1;
                    continue;
                }
            }

            if pending.len() == batch {
                tally.failed += check_batch(deriver, &pending, out)?;
                pending.clear();
            }
        }
    }
    tally.failed += check_batch(deriver, &pending, out)?;

    Ok(tally)
}

/// Split "hexkey  password" at the first double space.
fn split_entry(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let at = line.windows(2).position(|pair| pair == b"  ")?;
    Some((&line[..at], &line[at + 2..]))
}

/// Print `password: status`, the password bytes unchanged.
fn report<W: Write>(out: &mut W, password: &[u8], status: &str) -> io::Result<()> {
    out.write_all(password)?;
    writeln!(out, ": {status}")
}

/// Derive the whole batch at the longest expected length and compare prefixes.
///
/// A PBKDF2 key of length `n` is the `n`-byte prefix of any longer key from
/// the same inputs, so one batch serves every key length.
fn check_batch<W: Write>(deriver: &Deriver, entries: &[Entry], out: &mut W) -> Result<usize> {
    let Some(dk_len) = entries.iter().map(|e| e.key.len()).max() else {
        return Ok(0);
    };

    let passwords: Vec<&[u8]> = entries.iter().map(|e| e.password.as_slice()).collect();
    let outputs = deriver.derive(&passwords, u32::try_from(dk_len)?)?;

    let mut failed = 0;
    for (entry, output) in entries.iter().zip(&outputs) {
        if output.derived_key(entry.key.len()) == entry.key {
            report(out, &entry.password, "OK")?;
        } else {
            report(out, &entry.password, "FAILED")?;
            failed += 1;
        }
    }
    Ok(failed)
}
