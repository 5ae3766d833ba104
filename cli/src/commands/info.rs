//! Info Command
//!
//! Reports the executor a batch would run on and the record layout.

use super::build_pool;
use anyhow::Result;
use lanekdf::Backend;

/// Print backend, worker count and layout.
pub fn show_info(threads: usize) -> Result<()> {
    let pool = build_pool(threads)?;
    let backend = pool.install(lanekdf::active_backend);
    let workers = match backend {
        Backend::Serial => 1,
        Backend::Rayon { threads: n } => n,
    };

    println!("lanekdf {}", env!("CARGO_PKG_VERSION"));
    println!("Executor:          {backend}");
    println!("Worker threads:    {workers}");
    println!("{}", lanekdf::DEFAULT_LAYOUT);
    println!("Scalar salt limit: {} bytes", lanekdf::MAX_SALT_BYTES);

    Ok(())
}
