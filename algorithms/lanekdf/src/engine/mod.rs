//! Execution Engine
//!
//! Lane dispatch and parallel batch processing.

pub mod dispatcher;
pub mod parallel;

pub use dispatcher::{get_active_backend, Backend, Layout, DEFAULT_LAYOUT};
