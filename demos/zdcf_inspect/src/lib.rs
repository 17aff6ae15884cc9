//! Library facade for the `zdcf-inspect` demo so tests can reuse its settings
//! and report helpers.

pub mod cli;
pub mod error;
pub mod report;
