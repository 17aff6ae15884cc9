//! Error types produced while resolving configuration.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::{LookupKind, SyntaxReason, ZdcfError};

#[cfg(test)]
mod tests;
