//! Command-line parsing and settings layering for the inspector.
//!
//! Command-line values are serialized and merged over `ZDCF_`-prefixed
//! environment variables, so `--app` beats `ZDCF_APP`.

use camino::Utf8PathBuf;
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "ZDCF_";

/// Command-line arguments.
#[derive(Debug, Default, Parser, Serialize)]
#[command(
    name = "zdcf-inspect",
    about = "Resolve a ZDCF application from layered files and print it as JSON"
)]
pub struct InspectCli {
    /// Configuration files, lowest priority first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Utf8PathBuf>,
    /// Application to resolve. Falls back to `ZDCF_APP`.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    /// Print a single device instead of the whole application.
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Emit compact rather than pretty-printed JSON.
    #[arg(long)]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub compact: bool,
}

/// Settings after layering the environment beneath the command line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InspectSettings {
    /// Application to resolve.
    pub app: String,
    /// Optional device to narrow the report to.
    #[serde(default)]
    pub device: Option<String>,
    /// Configuration files, lowest priority first.
    #[serde(default)]
    pub sources: Vec<Utf8PathBuf>,
    /// Emit compact JSON.
    #[serde(default)]
    pub compact: bool,
}

/// Merge `cli` over `ZDCF_APP` and `ZDCF_DEVICE`.
///
/// # Errors
///
/// Returns [`crate::error::InspectError::Settings`] when no application name
/// is available or a value has the wrong shape.
pub fn load_settings(cli: &InspectCli) -> Result<InspectSettings> {
    let settings = Figment::new()
        .merge(Env::prefixed(ENV_PREFIX).only(&["app", "device"]))
        .merge(Serialized::defaults(cli))
        .extract()?;
    Ok(settings)
}
