//! Primary error enum for configuration resolution.

use std::fmt;
use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::schema::VersionRange;

use super::aggregate::AggregatedErrors;

/// Errors that can occur while resolving configuration.
///
/// Every failure is deterministic over its input, so none of these are worth
/// retrying.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ZdcfError {
    /// Malformed ZPL text.
    #[error("line {line}: {reason}")]
    Syntax {
        /// One-based line number of the offending line.
        line: usize,
        /// What was wrong with the line.
        reason: SyntaxReason,
    },

    /// A property tree could not be bound onto the typed schema.
    #[error("invalid value for '{path}': {message}")]
    Field {
        /// Dotted path of the offending property or section.
        path: String,
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// An already parsed JSON value did not match the schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raw text was neither valid JSON nor valid ZPL for the schema.
    #[error("failed to parse as JSON ({json}) or as ZPL ({tree})")]
    Schema {
        /// Failure reported by the JSON decoder.
        json: serde_json::Error,
        /// Failure reported by the ZPL parser or tree decoder.
        tree: Arc<ZdcfError>,
    },

    /// A document's version lies outside its schema's accepted range.
    #[error("unsupported ZDCF version {found} (expected {expected})")]
    Version {
        /// Version declared by the document.
        found: f64,
        /// Range accepted by the schema the document was decoded against.
        expected: VersionRange,
    },

    /// A source could not be interpreted as configuration at all.
    #[error("unsupported configuration source: {kind}")]
    UnsupportedSource {
        /// Description of the rejected source.
        kind: String,
    },

    /// A file-backed source could not be read.
    #[error("configuration file error in '{path}': {source}")]
    File {
        /// Path of the file that failed to load.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Resolution was requested without any sources.
    #[error("no configuration sources supplied")]
    NoSources,

    /// The resolved document has no application with the requested name.
    #[error("no such app: {name}")]
    NoSuchApp {
        /// Requested application name.
        name: String,
    },

    /// A required device or socket is absent from the resolved application.
    #[error("no such {kind}: {name}")]
    NotFound {
        /// Whether a device or a socket was requested.
        kind: LookupKind,
        /// Requested name.
        name: String,
    },

    /// No registered handler matches a device's type string.
    #[error("unregistered device type '{device_type}' for device '{device}'")]
    UnregisteredDeviceType {
        /// Name of the device that could not be matched.
        device: String,
        /// Type string declared by the device.
        device_type: String,
    },

    /// The resolved application declares no devices.
    #[error("no devices configured for app '{app}'")]
    NoDevices {
        /// Application name.
        app: String,
    },

    /// A handler pattern failed to compile.
    #[error("invalid device type pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern supplied at registration.
        pattern: String,
        /// Compilation failure reported by `regex`.
        #[source]
        source: regex::Error,
    },

    /// Several failures were collected for a single source.
    #[error("multiple configuration errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}

/// Reasons a ZPL line is rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SyntaxReason {
    /// The line matched neither the blank/comment rule nor the key grammar.
    InvalidLine(String),
    /// A subsection name was declared twice under the same parent.
    DuplicateSection(String),
}

impl fmt::Display for SyntaxReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLine(line) => write!(f, "invalid ZPL: {line}"),
            Self::DuplicateSection(name) => write!(f, "duplicate subsection {name}"),
        }
    }
}

/// The kind of entry requested from a resolved application.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LookupKind {
    /// A device within the application.
    Device,
    /// A socket within a device.
    Socket,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Device => "device",
            Self::Socket => "socket",
        })
    }
}
