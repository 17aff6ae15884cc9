//! Resolution engine for ZeroMQ device configuration files (ZDCF).
//!
//! A configuration is supplied as an ordered list of [`Source`] layers, each
//! either raw text (JSON or the indentation-based ZPL format) or an already
//! typed [`ConfigDocument`]. Layers are decoded, legacy documents are migrated
//! to the current schema, and the results are merged left to right so later
//! sources override earlier ones. The outcome is a read-only [`ResolvedApp`]
//! describing the devices and sockets of one named application.
//!
//! ```rust
//! use zdcf::resolve;
//!
//! let defaults = r#"{
//!     "version": 1.0,
//!     "apps": { "listener": { "devices": { "main": {
//!         "type": "zmq_queue",
//!         "sockets": { "frontend": { "type": "SUB", "bind": ["tcp://eth0:5555"] } }
//!     } } } }
//! }"#;
//! let overrides = "
//! version = 0.1
//! main
//!     frontend
//!         bind = tcp://eth0:6666
//! ";
//!
//! let app = resolve("listener", [defaults, overrides])?;
//! let frontend = app.require_device("main")?.require_socket("frontend")?;
//! assert_eq!(frontend.bind, vec![String::from("tcp://eth0:6666")]);
//! # Ok::<_, std::sync::Arc<zdcf::ZdcfError>>(())
//! ```

mod accessor;
mod decode;
mod error;
pub mod handlers;
mod merge;
mod migrate;
mod resolve;
mod result_ext;
pub mod schema;
mod source;
pub mod zpl;

pub use accessor::ResolvedApp;
pub use decode::{decode_current, decode_legacy};
pub use error::{AggregatedErrors, LookupKind, SyntaxReason, ZdcfError};
pub use handlers::DeviceHandlers;
pub use merge::{merge, merge_into};
pub use migrate::migrate;
pub use resolve::{resolve, resolve_document};
pub use result_ext::ZdcfResultExt;
pub use schema::{
    AppConfig, ConfigDocument, ContextConfig, DeviceConfig, LegacyDocument, OptionsConfig,
    SocketConfig, SocketType, VersionRange,
};
pub use source::{Source, SourceComposer};

/// Shorthand for results produced by the resolution engine.
///
/// Errors are shared behind an [`Arc`](std::sync::Arc) so a single failure can
/// be carried inside aggregates and reported by several callers.
pub type ZdcfResult<T> = Result<T, std::sync::Arc<ZdcfError>>;
