//! Configuration sources and the composer that orders them.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tracing::debug;

use crate::decode::{decode_current_value, decode_legacy_value};
use crate::schema::ConfigDocument;
use crate::{ResolvedApp, ZdcfError, ZdcfResult, decode_current, decode_legacy, migrate};

/// One layer of configuration.
///
/// Raw text is auto-detected: the current schema is tried first (as JSON,
/// then as ZPL) and the legacy schema second, in which case the document is
/// migrated under the requested application name.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Source {
    /// Raw JSON or ZPL text.
    Text(String),
    /// Raw bytes, which must hold UTF-8 text.
    Bytes(Vec<u8>),
    /// An already parsed JSON object in either schema.
    Json(Value),
    /// A file whose contents are treated as raw text.
    File(Utf8PathBuf),
    /// A typed current-schema document, used as-is.
    Document(ConfigDocument),
}

impl Source {
    /// Construct a file-backed source.
    #[must_use]
    pub fn file(path: impl Into<Utf8PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Interpret the source as a current-schema document, migrating legacy
    /// content into an application named `app_name`.
    ///
    /// Typed documents are returned unchanged; their version is checked when
    /// they are merged.
    ///
    /// # Errors
    ///
    /// Returns [`ZdcfError::UnsupportedSource`] for bytes that are not UTF-8
    /// and JSON values that are not objects, [`ZdcfError::File`] when a file
    /// cannot be read, and [`ZdcfError::Aggregate`] holding both schemas'
    /// failures when neither accepts the content.
    pub fn into_document(self, app_name: &str) -> ZdcfResult<ConfigDocument> {
        match self {
            Self::Text(text) => decode_text(&text, app_name),
            Self::Bytes(bytes) => {
                let text = String::from_utf8(bytes).map_err(|err| {
                    ZdcfError::unsupported_source(format!("bytes are not valid UTF-8 ({err})"))
                })?;
                decode_text(&text, app_name)
            }
            Self::Json(value) => decode_json(&value, app_name),
            Self::File(path) => {
                let text = read_file(&path)?;
                debug!(path = %path, "read configuration file");
                decode_text(&text, app_name)
            }
            Self::Document(doc) => Ok(doc),
        }
    }
}

fn read_file(path: &Utf8Path) -> ZdcfResult<String> {
    std::fs::read_to_string(path).map_err(|source| {
        Arc::new(ZdcfError::File {
            path: path.to_path_buf(),
            source,
        })
    })
}

fn decode_text(text: &str, app_name: &str) -> ZdcfResult<ConfigDocument> {
    decode_current(text).or_else(|current| {
        decode_legacy(text)
            .map(|legacy| migrate(legacy, app_name))
            .map_err(|legacy| ZdcfError::aggregate(vec![current, legacy]))
    })
}

fn decode_json(value: &Value, app_name: &str) -> ZdcfResult<ConfigDocument> {
    if !value.is_object() {
        return Err(ZdcfError::unsupported_source(format!(
            "JSON value is not an object: {value}"
        )));
    }
    decode_current_value(value).or_else(|current| {
        decode_legacy_value(value)
            .map(|legacy| migrate(legacy, app_name))
            .map_err(|legacy| ZdcfError::aggregate(vec![current, legacy]))
    })
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for Source {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for Source {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<Value> for Source {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<Utf8PathBuf> for Source {
    fn from(path: Utf8PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<ConfigDocument> for Source {
    fn from(doc: ConfigDocument) -> Self {
        Self::Document(doc)
    }
}

/// Builder that accumulates [`Source`] layers in priority order.
///
/// Sources pushed later override sources pushed earlier.
///
/// ```rust
/// use zdcf::SourceComposer;
///
/// let mut composer = SourceComposer::new();
/// composer.push_text("version = 0.1\nmain\n    type = zmq_queue\n");
/// composer.push_text("version = 0.2\nmain\n    out\n        type = PUSH\n");
///
/// let app = composer.resolve("relay")?;
/// let main = app.require_device("main")?;
/// assert_eq!(main.device_type, "zmq_queue");
/// assert!(main.socket("out").is_some());
/// # Ok::<_, std::sync::Arc<zdcf::ZdcfError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct SourceComposer {
    sources: Vec<Source>,
}

impl SourceComposer {
    /// Create an empty composer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Create a composer with preallocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sources: Vec::with_capacity(capacity),
        }
    }

    /// Push a raw text layer.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.push(Source::Text(text.into()));
    }

    /// Push a raw byte layer.
    pub fn push_bytes(&mut self, bytes: impl Into<Vec<u8>>) {
        self.push(Source::Bytes(bytes.into()));
    }

    /// Push an already parsed JSON layer.
    pub fn push_json(&mut self, value: Value) {
        self.push(Source::Json(value));
    }

    /// Push a file-backed layer.
    pub fn push_file(&mut self, path: impl Into<Utf8PathBuf>) {
        self.push(Source::file(path));
    }

    /// Push a typed document layer.
    pub fn push_document(&mut self, doc: ConfigDocument) {
        self.push(Source::Document(doc));
    }

    /// Push an arbitrary layer.
    pub fn push(&mut self, source: Source) {
        self.sources.push(source);
    }

    /// Number of layers accumulated so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` when no layers have been pushed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Consume the composer and return the accumulated layers.
    #[must_use]
    pub fn sources(self) -> Vec<Source> {
        self.sources
    }

    /// Resolve the accumulated layers for `app_name`.
    ///
    /// # Errors
    ///
    /// See [`crate::resolve`].
    pub fn resolve(self, app_name: &str) -> ZdcfResult<ResolvedApp> {
        crate::resolve(app_name, self.sources)
    }
}

impl IntoIterator for SourceComposer {
    type Item = Source;
    type IntoIter = std::vec::IntoIter<Source>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.into_iter()
    }
}

impl FromIterator<Source> for SourceComposer {
    fn from_iter<I: IntoIterator<Item = Source>>(iter: I) -> Self {
        Self {
            sources: iter.into_iter().collect(),
        }
    }
}
