//! Decoding of raw configuration text into typed documents.
//!
//! Text is parsed as JSON first; when that fails it is parsed as ZPL and the
//! resulting property tree is bound onto the same schema. Whichever path
//! succeeds, the document's version is then checked against the schema's
//! accepted range.

mod tree;

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::schema::{ConfigDocument, LegacyDocument};
use crate::{ZdcfError, ZdcfResult, ZdcfResultExt, zpl};

use tree::FromTree;

/// Decode `text` as a current-schema document.
///
/// # Errors
///
/// Returns [`ZdcfError::Schema`] carrying both failures when the text is
/// neither valid JSON nor valid ZPL for the current schema, and
/// [`ZdcfError::Version`] when the version lies outside `[1, 2)`.
///
/// # Examples
///
/// ```
/// let doc = zdcf::decode_current(r#"{"version": 1.5, "apps": {"a": {}}}"#)?;
/// assert!(doc.app("a").is_some());
///
/// let err = zdcf::decode_current(r#"{"version": 2.5}"#).unwrap_err();
/// assert!(matches!(&*err, zdcf::ZdcfError::Version { .. }));
/// # Ok::<_, std::sync::Arc<zdcf::ZdcfError>>(())
/// ```
pub fn decode_current(text: &str) -> ZdcfResult<ConfigDocument> {
    let doc: ConfigDocument = decode_text(text)?;
    doc.check_version()?;
    Ok(doc)
}

/// Decode `text` as a legacy-schema document.
///
/// # Errors
///
/// Returns [`ZdcfError::Schema`] when the text is neither valid JSON nor
/// valid ZPL for the legacy schema, and [`ZdcfError::Version`] when the
/// version lies outside `[0, 1)`.
pub fn decode_legacy(text: &str) -> ZdcfResult<LegacyDocument> {
    let doc: LegacyDocument = decode_text(text)?;
    doc.check_version()?;
    Ok(doc)
}

/// Decode an already parsed JSON value as a current-schema document.
pub(crate) fn decode_current_value(value: &Value) -> ZdcfResult<ConfigDocument> {
    let doc: ConfigDocument = ConfigDocument::deserialize(value).into_zdcf()?;
    doc.check_version()?;
    Ok(doc)
}

/// Decode an already parsed JSON value as a legacy-schema document.
pub(crate) fn decode_legacy_value(value: &Value) -> ZdcfResult<LegacyDocument> {
    let doc: LegacyDocument = LegacyDocument::deserialize(value).into_zdcf()?;
    doc.check_version()?;
    Ok(doc)
}

fn decode_text<T>(text: &str) -> ZdcfResult<T>
where
    T: DeserializeOwned + FromTree,
{
    let schema = std::any::type_name::<T>();
    serde_json::from_str::<T>(text)
        .inspect(|_| debug!(format = "json", schema, "decoded source"))
        .or_else(|json| {
            zpl::parse(text)
                .and_then(|tree| T::from_tree(&tree))
                .inspect(|_| debug!(format = "zpl", schema, "decoded source"))
                .map_err(|tree| Arc::new(ZdcfError::Schema { json, tree }))
        })
}

#[cfg(test)]
mod tests;
