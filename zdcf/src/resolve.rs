//! Entry points that turn ordered sources into a resolved application.

use tracing::debug;

use crate::schema::ConfigDocument;
use crate::{ResolvedApp, Source, ZdcfResult, merge};

/// Resolve `app_name` from `sources`, later sources overriding earlier ones.
///
/// Each source is decoded (or taken as-is when already typed), legacy
/// documents are migrated into `app_name`, and the results are merged in
/// order. Any failure aborts resolution; no partial result is returned.
///
/// # Errors
///
/// Returns the first decoding or merge failure, [`crate::ZdcfError::NoSources`]
/// when `sources` is empty, and [`crate::ZdcfError::NoSuchApp`] when the merged
/// document does not describe `app_name`.
///
/// # Examples
///
/// ```
/// let app = zdcf::resolve("echo", ["version = 0.1\necho1\n    type = echo_once\n"])?;
/// assert_eq!(app.name(), "echo");
/// assert_eq!(app.device("echo1").map(|d| d.device_type.as_str()), Some("echo_once"));
/// # Ok::<_, std::sync::Arc<zdcf::ZdcfError>>(())
/// ```
pub fn resolve<I, S>(app_name: &str, sources: I) -> ZdcfResult<ResolvedApp>
where
    I: IntoIterator<Item = S>,
    S: Into<Source>,
{
    let doc = resolve_document(app_name, sources)?;
    ResolvedApp::from_document(doc, app_name)
}

/// Decode and merge `sources` without selecting an application.
///
/// `app_name` names the application legacy documents are migrated into.
///
/// # Errors
///
/// As for [`resolve`], except that a missing application is not an error.
pub fn resolve_document<I, S>(app_name: &str, sources: I) -> ZdcfResult<ConfigDocument>
where
    I: IntoIterator<Item = S>,
    S: Into<Source>,
{
    let documents = sources
        .into_iter()
        .enumerate()
        .map(|(index, layer)| -> ZdcfResult<ConfigDocument> {
            let source: Source = layer.into();
            let doc = source.into_document(app_name)?;
            debug!(app = app_name, source = index, version = doc.version, "decoded source");
            Ok(doc)
        })
        .collect::<ZdcfResult<Vec<_>>>()?;
    merge(documents)
}
