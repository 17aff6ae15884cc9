//! Extension for mapping foreign errors into `ZdcfResult` concisely.
//!
//! Removes repetitive `.map_err(|e| Arc::new(ZdcfError::from(e)))` chains when
//! converting external error types into the crate's `ZdcfResult<T>` alias
//! (`Result<T, Arc<ZdcfError>>`).
//!
//! ```
//! use zdcf::{ZdcfResult, ZdcfResultExt};
//!
//! fn version_of(text: &str) -> ZdcfResult<serde_json::Value> {
//!     serde_json::from_str(text).into_zdcf()
//! }
//!
//! assert!(version_of("{\"version\": 1.0}").is_ok());
//! assert!(version_of("version = 1.0").is_err());
//! ```

use std::sync::Arc;

use crate::{ZdcfError, ZdcfResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<ZdcfError>`
/// into a [`ZdcfResult`].
pub trait ZdcfResultExt<T> {
    /// Convert `Result<T, E>` into `ZdcfResult<T>` using `Into<ZdcfError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<ZdcfError>`.
    fn into_zdcf(self) -> ZdcfResult<T>;
}

impl<T, E> ZdcfResultExt<T> for Result<T, E>
where
    E: Into<ZdcfError>,
{
    fn into_zdcf(self) -> ZdcfResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
