//! Accepted version ranges for each schema.

use std::fmt;

use crate::{ZdcfError, ZdcfResult};

/// Half-open range `[start, end)` of versions a schema accepts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VersionRange {
    /// Smallest accepted version.
    pub start: f64,
    /// First version no longer accepted.
    pub end: f64,
}

impl VersionRange {
    /// Versions accepted by the current, application-keyed schema.
    pub const CURRENT: Self = Self {
        start: 1.0,
        end: 2.0,
    };

    /// Versions accepted by the legacy schema without an application wrapper.
    pub const LEGACY: Self = Self {
        start: 0.0,
        end: 1.0,
    };

    /// Returns `true` when `version` lies within the range.
    #[must_use]
    pub const fn contains(self, version: f64) -> bool {
        self.start <= version && version < self.end
    }

    /// Check `version` against the range.
    ///
    /// # Errors
    ///
    /// Returns [`ZdcfError::Version`] when `version` lies outside the range.
    pub fn check(self, version: f64) -> ZdcfResult<()> {
        if self.contains(version) {
            Ok(())
        } else {
            Err(ZdcfError::version(version, self))
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
