//! Failures collected while trying one source against several schemas.

use std::{error::Error, fmt, sync::Arc};

use super::ZdcfError;

/// The per-schema failures for a source that no schema accepted.
///
/// Raw text is tried against the current schema and then the legacy one, so
/// the current-schema failure comes first:
///
/// ```
/// use zdcf::{VersionRange, ZdcfError};
///
/// let err = zdcf::resolve("app", ["version = 7"]).unwrap_err();
/// let ZdcfError::Aggregate(attempts) = &*err else {
///     panic!("expected an aggregate, got {err}");
/// };
/// let ranges: Vec<VersionRange> = attempts
///     .iter()
///     .filter_map(|e| match e {
///         ZdcfError::Version { expected, .. } => Some(*expected),
///         _ => None,
///     })
///     .collect();
/// assert_eq!(ranges, vec![VersionRange::CURRENT, VersionRange::LEGACY]);
/// ```
#[derive(Debug)]
pub struct AggregatedErrors(Vec<Arc<ZdcfError>>);

impl AggregatedErrors {
    pub(crate) const fn new(errors: Vec<Arc<ZdcfError>>) -> Self {
        Self(errors)
    }

    /// Iterate over the failures in the order the schemas were tried.
    #[must_use = "iterators are lazy"]
    pub fn iter(&self) -> impl Iterator<Item = &ZdcfError> {
        self.0.iter().map(Arc::as_ref)
    }
}

/// Renders one numbered failure per line.
impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, err) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {err}", index + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}
