//! Constructors for common `ZdcfError` shapes.

use std::sync::Arc;

use crate::schema::VersionRange;

use super::{AggregatedErrors, LookupKind, SyntaxReason, ZdcfError};

impl ZdcfError {
    /// Combine several failures into a single [`Self::Aggregate`].
    pub(crate) fn aggregate(errors: Vec<Arc<Self>>) -> Arc<Self> {
        Arc::new(Self::Aggregate(Box::new(AggregatedErrors::new(errors))))
    }

    pub(crate) fn syntax(line: usize, reason: SyntaxReason) -> Arc<Self> {
        Arc::new(Self::Syntax { line, reason })
    }

    pub(crate) fn field(path: impl Into<String>, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::Field {
            path: path.into(),
            message: message.into(),
        })
    }

    pub(crate) fn version(found: f64, expected: VersionRange) -> Arc<Self> {
        Arc::new(Self::Version { found, expected })
    }

    pub(crate) fn not_found(kind: LookupKind, name: &str) -> Arc<Self> {
        Arc::new(Self::NotFound {
            kind,
            name: name.to_owned(),
        })
    }

    pub(crate) fn unsupported_source(kind: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::UnsupportedSource { kind: kind.into() })
    }
}
