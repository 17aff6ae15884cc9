//! Unit tests for error rendering and aggregation.

use std::sync::Arc;

use rstest::rstest;

use super::{AggregatedErrors, LookupKind, SyntaxReason, ZdcfError};
use crate::schema::VersionRange;

#[rstest]
#[case(
    ZdcfError::Syntax { line: 3, reason: SyntaxReason::DuplicateSection("frontend".into()) },
    "line 3: duplicate subsection frontend"
)]
#[case(
    ZdcfError::Syntax { line: 1, reason: SyntaxReason::InvalidLine("  x".into()) },
    "line 1: invalid ZPL:   x"
)]
#[case(
    ZdcfError::Version { found: 0.5, expected: VersionRange::CURRENT },
    "unsupported ZDCF version 0.5 (expected [1, 2))"
)]
#[case(
    ZdcfError::NotFound { kind: LookupKind::Device, name: "main".into() },
    "no such device: main"
)]
#[case(
    ZdcfError::Field { path: "main.type".into(), message: "expected a single value, found 2".into() },
    "invalid value for 'main.type': expected a single value, found 2"
)]
fn renders_messages(#[case] err: ZdcfError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[rstest]
fn aggregate_numbers_each_error() {
    let err = ZdcfError::aggregate(vec![
        ZdcfError::version(2.5, VersionRange::CURRENT),
        ZdcfError::version(2.5, VersionRange::LEGACY),
    ]);
    assert_eq!(
        err.to_string(),
        "multiple configuration errors:\n\
         1: unsupported ZDCF version 2.5 (expected [1, 2))\n\
         2: unsupported ZDCF version 2.5 (expected [0, 1))"
    );
}

#[rstest]
fn aggregate_iterates_in_order() {
    let agg = AggregatedErrors::new(vec![
        ZdcfError::not_found(LookupKind::Socket, "a"),
        Arc::new(ZdcfError::NoSources),
    ]);
    let kinds: Vec<bool> = agg
        .iter()
        .map(|e| matches!(e, ZdcfError::NoSources))
        .collect();
    assert_eq!(kinds, vec![false, true]);
}
