//! Integration tests for file-backed sources.

use anyhow::Result;
use rstest::{fixture, rstest};
use test_helpers::files::FixtureDir;
use test_helpers::{json, zpl};
use zdcf::{Source, SourceComposer, ZdcfError, resolve};

#[fixture]
fn dir() -> FixtureDir {
    FixtureDir::new().expect("fixture directory")
}

#[rstest]
fn resolves_layers_read_from_disk(dir: FixtureDir) -> Result<()> {
    let base = dir.write("base.zpl", zpl::LEGACY_QUEUE)?;
    let overrides = dir.write("overrides.json", json::LISTENER_OVERRIDES)?;

    let mut composer = SourceComposer::new();
    composer.push_file(base);
    composer.push_file(overrides);
    let app = composer.resolve("listener")?;

    let frontend = app.require_device("main")?.require_socket("frontend")?;
    let options = frontend.options.as_ref().expect("options");
    assert_eq!(options.subscribe, vec!["1234 ".to_owned(), "1235 ".to_owned()]);
    assert_eq!(options.hwm, None);
    Ok(())
}

#[rstest]
fn missing_files_name_their_path(dir: FixtureDir) {
    let path = dir.path().join("absent.zpl");
    let err = resolve("listener", [Source::file(path.clone())]).expect_err("missing file");
    assert!(
        matches!(&*err, ZdcfError::File { path: reported, .. } if *reported == path),
        "unexpected error: {err}"
    );
}

#[rstest]
fn malformed_files_report_both_schemas(dir: FixtureDir) -> Result<()> {
    let path = dir.write("broken.zpl", "main\n\ttype = zmq_queue\n")?;
    let err = resolve("listener", [path]).expect_err("malformed");
    let ZdcfError::Aggregate(errors) = &*err else {
        panic!("unexpected error: {err}");
    };
    let syntax_lines: Vec<Option<usize>> = errors
        .iter()
        .map(|e| match e {
            ZdcfError::Schema { tree, .. } => match &**tree {
                ZdcfError::Syntax { line, .. } => Some(*line),
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(syntax_lines, vec![Some(2), Some(2)]);
    Ok(())
}
