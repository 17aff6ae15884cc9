//! Unit tests for JSON and ZPL decoding.

use rstest::rstest;
use serde_json::json;

use super::{decode_current, decode_current_value, decode_legacy, decode_legacy_value};
use crate::schema::SocketType;
use crate::ZdcfError;

#[rstest]
fn decodes_current_json() {
    let doc = decode_current(test_helpers::json::CURRENT_LISTENER).expect("decode");
    assert!((doc.version - 1.0001).abs() < f64::EPSILON);
    let listener = doc.app("listener").expect("listener app");
    let context = listener.context.as_ref().expect("context");
    assert_eq!(context.io_threads, 1);
    assert!(context.verbose);
    let main = listener.devices.get("main").expect("main device");
    assert_eq!(main.device_type, "zmq_queue");
    let frontend = main.sockets.get("frontend").expect("frontend");
    assert_eq!(frontend.socket_type, Some(SocketType::Sub));
    assert_eq!(frontend.bind, vec!["tcp://eth0:5555".to_owned()]);
    let backend = main.sockets.get("backend").expect("backend");
    assert_eq!(backend.socket_type, None);
    assert_eq!(backend.connect, vec!["tcp://eth0:5556".to_owned()]);
}

#[rstest]
fn decodes_legacy_zpl_onto_nested_sockets() {
    let doc = decode_legacy(test_helpers::zpl::LEGACY_QUEUE).expect("decode");
    assert!((doc.version - 0.1).abs() < f64::EPSILON);
    let main = doc.devices.get("main").expect("main device");
    assert_eq!(main.device_type, "zmq_queue");
    let frontend = main.sockets.get("frontend").expect("frontend");
    let options = frontend.options.as_ref().expect("frontend options");
    assert_eq!(options.hwm, Some(1000));
    assert_eq!(options.swap, Some(25_000_000));
    assert_eq!(frontend.bind, vec!["tcp://eth0:5555".to_owned()]);
    let backend = main.sockets.get("backend").expect("backend");
    assert_eq!(backend.options, None);
    assert_eq!(backend.connect, vec!["tcp://eth0:5556".to_owned()]);
    assert!(!doc.devices.contains_key("context"), "context is not a device");
}

#[rstest]
fn repeated_subscribe_lines_decode_in_order() {
    let text = "\
version = 0.1
main
    frontend
        type = SUB
        option
            subscribe = \"1234 \"
            subscribe = \"1235 \"
";
    let doc = decode_legacy(text).expect("decode");
    let subscribe = doc
        .devices
        .get("main")
        .and_then(|main| main.sockets.get("frontend"))
        .and_then(|frontend| frontend.options.as_ref())
        .map(|options| options.subscribe.clone());
    assert_eq!(subscribe, Some(vec!["1234 ".to_owned(), "1235 ".to_owned()]));
}

#[rstest]
fn decodes_current_schema_written_as_zpl() {
    let text = "\
version = 1.0
apps
    listener
        context
            iothreads = 2
            verbose = false
        devices
            main
                type = zmq_streamer
                sockets
                    in
                        type = PULL
                        bind = tcp://127.0.0.1:5555
                        bind = tcp://127.0.0.1:5557
";
    let doc = decode_current(text).expect("decode");
    let listener = doc.app("listener").expect("listener");
    assert_eq!(listener.context.as_ref().map(|c| c.io_threads), Some(2));
    let socket = listener
        .devices
        .get("main")
        .and_then(|main| main.sockets.get("in"))
        .expect("socket");
    assert_eq!(socket.socket_type, Some(SocketType::Pull));
    assert_eq!(socket.bind.len(), 2);
}

#[rstest]
fn decodes_legacy_json_with_top_level_devices() {
    let text = r#"{
        "version": 0.5,
        "context": {"iothreads": 3},
        "main": {
            "type": "zmq_forwarder",
            "frontend": {"type": "XSUB", "connect": ["tcp://up:1"]}
        }
    }"#;
    let doc = decode_legacy(text).expect("decode");
    assert_eq!(doc.context.as_ref().map(|c| c.io_threads), Some(3));
    let main = doc.devices.get("main").expect("main");
    assert_eq!(main.device_type, "zmq_forwarder");
    assert_eq!(
        main.sockets.get("frontend").and_then(|s| s.socket_type),
        Some(SocketType::XSub)
    );
}

#[rstest]
#[case(r#"{"version": 2.5}"#, 2.5)]
#[case(r#"{"version": 0.9}"#, 0.9)]
#[case("version = 2.5", 2.5)]
fn current_schema_rejects_out_of_range_versions(#[case] text: &str, #[case] expected: f64) {
    let err = decode_current(text).expect_err("version rejected");
    assert!(
        matches!(&*err, ZdcfError::Version { found, .. } if (found - expected).abs() < f64::EPSILON),
        "unexpected error: {err}"
    );
}

#[rstest]
#[case("version = 0.1")]
#[case(r#"{"version": 0.1}"#)]
fn legacy_schema_accepts_pre_one_versions(#[case] text: &str) {
    let doc = decode_legacy(text).expect("decode");
    assert!((doc.version - 0.1).abs() < f64::EPSILON);
}

#[rstest]
fn legacy_schema_rejects_current_versions() {
    let err = decode_legacy("version = 1.0").expect_err("version rejected");
    assert!(matches!(&*err, ZdcfError::Version { .. }), "unexpected error: {err}");
}

#[rstest]
fn reports_both_failures_when_no_format_matches() {
    let err = decode_current("{ not json\n  nor zpl").expect_err("undecodable");
    let ZdcfError::Schema { tree, .. } = &*err else {
        panic!("unexpected error: {err}");
    };
    assert!(matches!(&**tree, ZdcfError::Syntax { line: 1, .. }));
    let message = err.to_string();
    assert!(message.starts_with("failed to parse as JSON ("), "{message}");
    assert!(message.contains("or as ZPL (line 1:"), "{message}");
}

#[rstest]
#[case("version = 0.1\nmain\n    frontend\n        type = STREAM\n", "main.frontend.type")]
#[case("version = 0.1\nmain\n    type = a\n    type = b\n", "main.type")]
#[case("version = 0.1\ncontext\n    verbose = maybe\n", "context.verbose")]
#[case("version = 0.1\ncontext\n    iothreads = -1\n", "context.iothreads")]
#[case("version = 0.1\nmain\n    frontend\n        option\n            hwm = lots\n", "main.frontend.option.hwm")]
#[case("version = 0.1\nstray = 1\n", "stray")]
#[case("version = 0.1\nmain\n    frontend\n        colour = red\n", "main.frontend.colour")]
fn tree_binding_failures_name_the_field(#[case] text: &str, #[case] path: &str) {
    let err = decode_legacy(text).expect_err("binding fails");
    let ZdcfError::Schema { tree, .. } = &*err else {
        panic!("unexpected error: {err}");
    };
    assert!(
        matches!(&**tree, ZdcfError::Field { path: p, .. } if p == path),
        "unexpected tree error: {tree}"
    );
}

#[rstest]
fn current_tree_rejects_legacy_layout() {
    let err = decode_current(test_helpers::zpl::LEGACY_QUEUE).expect_err("legacy layout");
    assert!(matches!(&*err, ZdcfError::Schema { .. }), "unexpected error: {err}");
}

#[rstest]
fn decodes_parsed_json_values() {
    let current = json!({"version": 1.0, "apps": {"a": {"devices": {"d": {"type": "t"}}}}});
    let doc = decode_current_value(&current).expect("decode");
    assert_eq!(doc.app("a").map(|a| a.devices.len()), Some(1));

    let legacy = json!({"version": 0.2, "d": {"type": "t"}});
    let old = decode_legacy_value(&legacy).expect("decode");
    assert!(old.devices.contains_key("d"));

    let err = decode_current_value(&json!({"version": "one"})).expect_err("bad type");
    assert!(matches!(&*err, ZdcfError::Json(_)), "unexpected error: {err}");
}

#[rstest]
fn json_without_version_is_rejected() {
    let err = decode_current(r#"{"apps": {}}"#).expect_err("version missing");
    let ZdcfError::Schema { json, .. } = &*err else {
        panic!("unexpected error: {err}");
    };
    assert!(json.to_string().contains("missing field `version`"), "{json}");

    let err = decode_legacy_value(&json!({"main": {"type": "zmq_queue"}})).expect_err("missing");
    assert!(matches!(&*err, ZdcfError::Json(_)), "unexpected error: {err}");
}

#[rstest]
#[case("main\n    type = zmq_queue\n")]
#[case("context\n    iothreads = 1\n")]
fn zpl_without_version_is_rejected(#[case] text: &str) {
    let err = decode_legacy(text).expect_err("version missing");
    let ZdcfError::Schema { tree, .. } = &*err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(tree.to_string(), "invalid value for 'version': missing");
}

#[rstest]
#[case(r#"{"version": 1.0, "apps": {"a": {"devices": {"d": {"sockets": {"s": {"type": ""}}}}}}}"#)]
#[case("version = 1.0\napps\n    a\n        devices\n            d\n                sockets\n                    s\n                        type = \"\"\n")]
fn empty_socket_type_reads_as_absent(#[case] text: &str) {
    let doc = decode_current(text).expect("decode");
    let socket = doc
        .app("a")
        .and_then(|app| app.devices.get("d"))
        .and_then(|device| device.sockets.get("s"))
        .expect("socket");
    assert_eq!(socket.socket_type, None);
}

#[rstest]
fn legacy_json_names_stray_top_level_keys() {
    let err = decode_legacy(r#"{"version": 0.5, "comment": "x", "main": {"type": "q"}}"#)
        .expect_err("stray scalar");
    let message = err.to_string();
    assert!(
        message.contains("top-level key 'comment' is not a device section"),
        "{message}"
    );

    let err = decode_legacy_value(&json!({"version": 0.5, "main": {"type": 7}}))
        .expect_err("bad device");
    assert!(err.to_string().contains("device 'main'"), "unexpected error: {err}");
}
