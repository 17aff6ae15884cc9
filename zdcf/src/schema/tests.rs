//! Unit tests for schema types and their JSON encoding.

use rstest::rstest;
use serde_json::json;

use super::{
    AppConfig, ConfigDocument, ContextConfig, DeviceConfig, OptionsConfig, SocketConfig,
    SocketType, VersionRange,
};
use crate::ZdcfError;

fn listener() -> ConfigDocument {
    let frontend = SocketConfig {
        socket_type: Some(SocketType::Sub),
        options: Some(OptionsConfig {
            hwm: Some(1000),
            swap: Some(25_000_000),
            subscribe: vec!["1234 ".to_owned(), "1235 ".to_owned()],
            ..OptionsConfig::default()
        }),
        bind: vec!["tcp://eth0:5555".to_owned(), "tcp://eth0:5557".to_owned()],
        connect: Vec::new(),
    };
    let backend = SocketConfig {
        connect: vec!["tcp://eth0:5556".to_owned()],
        ..SocketConfig::default()
    };
    let main = DeviceConfig {
        device_type: "zmq_queue".to_owned(),
        sockets: [("frontend".to_owned(), frontend), ("backend".to_owned(), backend)]
            .into_iter()
            .collect(),
    };
    let app = AppConfig {
        context: Some(ContextConfig {
            io_threads: 1,
            verbose: true,
        }),
        devices: [("main".to_owned(), main)].into_iter().collect(),
    };
    ConfigDocument {
        version: 1.0,
        apps: [("listener".to_owned(), app)].into_iter().collect(),
    }
}

#[rstest]
fn json_round_trip_preserves_document() {
    let doc = listener();
    let text = doc.to_json_string().expect("encode");
    let decoded: ConfigDocument = serde_json::from_str(&text).expect("decode");
    assert_eq!(decoded, doc);
}

#[rstest]
fn encodes_options_under_option_key_and_omits_empty_fields() {
    let value = listener().to_json_value().expect("encode");
    let backend = &value["apps"]["listener"]["devices"]["main"]["sockets"]["backend"];
    assert_eq!(backend, &json!({"connect": ["tcp://eth0:5556"]}));
    let frontend = &value["apps"]["listener"]["devices"]["main"]["sockets"]["frontend"];
    assert_eq!(frontend["option"]["hwm"], json!(1000));
    assert_eq!(frontend["type"], json!("SUB"));
}

#[rstest]
#[case("PAIR", SocketType::Pair)]
#[case("XPUB", SocketType::XPub)]
#[case("XREP", SocketType::XRep)]
#[case("DOWNSTREAM", SocketType::Downstream)]
fn parses_socket_types(#[case] text: &str, #[case] expected: SocketType) {
    assert_eq!(text.parse::<SocketType>(), Ok(expected));
    assert_eq!(expected.to_string(), text);
    assert_eq!(
        serde_json::to_value(expected).expect("encode"),
        json!(text)
    );
}

#[rstest]
#[case("sub")]
#[case("STREAM")]
#[case("")]
fn rejects_unknown_socket_types(#[case] text: &str) {
    assert!(text.parse::<SocketType>().is_err());
    assert!(serde_json::from_value::<SocketType>(json!(text)).is_err());
}

#[rstest]
#[case(VersionRange::CURRENT, 1.0, true)]
#[case(VersionRange::CURRENT, 1.0001, true)]
#[case(VersionRange::CURRENT, 2.0, false)]
#[case(VersionRange::CURRENT, 2.5, false)]
#[case(VersionRange::CURRENT, 0.9, false)]
#[case(VersionRange::LEGACY, 0.0, true)]
#[case(VersionRange::LEGACY, 0.1, true)]
#[case(VersionRange::LEGACY, 1.0, false)]
#[case(VersionRange::LEGACY, -0.5, false)]
#[case(VersionRange::LEGACY, f64::NAN, false)]
fn version_ranges_are_half_open(
    #[case] range: VersionRange,
    #[case] version: f64,
    #[case] accepted: bool,
) {
    assert_eq!(range.contains(version), accepted);
}

#[rstest]
fn version_error_names_value_and_range() {
    let err = ConfigDocument::new(2.5)
        .check_version()
        .expect_err("out of range");
    assert!(matches!(&*err, ZdcfError::Version { found, .. } if *found == 2.5));
    assert_eq!(
        err.to_string(),
        "unsupported ZDCF version 2.5 (expected [1, 2))"
    );
}

#[rstest]
fn app_lookup_signals_absence() {
    let doc = listener();
    assert!(doc.app("listener").is_some());
    assert!(doc.app("speaker").is_none());
}

#[rstest]
#[case(json!({"type": ""}), None)]
#[case(json!({"type": null}), None)]
#[case(json!({}), None)]
#[case(json!({"type": "XSUB"}), Some(SocketType::XSub))]
fn socket_type_treats_empty_as_unset(
    #[case] value: serde_json::Value,
    #[case] expected: Option<SocketType>,
) {
    let socket: SocketConfig = serde_json::from_value(value).expect("decode");
    assert_eq!(socket.socket_type, expected);
}

#[rstest]
fn socket_type_still_rejects_unknown_names() {
    let err = serde_json::from_value::<SocketConfig>(json!({"type": "STREAM"}))
        .expect_err("unknown type");
    assert!(err.to_string().contains("unknown socket type 'STREAM'"), "{err}");
}
