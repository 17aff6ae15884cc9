//! Test helpers shared across crates.
//!
//! This crate provides canonical configuration texts, a temporary fixture
//! directory for file-backed sources and a `figment::Jail` wrapper.

pub mod figment;
pub mod files;

pub mod zpl {
    //! Configuration fixtures written in the indentation format.

    /// Legacy document with a context block and a `zmq_queue` device whose
    /// `frontend` socket carries options while `backend` does not.
    pub const LEGACY_QUEUE: &str = "\
version = 0.1
context
    iothreads = 1
    verbose = true
main
    type = zmq_queue
    frontend
        type = SUB
        option
            hwm = 1000
            swap = 25000000
        bind = tcp://eth0:5555
    backend
        connect = tcp://eth0:5556
";

    /// Legacy document whose subscriber accumulates two quoted subscriptions.
    pub const LEGACY_SUBSCRIBER: &str = "\
version = 0.2
main
    type = zmq_forwarder
    frontend
        type = SUB
        option
            subscribe = \"1234 \"
            subscribe = \"1235 \"
        connect = tcp://hub:5555
";

    /// Legacy document declaring `frontend` twice under `main` (line 6).
    pub const DUPLICATE_FRONTEND: &str = "\
version = 0.1
main
    type = zmq_queue
    frontend
        type = SUB
    frontend
        type = PUB
";
}

pub mod json {
    //! Configuration fixtures written as JSON.

    /// Current document describing the `listener` application.
    pub const CURRENT_LISTENER: &str = r#"{
    "version": 1.0001,
    "apps": {
        "listener": {
            "context": {
                "iothreads": 1,
                "verbose": true
            },
            "devices": {
                "main": {
                    "type": "zmq_queue",
                    "sockets": {
                        "frontend": {
                            "type": "SUB",
                            "option": {
                                "hwm": 1000,
                                "swap": 25000000
                            },
                            "bind": ["tcp://eth0:5555"]
                        },
                        "backend": {
                            "connect": ["tcp://eth0:5556"]
                        }
                    }
                }
            }
        }
    }
}"#;

    /// Base layer: `listener` subscribes to `4321 ` on its frontend.
    pub const LISTENER_BASE: &str = r#"{
    "version": 1.0,
    "apps": {
        "listener": {
            "context": { "iothreads": 1, "verbose": true },
            "devices": {
                "main": {
                    "type": "zmq_queue",
                    "sockets": {
                        "frontend": {
                            "type": "SUB",
                            "option": { "subscribe": ["4321 "] },
                            "bind": ["tcp://eth0:1111"]
                        }
                    }
                }
            }
        }
    }
}"#;

    /// Override layer: rebinds the `listener` frontend, replaces its
    /// subscriptions and introduces a `speaker` application.
    pub const LISTENER_OVERRIDES: &str = r#"{
    "version": 1.0,
    "apps": {
        "listener": {
            "devices": {
                "main": {
                    "sockets": {
                        "frontend": {
                            "option": { "subscribe": ["1234 ", "1235 "] },
                            "bind": ["tcp://eth0:5555"]
                        }
                    }
                }
            }
        },
        "speaker": {
            "devices": {
                "main": {
                    "type": "zmq_streamer",
                    "sockets": {
                        "out": { "type": "PUB", "bind": ["tcp://eth0:6000"] }
                    }
                }
            }
        }
    }
}"#;

    /// Legacy document written as JSON: every key other than `version` and
    /// `context` is a device.
    pub const LEGACY_ECHO: &str = r#"{
    "version": 0.5,
    "context": { "iothreads": 2 },
    "echo1": {
        "type": "echo_once",
        "in": { "type": "PULL", "bind": ["inproc://in"] }
    }
}"#;
}
