//! Upgrade of legacy documents to the current schema.

use std::collections::BTreeMap;

use tracing::debug;

use crate::schema::{AppConfig, ConfigDocument, DeviceConfig, LegacyDocument};

/// Version stamped on migrated documents.
const MIGRATED_VERSION: f64 = 1.0;

/// Wrap a legacy document's context and devices in a single application
/// named `app_name`.
///
/// The legacy document is expected to have passed its own version check; this
/// function performs no validation and no merging.
///
/// # Examples
///
/// ```
/// let legacy = zdcf::decode_legacy("version = 0.1\nmain\n    type = zmq_queue\n")?;
/// let doc = zdcf::migrate(legacy, "listener");
/// assert_eq!(doc.version, 1.0);
/// assert!(doc.app("listener").is_some_and(|app| app.devices.contains_key("main")));
/// # Ok::<_, std::sync::Arc<zdcf::ZdcfError>>(())
/// ```
#[must_use]
pub fn migrate(legacy: LegacyDocument, app_name: &str) -> ConfigDocument {
    debug!(
        app = app_name,
        from = legacy.version,
        devices = legacy.devices.len(),
        "migrating legacy document"
    );
    let devices: BTreeMap<String, DeviceConfig> = legacy
        .devices
        .into_iter()
        .map(|(name, device)| (name, DeviceConfig::from(device)))
        .collect();
    let app = AppConfig {
        context: legacy.context,
        devices,
    };
    ConfigDocument {
        version: MIGRATED_VERSION,
        apps: BTreeMap::from([(app_name.to_owned(), app)]),
    }
}
