//! The pre-1.0 schema, which places devices directly at the top level.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use crate::ZdcfResult;

use super::{ContextConfig, DeviceConfig, SocketConfig, VersionRange};

/// A legacy document: version, optional context, and devices keyed by name.
///
/// In JSON every top-level key other than `version` and `context` names a
/// device, so the top level cannot carry stray scalars such as comments: a
/// key whose value is not an object is rejected, naming that key. In ZPL
/// every top-level section other than `context` is a device and stray
/// top-level properties are rejected the same way.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyDocument {
    /// Schema version; required, and must lie in [`VersionRange::LEGACY`].
    pub version: f64,
    /// Messaging context settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextConfig>,
    /// Devices keyed by name.
    #[serde(flatten, deserialize_with = "deserialize_devices")]
    pub devices: BTreeMap<String, LegacyDevice>,
}

/// A legacy device: its type and sockets share one level of nesting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyDevice {
    /// Handler type.
    #[serde(rename = "type", default)]
    pub device_type: String,
    /// Sockets keyed by name.
    #[serde(flatten)]
    pub sockets: BTreeMap<String, SocketConfig>,
}

impl LegacyDocument {
    /// Ensure the declared version lies in [`VersionRange::LEGACY`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::ZdcfError::Version`] naming the offending value.
    pub fn check_version(&self) -> ZdcfResult<()> {
        VersionRange::LEGACY.check(self.version)
    }
}

impl From<LegacyDevice> for DeviceConfig {
    fn from(device: LegacyDevice) -> Self {
        Self {
            device_type: device.device_type,
            sockets: device.sockets,
        }
    }
}

fn deserialize_devices<'de, D>(deserializer: D) -> Result<BTreeMap<String, LegacyDevice>, D::Error>
where
    D: Deserializer<'de>,
{
    BTreeMap::<String, Value>::deserialize(deserializer)?
        .into_iter()
        .map(|(name, value)| -> Result<(String, LegacyDevice), D::Error> {
            if !value.is_object() {
                return Err(de::Error::custom(format!(
                    "top-level key '{name}' is not a device section: {value}"
                )));
            }
            let device = LegacyDevice::deserialize(&value)
                .map_err(|err| de::Error::custom(format!("device '{name}': {err}")))?;
            Ok((name, device))
        })
        .collect()
}
