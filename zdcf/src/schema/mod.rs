//! Typed ZDCF documents for the current and legacy schemas.
//!
//! The current schema (versions `[1, 2)`) nests devices under named
//! applications. The legacy schema (versions `[0, 1)`) has no application
//! wrapper; see [`LegacyDocument`] and [`crate::migrate`].
//!
//! Field names follow the JSON encoding: socket options are written under
//! `option`, the context thread count under `iothreads`.

mod legacy;
mod socket_type;
mod version;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ZdcfResult, ZdcfResultExt};

pub use legacy::{LegacyDevice, LegacyDocument};
pub use socket_type::{SocketType, UnknownSocketType};
pub use version::VersionRange;

/// A versioned configuration document in the current schema.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Schema version; required, and must lie in [`VersionRange::CURRENT`].
    pub version: f64,
    /// Applications keyed by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub apps: BTreeMap<String, AppConfig>,
}

/// Configuration of one application: its context and devices.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Messaging context settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextConfig>,
    /// Devices keyed by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub devices: BTreeMap<String, DeviceConfig>,
}

/// Messaging context settings shared by an application's devices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Number of I/O threads.
    #[serde(rename = "iothreads", default)]
    pub io_threads: u32,
    /// Whether the application should trace its activity.
    #[serde(default)]
    pub verbose: bool,
}

/// A device: a handler type string and the sockets it drives.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Handler type, matched against the caller's handler table.
    #[serde(rename = "type", default)]
    pub device_type: String,
    /// Sockets keyed by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sockets: BTreeMap<String, SocketConfig>,
}

/// One named socket endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketConfig {
    /// Socket role; `None` when the source leaves it unspecified or empty.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "socket_type::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub socket_type: Option<SocketType>,
    /// Tuning options, replaced as a whole when a later source supplies them.
    #[serde(rename = "option", default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionsConfig>,
    /// Addresses to bind, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bind: Vec<String>,
    /// Addresses to connect to, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connect: Vec<String>,
}

/// Socket tuning options. Unset fields leave the library default in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// High-water mark.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hwm: Option<u64>,
    /// Swap size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap: Option<i64>,
    /// I/O thread affinity bitmask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affinity: Option<u64>,
    /// Socket identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    /// Subscription filters, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subscribe: Vec<String>,
    /// Multicast data rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<i64>,
    /// Multicast recovery interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_ivl: Option<i64>,
    /// Whether multicast loopback is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcast_loop: Option<bool>,
    /// Kernel send buffer size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sndbuf: Option<u64>,
    /// Kernel receive buffer size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rcvbuf: Option<u64>,
}

impl ConfigDocument {
    /// Create an empty document declaring `version`.
    #[must_use]
    pub const fn new(version: f64) -> Self {
        Self {
            version,
            apps: BTreeMap::new(),
        }
    }

    /// Look up an application by name.
    #[must_use]
    pub fn app(&self, name: &str) -> Option<&AppConfig> {
        self.apps.get(name)
    }

    /// Ensure the declared version lies in [`VersionRange::CURRENT`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::ZdcfError::Version`] naming the offending value.
    pub fn check_version(&self) -> ZdcfResult<()> {
        VersionRange::CURRENT.check(self.version)
    }

    /// Encode the document in the current JSON shape.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ZdcfError::Json`] if serialization fails.
    pub fn to_json_value(&self) -> ZdcfResult<serde_json::Value> {
        serde_json::to_value(self).into_zdcf()
    }

    /// Encode the document as pretty-printed JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ZdcfError::Json`] if serialization fails.
    pub fn to_json_string(&self) -> ZdcfResult<String> {
        serde_json::to_string_pretty(self).into_zdcf()
    }
}

#[cfg(test)]
mod tests;
