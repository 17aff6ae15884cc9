//! Caller-supplied mapping from device type strings to handlers.
//!
//! A resolved application names a type for each device but says nothing about
//! how to run it. The runtime builds a [`DeviceHandlers`] table at startup,
//! registering one handler per type pattern, and asks it to pair every device
//! with a handler before anything is started.
//!
//! ```
//! use zdcf::DeviceHandlers;
//!
//! let mut handlers = DeviceHandlers::new();
//! handlers.register("^zmq_(queue|streamer|forwarder)$", "builtin")?;
//! handlers.register("^echo", "echo")?;
//!
//! let app = zdcf::resolve("demo", ["version = 0.1\na\n    type = zmq_queue\nb\n    type = echo_once\n"])?;
//! let plan = handlers.plan(&app)?;
//! let chosen: Vec<(&str, &&str)> = plan.iter().map(|p| (p.name, p.handler)).collect();
//! assert_eq!(chosen, vec![("a", &"builtin"), ("b", &"echo")]);
//! # Ok::<_, std::sync::Arc<zdcf::ZdcfError>>(())
//! ```

use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use crate::schema::DeviceConfig;
use crate::{ResolvedApp, ZdcfError, ZdcfResult};

/// Ordered table of `(pattern, handler)` registrations.
///
/// Patterns are unanchored regular expressions; add `^` and `$` to match a
/// whole type string. When several patterns match, the most recently
/// registered one wins, so callers can override a broad default with a more
/// specific handler.
#[derive(Clone, Debug)]
pub struct DeviceHandlers<H> {
    entries: Vec<(Regex, H)>,
}

/// A device paired with the handler chosen for it.
#[derive(Debug)]
pub struct DevicePlan<'a, H> {
    /// Device name.
    pub name: &'a str,
    /// Device configuration.
    pub device: &'a DeviceConfig,
    /// Handler selected for the device's type.
    pub handler: &'a H,
}

impl<H> Default for DeviceHandlers<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> DeviceHandlers<H> {
    /// Create an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register `handler` for device types matching `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`ZdcfError::InvalidPattern`] when `pattern` does not compile.
    pub fn register(&mut self, pattern: &str, handler: H) -> ZdcfResult<()> {
        let regex = Regex::new(pattern).map_err(|source| {
            Arc::new(ZdcfError::InvalidPattern {
                pattern: pattern.to_owned(),
                source,
            })
        })?;
        self.entries.push((regex, handler));
        Ok(())
    }

    /// Number of registrations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the handler for `device_type`, preferring later registrations.
    #[must_use]
    pub fn lookup(&self, device_type: &str) -> Option<&H> {
        self.entries
            .iter()
            .rev()
            .find(|(pattern, _)| pattern.is_match(device_type))
            .map(|(_, handler)| handler)
    }

    /// Pair every device of `app` with its handler, in device name order.
    ///
    /// # Errors
    ///
    /// Returns [`ZdcfError::NoDevices`] when the application declares no
    /// devices and [`ZdcfError::UnregisteredDeviceType`] for the first device
    /// whose type matches no registration.
    pub fn plan<'a>(&'a self, app: &'a ResolvedApp) -> ZdcfResult<Vec<DevicePlan<'a, H>>> {
        if app.config().devices.is_empty() {
            return Err(Arc::new(ZdcfError::NoDevices {
                app: app.name().to_owned(),
            }));
        }
        app.devices()
            .map(|(name, device)| -> ZdcfResult<DevicePlan<'a, H>> {
                let handler = self.lookup(&device.device_type).ok_or_else(|| {
                    Arc::new(ZdcfError::UnregisteredDeviceType {
                        device: name.to_owned(),
                        device_type: device.device_type.clone(),
                    })
                })?;
                debug!(
                    app = app.name(),
                    device = name,
                    device_type = %device.device_type,
                    "planned device"
                );
                Ok(DevicePlan {
                    name,
                    device,
                    handler,
                })
            })
            .collect()
    }
}
