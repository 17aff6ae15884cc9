//! Read-only view of one application within a resolved document.

use std::sync::Arc;

use crate::schema::{AppConfig, ConfigDocument, ContextConfig, DeviceConfig, SocketConfig};
use crate::{LookupKind, ZdcfError, ZdcfResult};

/// The resolved configuration of a single application.
///
/// Produced by [`crate::resolve`]; nothing reachable from it can be mutated.
/// Plain lookups return `Option` because probing for optional devices and
/// sockets is routine; the `require_*` variants turn absence into an error.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedApp {
    name: String,
    version: f64,
    app: AppConfig,
    rest: ConfigDocument,
}

impl ResolvedApp {
    /// Select `app_name` from a merged document.
    ///
    /// # Errors
    ///
    /// Returns [`ZdcfError::NoSuchApp`] when the document has no such
    /// application.
    pub fn from_document(mut doc: ConfigDocument, app_name: &str) -> ZdcfResult<Self> {
        let app = doc.apps.remove(app_name).ok_or_else(|| {
            Arc::new(ZdcfError::NoSuchApp {
                name: app_name.to_owned(),
            })
        })?;
        Ok(Self {
            name: app_name.to_owned(),
            version: doc.version,
            app,
            rest: doc,
        })
    }

    /// Name of the application.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version of the merged document.
    #[must_use]
    pub const fn version(&self) -> f64 {
        self.version
    }

    /// The application's full configuration.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.app
    }

    /// Context settings, if any source declared them.
    #[must_use]
    pub const fn context(&self) -> Option<&ContextConfig> {
        self.app.context.as_ref()
    }

    /// Iterate over the application's devices in name order.
    pub fn devices(&self) -> impl Iterator<Item = (&str, &DeviceConfig)> {
        self.app
            .devices
            .iter()
            .map(|(name, device)| (name.as_str(), device))
    }

    /// Look up a device by name.
    #[must_use]
    pub fn device(&self, name: &str) -> Option<&DeviceConfig> {
        self.app.devices.get(name)
    }

    /// Look up a device by name, treating absence as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ZdcfError::NotFound`] when the device is absent.
    pub fn require_device(&self, name: &str) -> ZdcfResult<&DeviceConfig> {
        self.device(name)
            .ok_or_else(|| ZdcfError::not_found(LookupKind::Device, name))
    }

    /// Reassemble the full merged document, including other applications.
    #[must_use]
    pub fn into_document(self) -> ConfigDocument {
        let mut doc = self.rest;
        doc.apps.insert(self.name, self.app);
        doc
    }
}

impl DeviceConfig {
    /// Look up a socket by name.
    #[must_use]
    pub fn socket(&self, name: &str) -> Option<&SocketConfig> {
        self.sockets.get(name)
    }

    /// Look up a socket by name, treating absence as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ZdcfError::NotFound`] when the socket is absent.
    pub fn require_socket(&self, name: &str) -> ZdcfResult<&SocketConfig> {
        self.socket(name)
            .ok_or_else(|| ZdcfError::not_found(LookupKind::Socket, name))
    }
}
