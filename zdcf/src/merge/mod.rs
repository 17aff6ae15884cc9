//! Layered merging of current-schema documents.
//!
//! Documents are applied left to right. At each level (apps, devices,
//! sockets) a key missing from the accumulated document is inserted with its
//! whole subtree; a key present in both is merged recursively. Sockets are
//! the leaves: each field is replaced only when the override supplies a
//! non-empty value.
//!
//! Two limitations match what existing layered configurations rely on:
//!
//! - an application's `context` is never merged; the first document that
//!   declares the application keeps its context;
//! - a socket's `option` block is replaced as a whole rather than field by
//!   field.

use std::collections::btree_map::Entry;
use std::sync::Arc;

use tracing::debug;

use crate::schema::{AppConfig, ConfigDocument, DeviceConfig, SocketConfig};
use crate::{ZdcfError, ZdcfResult};

/// Merge `documents` in order, later documents overriding earlier ones.
///
/// The first document is the base. Every document, the base included, must
/// declare a version in `[1, 2)`.
///
/// # Errors
///
/// Returns [`ZdcfError::NoSources`] for an empty input and
/// [`ZdcfError::Version`] when any document's version is out of range.
///
/// # Examples
///
/// ```
/// use zdcf::{merge, decode_current};
///
/// let defaults = decode_current(r#"{"version": 1.0, "apps": {"a": {"devices": {"d": {
///     "type": "zmq_queue",
///     "sockets": {"s": {"type": "PUB", "bind": ["tcp://*:1"]}}}}}}}"#)?;
/// let local = decode_current(r#"{"version": 1.0, "apps": {"a": {"devices": {"d": {
///     "sockets": {"s": {"bind": ["tcp://*:2"]}}}}}}}"#)?;
///
/// let merged = merge([defaults, local])?;
/// let socket = &merged.apps["a"].devices["d"].sockets["s"];
/// assert_eq!(socket.bind, vec![String::from("tcp://*:2")]);
/// assert_eq!(socket.socket_type, Some(zdcf::SocketType::Pub));
/// # Ok::<_, std::sync::Arc<zdcf::ZdcfError>>(())
/// ```
pub fn merge<I>(documents: I) -> ZdcfResult<ConfigDocument>
where
    I: IntoIterator<Item = ConfigDocument>,
{
    let mut layers = documents.into_iter();
    let mut base = layers.next().ok_or_else(|| Arc::new(ZdcfError::NoSources))?;
    base.check_version()?;
    for layer in layers {
        merge_into(&mut base, layer)?;
    }
    Ok(base)
}

/// Merge `other` into `base`, `other` taking precedence where it supplies
/// values.
///
/// # Errors
///
/// Returns [`ZdcfError::Version`] when `other` declares a version outside
/// `[1, 2)`; `base` is left untouched in that case.
pub fn merge_into(base: &mut ConfigDocument, other: ConfigDocument) -> ZdcfResult<()> {
    other.check_version()?;
    for (name, app) in other.apps {
        match base.apps.entry(name) {
            Entry::Vacant(slot) => {
                debug!(app = %slot.key(), "inserting app");
                slot.insert(app);
            }
            Entry::Occupied(mut slot) => merge_app(slot.get_mut(), app),
        }
    }
    Ok(())
}

fn merge_app(base: &mut AppConfig, other: AppConfig) {
    for (name, device) in other.devices {
        match base.devices.entry(name) {
            Entry::Vacant(slot) => {
                debug!(device = %slot.key(), "inserting device");
                slot.insert(device);
            }
            Entry::Occupied(mut slot) => merge_device(slot.get_mut(), device),
        }
    }
}

fn merge_device(base: &mut DeviceConfig, other: DeviceConfig) {
    for (name, socket) in other.sockets {
        match base.sockets.entry(name) {
            Entry::Vacant(slot) => {
                debug!(socket = %slot.key(), "inserting socket");
                slot.insert(socket);
            }
            Entry::Occupied(mut slot) => {
                debug!(socket = %slot.key(), "overriding socket");
                merge_socket(slot.get_mut(), socket);
            }
        }
    }
}

fn merge_socket(base: &mut SocketConfig, other: SocketConfig) {
    if other.socket_type.is_some() {
        base.socket_type = other.socket_type;
    }
    if other.options.is_some() {
        base.options = other.options;
    }
    if !other.bind.is_empty() {
        base.bind = other.bind;
    }
    if !other.connect.is_empty() {
        base.connect = other.connect;
    }
}
