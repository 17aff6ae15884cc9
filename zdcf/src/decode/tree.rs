//! Binding of ZPL property trees onto the typed schema.
//!
//! Each schema shape lists the properties and sections it understands; any
//! other key is rejected so a document written for one schema does not
//! silently decode as the other. A property with one value binds a scalar,
//! while list fields take every value in source order.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::schema::{
    AppConfig, ConfigDocument, ContextConfig, DeviceConfig, LegacyDevice, LegacyDocument,
    OptionsConfig, SocketConfig,
};
use crate::zpl::PropertyTree;
use crate::{ZdcfError, ZdcfResult};

/// Types that can be built from a ZPL section.
pub(crate) trait FromTree: Sized {
    fn from_node(node: &Node<'_>) -> ZdcfResult<Self>;

    fn from_tree(tree: &PropertyTree) -> ZdcfResult<Self> {
        Self::from_node(&Node::root(tree))
    }
}

/// A section together with its dotted path, used in error messages.
pub(crate) struct Node<'a> {
    tree: &'a PropertyTree,
    path: String,
}

impl<'a> Node<'a> {
    const fn root(tree: &'a PropertyTree) -> Self {
        Self {
            tree,
            path: String::new(),
        }
    }

    fn key_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_owned()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    fn child(&self, key: &str, tree: &'a PropertyTree) -> Self {
        Self {
            tree,
            path: self.key_path(key),
        }
    }

    /// Reject properties outside `known`.
    fn expect_properties(&self, known: &[&str]) -> ZdcfResult<()> {
        self.tree
            .properties()
            .find(|(key, _)| !known.contains(key))
            .map_or(Ok(()), |(key, _)| {
                Err(ZdcfError::field(self.key_path(key), "unknown property"))
            })
    }

    /// Reject properties and sections outside the given tables.
    fn expect_only(&self, properties: &[&str], sections: &[&str]) -> ZdcfResult<()> {
        self.expect_properties(properties)?;
        self.tree
            .sections()
            .find(|(key, _)| !sections.contains(key))
            .map_or(Ok(()), |(key, _)| {
                Err(ZdcfError::field(self.key_path(key), "unknown section"))
            })
    }

    fn single(&self, key: &str) -> ZdcfResult<Option<&'a str>> {
        match self.tree.values(key) {
            None => Ok(None),
            Some([value]) => Ok(Some(value.as_str())),
            Some(values) => Err(ZdcfError::field(
                self.key_path(key),
                format!("expected a single value, found {}", values.len()),
            )),
        }
    }

    fn scalar<T>(&self, key: &str) -> ZdcfResult<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.single(key)?
            .map(|raw| self.parse(key, raw))
            .transpose()
    }

    /// A scalar that must be present.
    fn required<T>(&self, key: &str) -> ZdcfResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.scalar(key)?
            .ok_or_else(|| ZdcfError::field(self.key_path(key), "missing"))
    }

    /// A scalar where an empty value counts as absent.
    fn non_empty<T>(&self, key: &str) -> ZdcfResult<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.single(key)?
            .filter(|raw| !raw.is_empty())
            .map(|raw| self.parse(key, raw))
            .transpose()
    }

    fn parse<T>(&self, key: &str, raw: &str) -> ZdcfResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        raw.parse::<T>()
            .map_err(|err| ZdcfError::field(self.key_path(key), format!("{err}: '{raw}'")))
    }

    fn flag(&self, key: &str) -> ZdcfResult<Option<bool>> {
        self.single(key)?
            .map(|raw| match raw {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                other => Err(ZdcfError::field(
                    self.key_path(key),
                    format!("expected a boolean, found '{other}'"),
                )),
            })
            .transpose()
    }

    fn text(&self, key: &str) -> ZdcfResult<Option<String>> {
        Ok(self.single(key)?.map(str::to_owned))
    }

    fn list(&self, key: &str) -> Vec<String> {
        self.tree.values(key).map(<[String]>::to_vec).unwrap_or_default()
    }

    fn section(&self, key: &str) -> Option<Self> {
        self.tree.section(key).map(|tree| self.child(key, tree))
    }

    /// Decode every child section not named in `skip` into a keyed map.
    fn entries<T: FromTree>(&self, skip: &[&str]) -> ZdcfResult<BTreeMap<String, T>> {
        self.tree
            .sections()
            .filter(|(key, _)| !skip.contains(key))
            .map(|(key, tree)| {
                T::from_node(&self.child(key, tree)).map(|value| (key.to_owned(), value))
            })
            .collect()
    }

    fn keyed<T: FromTree>(&self, key: &str) -> ZdcfResult<BTreeMap<String, T>> {
        self.section(key)
            .map_or_else(|| Ok(BTreeMap::new()), |node| node.entries(&[]))
    }
}

impl FromTree for ConfigDocument {
    fn from_node(node: &Node<'_>) -> ZdcfResult<Self> {
        node.expect_only(&["version"], &["apps"])?;
        Ok(Self {
            version: node.required("version")?,
            apps: node.keyed("apps")?,
        })
    }
}

impl FromTree for AppConfig {
    fn from_node(node: &Node<'_>) -> ZdcfResult<Self> {
        node.expect_only(&[], &["context", "devices"])?;
        Ok(Self {
            context: node
                .section("context")
                .map(|ctx| ContextConfig::from_node(&ctx))
                .transpose()?,
            devices: node.keyed("devices")?,
        })
    }
}

impl FromTree for ContextConfig {
    fn from_node(node: &Node<'_>) -> ZdcfResult<Self> {
        node.expect_only(&["iothreads", "verbose"], &[])?;
        Ok(Self {
            io_threads: node.scalar("iothreads")?.unwrap_or_default(),
            verbose: node.flag("verbose")?.unwrap_or_default(),
        })
    }
}

impl FromTree for DeviceConfig {
    fn from_node(node: &Node<'_>) -> ZdcfResult<Self> {
        node.expect_only(&["type"], &["sockets"])?;
        Ok(Self {
            device_type: node.text("type")?.unwrap_or_default(),
            sockets: node.keyed("sockets")?,
        })
    }
}

impl FromTree for SocketConfig {
    fn from_node(node: &Node<'_>) -> ZdcfResult<Self> {
        node.expect_only(&["type", "bind", "connect"], &["option"])?;
        Ok(Self {
            socket_type: node.non_empty("type")?,
            options: node
                .section("option")
                .map(|opts| OptionsConfig::from_node(&opts))
                .transpose()?,
            bind: node.list("bind"),
            connect: node.list("connect"),
        })
    }
}

impl FromTree for OptionsConfig {
    fn from_node(node: &Node<'_>) -> ZdcfResult<Self> {
        node.expect_only(
            &[
                "hwm",
                "swap",
                "affinity",
                "identity",
                "subscribe",
                "rate",
                "recovery_ivl",
                "mcast_loop",
                "sndbuf",
                "rcvbuf",
            ],
            &[],
        )?;
        Ok(Self {
            hwm: node.scalar("hwm")?,
            swap: node.scalar("swap")?,
            affinity: node.scalar("affinity")?,
            identity: node.text("identity")?,
            subscribe: node.list("subscribe"),
            rate: node.scalar("rate")?,
            recovery_ivl: node.scalar("recovery_ivl")?,
            mcast_loop: node.flag("mcast_loop")?,
            sndbuf: node.scalar("sndbuf")?,
            rcvbuf: node.scalar("rcvbuf")?,
        })
    }
}

impl FromTree for LegacyDocument {
    fn from_node(node: &Node<'_>) -> ZdcfResult<Self> {
        node.expect_properties(&["version"])?;
        Ok(Self {
            version: node.required("version")?,
            context: node
                .section("context")
                .map(|ctx| ContextConfig::from_node(&ctx))
                .transpose()?,
            devices: node.entries(&["context"])?,
        })
    }
}

impl FromTree for LegacyDevice {
    fn from_node(node: &Node<'_>) -> ZdcfResult<Self> {
        node.expect_properties(&["type"])?;
        Ok(Self {
            device_type: node.text("type")?.unwrap_or_default(),
            sockets: node.entries(&[])?,
        })
    }
}
