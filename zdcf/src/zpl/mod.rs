//! Parser for the indentation-based ZPL property format.
//!
//! ZPL describes nested sections with four-space indentation:
//!
//! ```text
//! version = 0.1
//! main
//!     type = zmq_queue
//!     frontend
//!         type = SUB
//!         bind = tcp://eth0:5555
//! ```
//!
//! Each line is either blank (after stripping a `#` comment), a
//! `key = value` property appended to the current section, or a bare `key`
//! opening a child section one level deeper. Properties repeated at the same
//! level accumulate in source order, which is how multi-valued fields such as
//! `bind` are written.

mod line;

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use tracing::trace;

use crate::{SyntaxReason, ZdcfError, ZdcfResult};

use line::Line;

/// A parsed ZPL section: ordered value lists keyed by property name, plus
/// named child sections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyTree {
    properties: BTreeMap<String, Vec<String>>,
    sections: BTreeMap<String, PropertyTree>,
}

impl PropertyTree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            properties: BTreeMap::new(),
            sections: BTreeMap::new(),
        }
    }

    /// Values recorded for `key`, in source order.
    #[must_use]
    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.properties.get(key).map(Vec::as_slice)
    }

    /// Child section named `key`.
    #[must_use]
    pub fn section(&self, key: &str) -> Option<&Self> {
        self.sections.get(key)
    }

    /// Iterate over the properties of this section in key order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.properties
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Iterate over the child sections of this section in key order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.sections.iter().map(|(key, tree)| (key.as_str(), tree))
    }

    /// Returns `true` when the section holds neither properties nor children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.sections.is_empty()
    }

    /// Append `value` to the list recorded for `key`.
    pub fn push_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties
            .entry(key.into())
            .or_default()
            .push(value.into());
    }

    /// Insert an empty child section, returning `false` when `key` is taken.
    pub fn open_section(&mut self, key: impl Into<String>) -> bool {
        match self.sections.entry(key.into()) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(Self::new());
                true
            }
        }
    }

    fn descend_mut(&mut self, path: &[String]) -> &mut Self {
        let mut node = self;
        for key in path {
            node = node.sections.entry(key.clone()).or_default();
        }
        node
    }
}

impl FromStr for PropertyTree {
    type Err = Arc<ZdcfError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse ZPL `text` into a [`PropertyTree`].
///
/// # Errors
///
/// Returns [`ZdcfError::Syntax`] carrying the one-based line number when a
/// line is malformed (including indentation that is not a multiple of four
/// spaces) or when a subsection name is repeated under the same parent.
///
/// # Examples
///
/// ```
/// let tree = zdcf::zpl::parse("main\n    bind = tcp://a\n    bind = tcp://b\n")?;
/// let main = tree.section("main").expect("section is present");
/// assert_eq!(main.values("bind"), Some(&["tcp://a".to_owned(), "tcp://b".to_owned()][..]));
/// # Ok::<_, std::sync::Arc<zdcf::ZdcfError>>(())
/// ```
pub fn parse(text: &str) -> ZdcfResult<PropertyTree> {
    let mut root = PropertyTree::new();
    let mut ancestry: Vec<String> = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let lineno = index + 1;
        let Some(line) = Line::scan(raw, lineno)? else {
            continue;
        };
        ancestry.truncate(line.depth);
        let section = root.descend_mut(&ancestry);
        match line.value {
            Some(value) => section.push_value(line.key, value),
            None => {
                if !section.open_section(line.key) {
                    return Err(ZdcfError::syntax(
                        lineno,
                        SyntaxReason::DuplicateSection(line.key.to_owned()),
                    ));
                }
                trace!(
                    line = lineno,
                    section = line.key,
                    depth = line.depth,
                    "opened ZPL section"
                );
                ancestry.push(line.key.to_owned());
            }
        }
    }
    Ok(root)
}
