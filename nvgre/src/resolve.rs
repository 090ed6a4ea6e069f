// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Interface name <-> index resolution

use net::interface::{InterfaceIndex, InterfaceName};
use ordermap::OrderMap;
use tracing::debug;

/// Maps between interface names and kernel interface indices.
pub trait InterfaceResolver {
    /// The index of the named interface, if it exists.
    fn index_of(&self, name: &InterfaceName) -> Option<InterfaceIndex>;
    /// The name of the interface with the given index, if it exists.
    fn name_of(&self, index: InterfaceIndex) -> Option<String>;
}

/// Resolves against the interfaces currently present on the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl InterfaceResolver for SystemResolver {
    fn index_of(&self, name: &InterfaceName) -> Option<InterfaceIndex> {
        let found = netdev::get_interfaces()
            .into_iter()
            .find(|interface| interface.name == name.as_ref())
            .and_then(|interface| InterfaceIndex::try_new(interface.index).ok());
        debug!("resolved {name} to {found:?}");
        found
    }

    fn name_of(&self, index: InterfaceIndex) -> Option<String> {
        netdev::get_interfaces()
            .into_iter()
            .find(|interface| interface.index == index.to_u32())
            .map(|interface| interface.name)
    }
}

/// A fixed name/index table.
#[derive(Debug, Default, Clone)]
pub struct StaticResolver {
    by_name: OrderMap<InterfaceName, InterfaceIndex>,
}

impl StaticResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an entry.
    #[must_use]
    pub fn with(mut self, name: InterfaceName, index: InterfaceIndex) -> Self {
        self.by_name.insert(name, index);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl FromIterator<(InterfaceName, InterfaceIndex)> for StaticResolver {
    fn from_iter<T: IntoIterator<Item = (InterfaceName, InterfaceIndex)>>(iter: T) -> Self {
        Self {
            by_name: iter.into_iter().collect(),
        }
    }
}

impl InterfaceResolver for StaticResolver {
    fn index_of(&self, name: &InterfaceName) -> Option<InterfaceIndex> {
        self.by_name.get(name).copied()
    }

    fn name_of(&self, index: InterfaceIndex) -> Option<String> {
        self.by_name
            .iter()
            .find(|(_, idx)| **idx == index)
            .map(|(name, _)| name.to_string())
    }
}
