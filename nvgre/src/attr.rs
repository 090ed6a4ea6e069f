// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! NVGRE link attribute identifiers (`IFLA_NVGRE_*`)

use strum::{EnumCount, EnumIter, FromRepr, IntoStaticStr};

/// Attribute types nested inside the link info data of an NVGRE device.
///
/// The numbering is part of the kernel ABI and must never change. Zero is the unused
/// `UNSPEC` slot and is not a variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(EnumCount, EnumIter, FromRepr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[repr(u16)]
pub enum NvgreAttr {
    /// Virtual network id, `u32`
    Id = 1,
    /// Multicast group (or remote) address, 4 bytes in network order
    Group = 2,
    /// Underlay interface index, `u32`
    Link = 3,
    /// Local address, 4 bytes in network order
    Local = 4,
    /// `u8`
    Ttl = 5,
    /// `u8`, 1 means inherit
    Tos = 6,
    /// `u8` boolean
    Learning = 7,
    /// Forwarding entry ageing in seconds, `u32`, 0 means never
    Ageing = 8,
    /// Maximum number of forwarding entries, `u32`
    Limit = 9,
    /// Source port range
    PortRange = 10,
    Proxy = 11,
    Rsc = 12,
    L2Miss = 13,
    L3Miss = 14,
    /// Destination port
    Port = 15,
}

impl NvgreAttr {
    /// Highest attribute type this codec knows about.
    pub const MAX: u16 = NvgreAttr::Port as u16;

    /// The numeric attribute type
    #[must_use]
    pub const fn id(self) -> u16 {
        self as u16
    }

    /// Map a numeric attribute type back to a known attribute.
    ///
    /// Unknown types (including zero) yield `None` so that newer kernels can add attributes
    /// without breaking older decoders.
    #[must_use]
    pub fn from_id(id: u16) -> Option<NvgreAttr> {
        NvgreAttr::from_repr(id)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl From<NvgreAttr> for u16 {
    fn from(attr: NvgreAttr) -> u16 {
        attr.id()
    }
}

#[cfg(test)]
mod test {
    use super::NvgreAttr;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn identifiers_are_dense_and_stable() {
        assert_eq!(NvgreAttr::COUNT, 15);
        assert_eq!(usize::from(NvgreAttr::MAX), NvgreAttr::COUNT);
        for (expected, attr) in (1u16..).zip(NvgreAttr::iter()) {
            assert_eq!(attr.id(), expected);
            assert_eq!(NvgreAttr::from_id(expected), Some(attr));
        }
        assert_eq!(NvgreAttr::Ageing.id(), 8);
        assert_eq!(NvgreAttr::L3Miss.id(), 14);
    }

    #[test]
    fn unknown_identifiers_are_not_errors() {
        assert_eq!(NvgreAttr::from_id(0), None);
        assert_eq!(NvgreAttr::from_id(NvgreAttr::MAX + 1), None);
        assert_eq!(NvgreAttr::from_id(u16::MAX), None);
    }

    #[test]
    fn names() {
        assert_eq!(NvgreAttr::PortRange.name(), "port_range");
        assert_eq!(NvgreAttr::Id.name(), "id");
    }
}
