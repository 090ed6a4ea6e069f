// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The NVGRE device configuration record and its attribute encoding

use derive_builder::Builder;
use net::interface::InterfaceIndex;
use net::ipv4::{DsField, MulticastIpv4Addr, UnicastIpv4Addr};
use net::vni::Vni;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attr::NvgreAttr;
use crate::nla::{AttrBuffer, AttrError};

#[allow(unused_imports)] // re-export
#[cfg(any(test, feature = "bolero"))]
pub use contract::*;

/// Type of service of the outer header.
///
/// On the wire this is a single octet where 0 means "not configured" and 1 means "copy from
/// the inner packet". A literal ToS of 1 therefore cannot be expressed and is refused by
/// [`Tos::try_from`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tos {
    #[default]
    Unset,
    Inherit,
    Value(DsField),
}

/// A literal ToS which collides with the inherit marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("TOS {0} is reserved to mean inherit")]
pub struct ReservedTos(pub DsField);

impl Tos {
    /// Wire value meaning "inherit from the inner packet"
    pub const INHERIT: u8 = 1;

    /// The wire octet
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Tos::Unset => 0,
            Tos::Inherit => Tos::INHERIT,
            Tos::Value(field) => field.as_u8(),
        }
    }

    /// Interpret a wire octet.
    #[must_use]
    pub fn from_wire(raw: u8) -> Tos {
        match raw {
            0 => Tos::Unset,
            Tos::INHERIT => Tos::Inherit,
            _ => Tos::Value(DsField::new(raw)),
        }
    }
}

impl TryFrom<DsField> for Tos {
    type Error = ReservedTos;

    fn try_from(field: DsField) -> Result<Self, Self::Error> {
        match field.as_u8() {
            0 => Ok(Tos::Unset),
            Tos::INHERIT => Err(ReservedTos(field)),
            _ => Ok(Tos::Value(field)),
        }
    }
}

/// Expiry of learned forwarding entries.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ageing {
    /// Leave it to the kernel default; no attribute is sent.
    #[default]
    Unset,
    /// Entries never expire; sent as an explicit 0.
    NoExpiry,
    /// Seconds, never zero.
    Timer(u32),
}

impl Ageing {
    /// A timer of `seconds`. Zero is the same as not configuring one.
    #[must_use]
    pub fn timer(seconds: u32) -> Ageing {
        if seconds == 0 {
            Ageing::Unset
        } else {
            Ageing::Timer(seconds)
        }
    }

    /// The value to send, if any.
    #[must_use]
    pub fn wire_value(self) -> Option<u32> {
        match self {
            Ageing::Unset | Ageing::Timer(0) => None,
            Ageing::NoExpiry => Some(0),
            Ageing::Timer(seconds) => Some(seconds),
        }
    }
}

/// Everything configurable on an NVGRE device.
///
/// `ttl` 0 lets the kernel pick; `inherit` on the command line also ends up as 0 because the
/// wire format has no separate marker for it. `max_address` 0 means unlimited.
#[derive(Builder, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NvgreConfig {
    pub vni: Vni,
    #[builder(default, setter(strip_option))]
    pub group: Option<MulticastIpv4Addr>,
    #[builder(default, setter(strip_option))]
    pub local: Option<UnicastIpv4Addr>,
    #[builder(default, setter(strip_option))]
    pub link: Option<InterfaceIndex>,
    #[builder(default)]
    pub ttl: u8,
    #[builder(default)]
    pub tos: Tos,
    #[builder(default = true)]
    pub learning: bool,
    #[builder(default)]
    pub proxy: bool,
    #[builder(default)]
    pub rsc: bool,
    #[builder(default)]
    pub l2miss: bool,
    #[builder(default)]
    pub l3miss: bool,
    #[builder(default)]
    pub ageing: Ageing,
    #[builder(default)]
    pub max_address: u32,
}

impl NvgreConfig {
    /// A record with every optional field at its default.
    #[must_use]
    pub fn new(vni: Vni) -> Self {
        Self {
            vni,
            group: None,
            local: None,
            link: None,
            ttl: 0,
            tos: Tos::Unset,
            learning: true,
            proxy: false,
            rsc: false,
            l2miss: false,
            l3miss: false,
            ageing: Ageing::Unset,
            max_address: 0,
        }
    }

    /// Append this record's attributes to `buf`.
    ///
    /// The order is fixed: id, group, local, link, ttl, tos, learning, proxy, rsc, l2miss,
    /// l3miss, ageing, limit. Group, local, link, ageing and limit are only sent when set.
    ///
    /// Either every attribute is appended or `buf` is left as it was.
    ///
    /// # Errors
    ///
    /// Returns an [`AttrError`] if `buf` runs out of room or already holds one of the attributes.
    pub fn encode(&self, buf: &mut AttrBuffer) -> Result<(), AttrError> {
        let mark = buf.mark();
        if let Err(e) = self.append_all(buf) {
            buf.truncate(mark);
            return Err(e);
        }
        debug!(
            "encoded nvgre vni {} into {} attribute bytes",
            self.vni,
            buf.len()
        );
        Ok(())
    }

    fn append_all(&self, buf: &mut AttrBuffer) -> Result<(), AttrError> {
        buf.append_u32(NvgreAttr::Id, self.vni.as_u32())?;
        if let Some(group) = self.group {
            buf.append_ipv4(NvgreAttr::Group, group.inner())?;
        }
        if let Some(local) = self.local.filter(|l| !l.inner().is_unspecified()) {
            buf.append_ipv4(NvgreAttr::Local, local.inner())?;
        }
        if let Some(link) = self.link {
            buf.append_u32(NvgreAttr::Link, link.to_u32())?;
        }
        buf.append_u8(NvgreAttr::Ttl, self.ttl)?;
        buf.append_u8(NvgreAttr::Tos, self.tos.as_u8())?;
        buf.append_u8(NvgreAttr::Learning, u8::from(self.learning))?;
        buf.append_u8(NvgreAttr::Proxy, u8::from(self.proxy))?;
        buf.append_u8(NvgreAttr::Rsc, u8::from(self.rsc))?;
        buf.append_u8(NvgreAttr::L2Miss, u8::from(self.l2miss))?;
        buf.append_u8(NvgreAttr::L3Miss, u8::from(self.l3miss))?;
        if let Some(age) = self.ageing.wire_value() {
            buf.append_u32(NvgreAttr::Ageing, age)?;
        }
        if self.max_address != 0 {
            buf.append_u32(NvgreAttr::Limit, self.max_address)?;
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use crate::config::{Ageing, NvgreConfig, Tos};
    use bolero::{Driver, TypeGenerator};
    use net::ipv4::{DsField, UnicastIpv4Addr};

    impl TypeGenerator for Tos {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            Some(match driver.produce::<u8>()? {
                0 => Tos::Unset,
                1 => Tos::Inherit,
                raw => Tos::Value(DsField::new(raw)),
            })
        }
    }

    impl TypeGenerator for Ageing {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            Some(match driver.produce::<u8>()? % 3 {
                0 => Ageing::Unset,
                1 => Ageing::NoExpiry,
                _ => Ageing::timer(driver.produce()?),
            })
        }
    }

    /// Generates records in the form the option parser itself produces: no unspecified local
    /// address, no zero timers.
    impl TypeGenerator for NvgreConfig {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            Some(NvgreConfig {
                vni: driver.produce()?,
                group: driver.produce()?,
                local: driver
                    .produce::<Option<UnicastIpv4Addr>>()?
                    .filter(|l| !l.inner().is_unspecified()),
                link: driver.produce()?,
                ttl: driver.produce()?,
                tos: driver.produce()?,
                learning: driver.produce()?,
                proxy: driver.produce()?,
                rsc: driver.produce()?,
                l2miss: driver.produce()?,
                l3miss: driver.produce()?,
                ageing: driver.produce()?,
                max_address: driver.produce()?,
            })
        }
    }
}
