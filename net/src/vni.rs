// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Virtual network identifiers

use core::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

#[allow(unused_imports)] // re-export
#[cfg(any(test, feature = "bolero"))]
pub use contract::*;

/// An [NVGRE][RFC7637] Virtual Subnet Identifier.
///
/// A `Vni` is a 24-bit value that identifies a virtual layer-2 segment carried inside a GRE
/// tunnel.
///
/// According to <cite>[RFC7637]</cite>:
///
/// > Virtual Subnet ID (VSID): This is a 24-bit value that is used to identify the NVGRE-based
/// > Virtual Layer 2 Network.
///
/// # Legal values
///
/// Every value in <var>0 ..= 2<sup>24</sup> - 1</var> is legal.
/// Unlike VXLAN stacks, the link configuration path does not reserve zero, so `id 0` is accepted.
///
/// It is deliberately not possible to create a `Vni` from a `u32` directly, as that would
/// allow the creation of illegal `Vni` values.
/// Use [`Vni::new_checked`] instead.
///
/// [RFC7637]: https://datatracker.ietf.org/doc/html/rfc7637#section-3.2
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(try_from = "u32", into = "u32")]
#[repr(transparent)]
pub struct Vni(u32);

impl Display for Vni {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Vni {
    /// The minimum legal [`Vni`] value (0).
    pub const MIN: u32 = 0;
    /// The maximum legal [`Vni`] value (2<sup>24</sup> - 1).
    pub const MAX: u32 = 0x00_FF_FF_FF;
    /// First value which is too large to be a legal [`Vni`]
    #[allow(unused)] // used in test suite
    const TOO_LARGE: u32 = Vni::MAX + 1;

    /// Create a new [`Vni`] from a `u32`.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidVni`] error if the value is greater than [`Vni::MAX`].
    pub fn new_checked(vni: u32) -> Result<Vni, InvalidVni> {
        if vni > Vni::MAX {
            Err(InvalidVni::TooLarge(vni))
        } else {
            Ok(Vni(vni))
        }
    }

    /// Get the value of the [`Vni`] as a `u32`.
    #[must_use]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Errors that can occur when converting a `u32` (or a string) to a [`Vni`]
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum InvalidVni {
    /// This error type contains the (illegal) value used to attempt creation of a [`Vni`].
    /// The max legal value is found in [`Vni::MAX`].
    #[error("The value {0} is too large to be a Vni (max is {MAX})", MAX = Vni::MAX)]
    TooLarge(u32),
    /// The string was not an unsigned integer.
    #[error("'{0}' is not a number")]
    NotANumber(String),
}

impl From<Vni> for u32 {
    fn from(vni: Vni) -> u32 {
        vni.as_u32()
    }
}

impl TryFrom<u32> for Vni {
    type Error = InvalidVni;

    fn try_from(vni: u32) -> Result<Vni, Self::Error> {
        Vni::new_checked(vni)
    }
}

impl FromStr for Vni {
    type Err = InvalidVni;

    /// Accepts decimal, `0x`-prefixed hex and `0`-prefixed octal, like `strtoul` with base 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = crate::parse_u32_auto(s).ok_or_else(|| InvalidVni::NotANumber(s.to_owned()))?;
        Vni::new_checked(raw)
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use crate::vni::Vni;
    use bolero::{Driver, TypeGenerator};

    impl TypeGenerator for Vni {
        fn generate<D: Driver>(u: &mut D) -> Option<Self> {
            let raw: u32 = u.produce::<u32>()? & Vni::MAX;
            Some(Vni::new_checked(raw).unwrap_or_else(|e| unreachable!("{e:?}")))
        }
    }
}
