// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The IPv4 type-of-service / [DS field] octet, as configured on tunnel devices.
//!
//! [DS field]: https://datatracker.ietf.org/doc/html/rfc2474#section-3

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::num::parse_u32_radix;

/// A full ToS / DS octet (DSCP and ECN bits together).
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(from = "u8", into = "u8")]
pub struct DsField(u8);

/// Errors produced when parsing a [`DsField`] from its textual form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidDsField {
    /// Neither a known name nor a hex number
    #[error("'{0}' is not a dsfield name or hex value")]
    Unknown(String),
    /// Hex number wider than one octet
    #[error("dsfield value {0:#x} does not fit in one byte")]
    TooBig(u32),
}

/// Symbolic dsfield names understood by the link tools.
const DSFIELD_NAMES: &[(&str, u8)] = &[
    ("default", 0x00),
    ("lowdelay", 0x10),
    ("throughput", 0x08),
    ("reliability", 0x04),
    ("mincost", 0x02),
    ("priority", 0x20),
    ("immediate", 0x40),
    ("flash", 0x60),
    ("flash-override", 0x80),
    ("critical", 0xa0),
    ("internet", 0xc0),
    ("network", 0xe0),
    ("AF11", 0x28),
    ("AF12", 0x30),
    ("AF13", 0x38),
    ("AF21", 0x48),
    ("AF22", 0x50),
    ("AF23", 0x58),
    ("AF31", 0x68),
    ("AF32", 0x70),
    ("AF33", 0x78),
    ("AF41", 0x88),
    ("AF42", 0x90),
    ("AF43", 0x98),
    ("CS0", 0x00),
    ("CS1", 0x20),
    ("CS2", 0x40),
    ("CS3", 0x60),
    ("CS4", 0x80),
    ("CS5", 0xa0),
    ("CS6", 0xc0),
    ("CS7", 0xe0),
    ("EF", 0xb8),
];

impl DsField {
    /// Wrap a raw octet.
    #[must_use]
    pub const fn new(raw: u8) -> DsField {
        DsField(raw)
    }

    /// The raw octet
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Look up a symbolic name (case insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<DsField> {
        DSFIELD_NAMES
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|&(_, raw)| DsField(raw))
    }
}

impl FromStr for DsField {
    type Err = InvalidDsField;

    /// Names win over numbers; numbers are always hexadecimal, with or without `0x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(known) = DsField::from_name(s) {
            return Ok(known);
        }
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let raw = parse_u32_radix(digits, 16).ok_or_else(|| InvalidDsField::Unknown(s.to_owned()))?;
        u8::try_from(raw)
            .map(DsField)
            .map_err(|_| InvalidDsField::TooBig(raw))
    }
}

impl Display for DsField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u8> for DsField {
    fn from(raw: u8) -> Self {
        DsField(raw)
    }
}

impl From<DsField> for u8 {
    fn from(value: DsField) -> Self {
        value.0
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use crate::ipv4::dsfield::DsField;
    use bolero::{Driver, TypeGenerator};

    impl TypeGenerator for DsField {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            Some(DsField(driver.produce()?))
        }
    }
}
