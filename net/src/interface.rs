// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Identifiers for the underlay network device a tunnel is bound to

use std::fmt::{Debug, Display, Formatter};
use std::num::NonZero;

#[allow(unused_imports)] // re-export
#[cfg(any(test, feature = "bolero"))]
pub use contract::*;

/// A network interface id (also known as ifindex in linux).
///
/// Index zero means "no device" on the wire, so it is not representable here.
#[repr(transparent)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InterfaceIndex(NonZero<u32>);

impl Debug for InterfaceIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <_ as Debug>::fmt(&self.0, f)
    }
}

impl Display for InterfaceIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <_ as Display>::fmt(&self.0, f)
    }
}

/// Errors converting a raw `u32` into an [`InterfaceIndex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InterfaceIndexError {
    /// The provided value was zero.
    #[error("interface index must not be zero")]
    Zero,
}

impl InterfaceIndex {
    /// Treat the provided `NonZero<u32>` as an [`InterfaceIndex`].
    #[must_use]
    pub fn new(raw: NonZero<u32>) -> InterfaceIndex {
        InterfaceIndex(raw)
    }

    /// Treat the provided `u32` as an [`InterfaceIndex`].
    ///
    /// # Errors
    ///
    /// Returns an error if the provided value is zero.
    pub fn try_new(raw: u32) -> Result<Self, InterfaceIndexError> {
        raw.try_into()
    }

    /// Treat this [`InterfaceIndex`] as a `u32`.
    #[must_use]
    pub fn to_u32(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for InterfaceIndex {
    type Error = InterfaceIndexError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        NonZero::new(value)
            .map(InterfaceIndex::new)
            .ok_or(InterfaceIndexError::Zero)
    }
}

impl From<InterfaceIndex> for u32 {
    fn from(value: InterfaceIndex) -> Self {
        value.to_u32()
    }
}

/// A string which has been checked to be a legal linux network interface name.
///
/// The rules are the kernel's: 1 to 15 bytes (16 with the terminating NUL), not `.` or `..`,
/// and no `/`, `:` or whitespace. Any other byte is allowed, so `wg+0` and `br@lan` are legal.
#[repr(transparent)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct InterfaceName(String);

impl InterfaceName {
    /// Longest legal name, in bytes, excluding the NUL terminator
    pub const MAX_LEN: usize = 15;
}

impl Display for InterfaceName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reasons a string is refused as an [`InterfaceName`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum IllegalInterfaceName {
    /// Zero-length name
    #[error("interface name must be at least one character")]
    Empty,
    /// `.` and `..` are path components, not names
    #[error("name must not be . or ..")]
    OnlyDots(String),
    /// Longer than [`InterfaceName::MAX_LEN`]
    #[error("interface name {0} is too long")]
    TooLong(String),
    /// Contains `/`, `:` or whitespace
    #[error("interface name {0} contains illegal characters (/, : and whitespace are not permitted)")]
    IllegalCharacters(String),
}

impl TryFrom<String> for InterfaceName {
    type Error = IllegalInterfaceName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(IllegalInterfaceName::Empty);
        }
        if value == "." || value == ".." {
            return Err(IllegalInterfaceName::OnlyDots(value));
        }
        if value
            .chars()
            .any(|c| c == '/' || c == ':' || c.is_whitespace())
        {
            return Err(IllegalInterfaceName::IllegalCharacters(value));
        }
        if value.len() > InterfaceName::MAX_LEN {
            return Err(IllegalInterfaceName::TooLong(value));
        }
        Ok(InterfaceName(value))
    }
}

impl TryFrom<&str> for InterfaceName {
    type Error = IllegalInterfaceName;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_string())
    }
}

impl From<InterfaceName> for String {
    fn from(value: InterfaceName) -> Self {
        value.0
    }
}

impl AsRef<str> for InterfaceName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use crate::interface::InterfaceIndex;
    use bolero::{Driver, TypeGenerator};
    use std::num::NonZero;

    impl TypeGenerator for InterfaceIndex {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            Some(InterfaceIndex::new(driver.produce::<NonZero<u32>>()?))
        }
    }
}
