// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! IPv4 address types

use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

/// Thin wrapper around [`Ipv4Addr`]
///
/// This wrapper scopes addresses to be unicast (or unspecified).
///
/// This wrapper is zero cost save for the need to check that the [`Ipv4Addr`] is in fact unicast.
#[non_exhaustive]
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(try_from = "Ipv4Addr", into = "Ipv4Addr")]
pub struct UnicastIpv4Addr(Ipv4Addr);

impl UnicastIpv4Addr {
    /// Map an unqualified [`Ipv4Addr`] to a [`UnicastIpv4Addr`].
    ///
    /// # Errors
    ///
    /// Returns the supplied address back in the [`Err`] case if it is a multicast address.
    pub fn new(ip: Ipv4Addr) -> Result<UnicastIpv4Addr, Ipv4Addr> {
        if ip.is_multicast() {
            Err(ip)
        } else {
            Ok(UnicastIpv4Addr(ip))
        }
    }

    /// Get the inner (wrapped) [`Ipv4Addr`]
    #[must_use]
    pub fn inner(&self) -> Ipv4Addr {
        self.0
    }
}

/// Thin wrapper around [`Ipv4Addr`] which is promised to be in `224.0.0.0/4`.
#[non_exhaustive]
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(try_from = "Ipv4Addr", into = "Ipv4Addr")]
pub struct MulticastIpv4Addr(Ipv4Addr);

impl MulticastIpv4Addr {
    /// Map an unqualified [`Ipv4Addr`] to a [`MulticastIpv4Addr`].
    ///
    /// # Errors
    ///
    /// Returns the supplied address back in the [`Err`] case if it is not a multicast address.
    pub fn new(ip: Ipv4Addr) -> Result<MulticastIpv4Addr, Ipv4Addr> {
        if ip.is_multicast() {
            Ok(MulticastIpv4Addr(ip))
        } else {
            Err(ip)
        }
    }

    /// Get the inner (wrapped) [`Ipv4Addr`]
    #[must_use]
    pub fn inner(&self) -> Ipv4Addr {
        self.0
    }
}

/// Error returned when an address is of the wrong class for the wrapper it was offered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{ip} is {class} address", ip = .0, class = describe_class(.0))]
pub struct WrongAddressClass(pub Ipv4Addr);

fn describe_class(ip: &Ipv4Addr) -> &'static str {
    if ip.is_multicast() {
        "a multicast"
    } else {
        "not a multicast"
    }
}

impl TryFrom<Ipv4Addr> for UnicastIpv4Addr {
    type Error = WrongAddressClass;

    fn try_from(ip: Ipv4Addr) -> Result<Self, Self::Error> {
        UnicastIpv4Addr::new(ip).map_err(WrongAddressClass)
    }
}

impl TryFrom<Ipv4Addr> for MulticastIpv4Addr {
    type Error = WrongAddressClass;

    fn try_from(ip: Ipv4Addr) -> Result<Self, Self::Error> {
        MulticastIpv4Addr::new(ip).map_err(WrongAddressClass)
    }
}

impl From<UnicastIpv4Addr> for Ipv4Addr {
    fn from(value: UnicastIpv4Addr) -> Self {
        value.0
    }
}

impl From<MulticastIpv4Addr> for Ipv4Addr {
    fn from(value: MulticastIpv4Addr) -> Self {
        value.0
    }
}

impl Display for UnicastIpv4Addr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <_ as Display>::fmt(&self.0, f)
    }
}

impl Display for MulticastIpv4Addr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <_ as Display>::fmt(&self.0, f)
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use crate::ipv4::addr::{MulticastIpv4Addr, UnicastIpv4Addr};
    use bolero::{Driver, TypeGenerator};
    use std::net::Ipv4Addr;

    impl TypeGenerator for UnicastIpv4Addr {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            let raw = driver.produce::<u32>()?;
            // fold the multicast block onto unicast space by clearing the top bit
            let ip = Ipv4Addr::from(if Ipv4Addr::from(raw).is_multicast() {
                raw & 0x7fff_ffff
            } else {
                raw
            });
            Some(UnicastIpv4Addr(ip))
        }
    }

    impl TypeGenerator for MulticastIpv4Addr {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            let raw = driver.produce::<u32>()?;
            Some(MulticastIpv4Addr(Ipv4Addr::from(
                (raw & 0x0fff_ffff) | 0xe000_0000,
            )))
        }
    }
}

#[cfg(test)]
mod test {
    use crate::ipv4::addr::{MulticastIpv4Addr, UnicastIpv4Addr, WrongAddressClass};
    use std::net::Ipv4Addr;

    #[test]
    fn generated_unicast_ipv4_address_is_unicast() {
        bolero::check!()
            .with_type()
            .for_each(|unicast: &UnicastIpv4Addr| assert!(!unicast.0.is_multicast()));
    }

    #[test]
    fn generated_multicast_ipv4_address_is_multicast() {
        bolero::check!()
            .with_type()
            .for_each(|group: &MulticastIpv4Addr| assert!(group.0.is_multicast()));
    }

    #[test]
    fn classes_are_disjoint() {
        let group = Ipv4Addr::new(224, 1, 1, 1);
        let host = Ipv4Addr::new(10, 0, 0, 1);
        assert_eq!(UnicastIpv4Addr::new(group), Err(group));
        assert_eq!(MulticastIpv4Addr::new(host), Err(host));
        assert_eq!(UnicastIpv4Addr::new(host).unwrap().inner(), host);
        assert_eq!(MulticastIpv4Addr::new(group).unwrap().inner(), group);
    }

    #[test]
    fn wrong_class_error_names_the_address() {
        let err = MulticastIpv4Addr::try_from(Ipv4Addr::new(10, 0, 0, 1)).unwrap_err();
        assert_eq!(err, WrongAddressClass(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(err.to_string(), "10.0.0.1 is not a multicast address");
        let err = UnicastIpv4Addr::try_from(Ipv4Addr::new(239, 0, 0, 1)).unwrap_err();
        assert_eq!(err.to_string(), "239.0.0.1 is a multicast address");
    }
}
