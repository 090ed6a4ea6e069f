// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Ipv4 address classes and type-of-service octets

pub mod addr;
pub mod dsfield;

pub use addr::{MulticastIpv4Addr, UnicastIpv4Addr, WrongAddressClass};
pub use dsfield::{DsField, InvalidDsField};
