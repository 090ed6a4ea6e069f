// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![forbid(unsafe_code)] // Validation logic should always be strictly safe
#![deny(missing_docs, clippy::all, clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Strictly validated value types for configuring tunnel network devices

pub mod interface;
pub mod ipv4;
pub mod num;
pub mod vni;

pub use num::{parse_u32_auto, parse_u32_radix};
