// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Option parser and attribute printer for NVGRE tunnel devices.
//!
//! [`parse_opt`] turns `ip link add NAME type nvgre ...` tokens into an [`NvgreConfig`], which
//! [`NvgreConfig::encode`] writes as netlink attributes. [`print_opt`] goes the other way, from
//! the attributes of an existing device back to tokens. Both are also reachable by link type
//! name through [`link_util`].

#![deny(clippy::all, clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![allow(clippy::module_name_repetitions)]

pub mod attr;
pub mod config;
mod errors;
pub mod nla;
pub mod parse;
pub mod print;
pub mod registry;
pub mod resolve;

use tracectl::{LevelFilter, trace_target};
trace_target!("nvgre", LevelFilter::INFO);

// re-exports
pub use attr::NvgreAttr;
pub use config::{Ageing, NvgreConfig, NvgreConfigBuilder, Tos};
pub use errors::ParseError;
pub use parse::{Parsed, USAGE, parse_opt};
pub use print::{PrintedOpts, print_opt};
pub use registry::{LinkOpts, LinkUtil, link_util};
pub use resolve::{InterfaceResolver, StaticResolver, SystemResolver};
