// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Logging setup shared by the link tools.
//!
//! Crates declare their log targets with [`trace_target!`]; the binary turns a
//! `target=level,...` string into a [`LoggingConfig`] and hands it to [`init_logging`].

pub mod control;
pub mod targets;

// re-exports
pub use control::{LoggingConfig, LoggingError, init_logging};
pub use tracing_subscriber::filter::LevelFilter;
