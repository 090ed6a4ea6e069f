// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Link-time registry of log targets across all linked crates

use crate::LevelFilter;
use linkme::distributed_slice;

/// A log target announced by some module, with the level it logs at unless configured otherwise
#[derive(Debug)]
pub struct LogTarget {
    pub(crate) target: &'static str,
    pub(crate) name: &'static str,
    pub(crate) level: LevelFilter,
}

impl LogTarget {
    #[must_use]
    pub const fn new(target: &'static str, name: &'static str, level: LevelFilter) -> Self {
        Self {
            target,
            name,
            level,
        }
    }

    /// The `tracing` target (module path)
    #[must_use]
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// The short name used in configuration strings
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

#[distributed_slice]
pub static LOG_TARGETS: [LogTarget];

/// Find a registered target by its short name.
#[must_use]
pub fn find_target(name: &str) -> Option<&'static LogTarget> {
    LOG_TARGETS.iter().find(|t| t.name() == name)
}

#[macro_export]
/// Declare the calling module as a log target with a short name and a default level.
macro_rules! trace_target {
    // NOTE: the const scope keeps LOG_TGT distinct per invocation. Callers need linkme as a
    // direct dependency.
    ($name:expr, $level:expr) => {
        const _: () = {
            use $crate::targets::{LOG_TARGETS, LogTarget};

            #[linkme::distributed_slice(LOG_TARGETS)]
            static LOG_TGT: LogTarget = LogTarget::new(module_path!(), $name, $level);
        };
    };
}
