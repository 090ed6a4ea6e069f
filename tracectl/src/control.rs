// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Turning a `name=level` configuration string into an installed subscriber.

use ordermap::OrderMap;
use std::str::FromStr;
use tracing::debug;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*};

use crate::targets::{LOG_TARGETS, find_target};

/// Errors from parsing a logging configuration or installing the subscriber
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid syntax '{0}': it should be name=level")]
    Syntax(String),
    #[error("invalid level {level} for {name}")]
    Level { name: String, level: String },
    #[error("a global subscriber is already installed")]
    AlreadyInitialized,
}

/// Log levels per target, plus the level for everything not mentioned.
///
/// `default` sets the fallback level and `all` sets every registered target. Other keys are
/// looked up by registered short name first and used verbatim as a `tracing` target otherwise.
///
/// A target's level is, from highest precedence: its own key, `all`, an explicit `default`,
/// the level it was registered with. Unregistered targets fall back to `default`, which is
/// `warn` unless given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    default: Option<LevelFilter>,
    all: Option<LevelFilter>,
    overrides: OrderMap<String, LevelFilter>,
}

impl LoggingConfig {
    /// Level of targets nobody registered or configured
    pub const FALLBACK: LevelFilter = LevelFilter::WARN;

    #[must_use]
    pub fn default_level(&self) -> LevelFilter {
        self.default.unwrap_or(Self::FALLBACK)
    }

    /// The configured level for a short name or target, if any.
    #[must_use]
    pub fn level_of(&self, name: &str) -> Option<LevelFilter> {
        self.overrides.get(name).copied()
    }

    /// Filter directives in application order: registered defaults, `all`, then overrides.
    #[must_use]
    pub fn directives(&self) -> Vec<String> {
        let mut out: OrderMap<&str, LevelFilter> = OrderMap::new();
        for target in LOG_TARGETS {
            let level = self.all.or(self.default).unwrap_or(target.level());
            out.insert(target.target(), level);
        }
        for (name, level) in &self.overrides {
            let target = find_target(name).map_or(name.as_str(), |t| t.target());
            out.insert(target, *level);
        }
        out.iter()
            .map(|(target, level)| format!("{target}={}", level.to_string().to_lowercase()))
            .collect()
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::new(self.default_level().to_string());
        for directive in self.directives() {
            match directive.parse() {
                Ok(directive) => filter = filter.add_directive(directive),
                Err(e) => eprintln!("ignoring log directive {directive}: {e}"),
            }
        }
        filter
    }
}

impl FromStr for LoggingConfig {
    type Err = LoggingError;

    /// Parse comma separated `name=level` items, where level is off, error, warn, info, debug or
    /// trace.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut config = LoggingConfig::default();
        for item in input.split(',').map(str::trim).filter(|i| !i.is_empty()) {
            let Some((name, level)) = item.split_once('=') else {
                return Err(LoggingError::Syntax(item.to_string()));
            };
            let (name, level) = (name.trim(), level.trim());
            let parsed = LevelFilter::from_str(level).map_err(|_| LoggingError::Level {
                name: name.to_string(),
                level: level.to_string(),
            })?;
            match name {
                "default" => config.default = Some(parsed),
                "all" => config.all = Some(parsed),
                _ => {
                    config.overrides.insert(name.to_string(), parsed);
                }
            }
        }
        Ok(config)
    }
}

/// Install the global subscriber: an [`EnvFilter`] built from `config` and a fmt layer on stderr.
///
/// # Errors
///
/// Fails if a global subscriber was installed before.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;
    debug!("logging initialized: {}", config.directives().join(","));
    Ok(())
}
