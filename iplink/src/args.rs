// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

pub(crate) use clap::Parser;
use clap::Subcommand;
use tracectl::LoggingConfig;

#[derive(Parser, Debug)]
#[command(name = "iplink")]
#[command(version = "0.1")]
#[command(about = "Encode and decode the type specific options of ip link", long_about = None)]
pub(crate) struct CmdArgs {
    #[arg(long, value_name = "target=level,...")]
    tracing: Option<LoggingConfig>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Parse link options and dump the resulting attributes as hex
    Encode {
        /// Link type, e.g. nvgre
        kind: String,
        /// Print the parsed record as YAML instead of the attributes
        #[arg(long, default_value_t = false)]
        yaml: bool,
        /// Options as given to `ip link add NAME type KIND ...`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
    /// Render a hex dump of link attributes as options
    Decode {
        /// Link type, e.g. nvgre
        kind: String,
        /// Attribute stream, as printed by encode
        hex: String,
    },
}

impl CmdArgs {
    pub fn tracing(&self) -> LoggingConfig {
        self.tracing.clone().unwrap_or_default()
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tracectl::LevelFilter;

    #[test]
    fn encode_collects_trailing_tokens() {
        let args = CmdArgs::try_parse_from([
            "iplink", "encode", "--yaml", "nvgre", "id", "10", "ttl", "64",
        ])
        .unwrap();
        assert_eq!(
            args.command(),
            &Command::Encode {
                kind: "nvgre".to_string(),
                yaml: true,
                tokens: ["id", "10", "ttl", "64"].map(String::from).to_vec(),
            }
        );
        assert_eq!(args.tracing(), LoggingConfig::default());
    }

    #[test]
    fn help_is_a_token_after_the_kind() {
        let args = CmdArgs::try_parse_from(["iplink", "encode", "nvgre", "help"]).unwrap();
        assert!(matches!(
            args.command(),
            Command::Encode { tokens, .. } if tokens == &["help"]
        ));
    }

    #[test]
    fn tracing_configuration_is_validated() {
        let args = CmdArgs::try_parse_from([
            "iplink",
            "--tracing",
            "default=debug",
            "decode",
            "nvgre",
            "00",
        ])
        .unwrap();
        assert_eq!(args.tracing().default_level(), LevelFilter::DEBUG);
        assert!(
            CmdArgs::try_parse_from(["iplink", "--tracing", "nvgre", "decode", "nvgre", "00"])
                .is_err()
        );
    }
}
