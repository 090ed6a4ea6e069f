// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![deny(clippy::all, clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

mod args;

use std::process::ExitCode;

use crate::args::{CmdArgs, Command, Parser};

use nvgre::{
    InterfaceResolver, LinkOpts, LinkUtil, ParseError, Parsed, PrintedOpts, SystemResolver,
    link_util, parse_opt,
};
use tracectl::{LevelFilter, init_logging, trace_target};
use tracing::debug;

trace_target!("iplink", LevelFilter::INFO);

/// `ip` exits with -1 on bad link options.
const EXIT_BAD_OPTIONS: u8 = 255;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("unknown link type \"{0}\"")]
    UnknownKind(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("bad attribute dump: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("cannot render as yaml: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    #[error("yaml output is not available for link type \"{0}\"")]
    YamlUnsupported(String),
}

/// What to show for a successful command.
#[derive(Debug, PartialEq, Eq)]
enum Output {
    Text(String),
    /// Asked for help; printed to stderr and treated as a failure, like `ip` does.
    Usage(&'static str),
}

fn find_util(kind: &str) -> Result<&'static LinkUtil, CliError> {
    link_util(kind).ok_or_else(|| CliError::UnknownKind(kind.to_string()))
}

fn encode(
    kind: &str,
    tokens: &[String],
    yaml: bool,
    resolver: &dyn InterfaceResolver,
) -> Result<Output, CliError> {
    let util = find_util(kind)?;
    let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
    if yaml {
        if util.id() != "nvgre" {
            return Err(CliError::YamlUnsupported(kind.to_string()));
        }
        return match parse_opt(&tokens, resolver)? {
            Parsed::Config(config) => Ok(Output::Text(serde_yaml_ng::to_string(&config)?)),
            Parsed::Help => Ok(Output::Usage(util.usage())),
        };
    }
    match util.parse(&tokens, resolver)? {
        LinkOpts::Encoded(buf) => Ok(Output::Text(hex::encode(buf.as_bytes()))),
        LinkOpts::Help => Ok(Output::Usage(util.usage())),
    }
}

fn decode(kind: &str, dump: &str, resolver: &dyn InterfaceResolver) -> Result<Output, CliError> {
    let util = find_util(kind)?;
    let bytes = hex::decode(dump.trim())?;
    debug!("decoding {} bytes of {kind} attributes", bytes.len());
    let printed = PrintedOpts::from(util.print(&bytes, resolver));
    Ok(Output::Text(printed.to_string()))
}

fn run(command: &Command, resolver: &dyn InterfaceResolver) -> Result<Output, CliError> {
    match command {
        Command::Encode { kind, yaml, tokens } => encode(kind, tokens, *yaml, resolver),
        Command::Decode { kind, hex } => decode(kind, hex, resolver),
    }
}

fn main() -> ExitCode {
    let args = CmdArgs::parse();
    if let Err(e) = init_logging(&args.tracing()) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::from(EXIT_BAD_OPTIONS);
    }

    match run(args.command(), &SystemResolver) {
        Ok(Output::Text(text)) => {
            println!("{}", text.trim_end());
            ExitCode::SUCCESS
        }
        Ok(Output::Usage(usage)) => {
            eprint!("{usage}");
            ExitCode::from(EXIT_BAD_OPTIONS)
        }
        Err(e) => {
            eprintln!("{e}");
            if let CliError::Parse(parse) = &e
                && parse.wants_usage()
                && let Command::Encode { kind, .. } = args.command()
                && let Some(util) = link_util(kind)
            {
                eprint!("{}", util.usage());
            }
            ExitCode::from(EXIT_BAD_OPTIONS)
        }
    }
}
