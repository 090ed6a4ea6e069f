// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Turning `ip link add ... type nvgre` option tokens into an [`NvgreConfig`].
//!
//! Keywords are matched by prefix against an ordered table, so `gr` means `group` and the
//! first entry wins when a prefix is ambiguous (`l` is `local`, never `learning`). Values are
//! validated as soon as they are read and the first bad token aborts the whole scan.

use std::net::Ipv4Addr;
use std::str::FromStr;

use net::interface::InterfaceName;
use net::ipv4::{DsField, MulticastIpv4Addr, UnicastIpv4Addr};
use net::num::parse_u32_auto;
use net::vni::Vni;
use tracing::debug;

use crate::config::{Ageing, NvgreConfig, Tos};
use crate::errors::ParseError;
use crate::resolve::InterfaceResolver;

/// Printed on `help` and after an unknown keyword.
pub const USAGE: &str = "\
Usage: ... nvgre id VNI [ group ADDR ] [ local ADDR ]
                 [ ttl TTL ] [ tos TOS ] [ dev PHYS_DEV ]
                 [ ageing SECONDS ] [ maxaddress MAXADDR ]
                 [ [no]learning ] [ [no]proxy ] [ [no]rsc ]
                 [ [no]l2miss ] [ [no]l3miss ]

Where: VNI := 0-16777215
       ADDR := { IP_ADDRESS | any }
       TOS  := { NUMBER | inherit }
       TTL  := { 1..255 | inherit }
       SECONDS := { NUMBER | none }
       MAXADDR := { NUMBER | unlimited }
";

/// Outcome of a successful scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Config(NvgreConfig),
    /// `help` was asked for; nothing is to be created.
    Help,
}

struct Scan<'r> {
    config: NvgreConfig,
    vni: Option<Vni>,
    resolver: &'r dyn InterfaceResolver,
}

type ValueHandler = fn(&mut Scan<'_>, &str) -> Result<(), ParseError>;

enum Action {
    /// Consumes the following token.
    Value(ValueHandler),
    Toggle(fn(&mut NvgreConfig)),
    Help,
}

struct Keyword {
    name: &'static str,
    action: Action,
}

const fn value(name: &'static str, handler: ValueHandler) -> Keyword {
    Keyword {
        name,
        action: Action::Value(handler),
    }
}

const fn toggle(name: &'static str, apply: fn(&mut NvgreConfig)) -> Keyword {
    Keyword {
        name,
        action: Action::Toggle(apply),
    }
}

/// Lookup order is significant: earlier entries win ambiguous prefixes.
static KEYWORDS: &[Keyword] = &[
    value("id", scan_id),
    value("vni", scan_id),
    value("group", scan_group),
    value("local", scan_local),
    value("dev", scan_dev),
    value("ttl", scan_ttl),
    value("hoplimit", scan_ttl),
    value("tos", scan_tos),
    value("dsfield", scan_tos),
    value("ageing", scan_ageing),
    value("maxaddress", scan_max_address),
    toggle("nolearning", |c| c.learning = false),
    toggle("learning", |c| c.learning = true),
    toggle("noproxy", |c| c.proxy = false),
    toggle("proxy", |c| c.proxy = true),
    toggle("norsc", |c| c.rsc = false),
    toggle("rsc", |c| c.rsc = true),
    toggle("nol2miss", |c| c.l2miss = false),
    toggle("l2miss", |c| c.l2miss = true),
    toggle("nol3miss", |c| c.l3miss = false),
    toggle("l3miss", |c| c.l3miss = true),
    Keyword {
        name: "help",
        action: Action::Help,
    },
];

/// The first keyword `token` is a non-empty prefix of.
fn lookup(token: &str) -> Option<&'static Keyword> {
    if token.is_empty() {
        return None;
    }
    KEYWORDS.iter().find(|keyword| keyword.name.starts_with(token))
}

fn scan_id(scan: &mut Scan<'_>, value: &str) -> Result<(), ParseError> {
    let vni = Vni::from_str(value).map_err(|_| ParseError::invalid(value, "invalid id"))?;
    scan.vni = Some(vni);
    Ok(())
}

fn scan_group(scan: &mut Scan<'_>, value: &str) -> Result<(), ParseError> {
    let group = Ipv4Addr::from_str(value)
        .ok()
        .and_then(|ip| MulticastIpv4Addr::new(ip).ok())
        .ok_or_else(|| ParseError::invalid(value, "invalid group address"))?;
    scan.config.group = Some(group);
    Ok(())
}

fn scan_local(scan: &mut Scan<'_>, value: &str) -> Result<(), ParseError> {
    if value == "any" {
        scan.config.local = None;
        return Ok(());
    }
    let local = Ipv4Addr::from_str(value)
        .ok()
        .and_then(|ip| UnicastIpv4Addr::new(ip).ok())
        .ok_or_else(|| ParseError::invalid(value, "invalid local address"))?;
    scan.config.local = Some(local).filter(|l| !l.inner().is_unspecified());
    Ok(())
}

fn scan_dev(scan: &mut Scan<'_>, value: &str) -> Result<(), ParseError> {
    let index = InterfaceName::try_from(value)
        .ok()
        .and_then(|name| scan.resolver.index_of(&name))
        .ok_or_else(|| ParseError::DeviceResolution(value.to_string()))?;
    scan.config.link = Some(index);
    Ok(())
}

fn scan_ttl(scan: &mut Scan<'_>, value: &str) -> Result<(), ParseError> {
    if value == "inherit" {
        scan.config.ttl = 0;
        return Ok(());
    }
    let raw = parse_u32_auto(value).ok_or_else(|| ParseError::invalid(value, "invalid TTL"))?;
    scan.config.ttl =
        u8::try_from(raw).map_err(|_| ParseError::invalid(value, "TTL must be <= 255"))?;
    Ok(())
}

fn scan_tos(scan: &mut Scan<'_>, value: &str) -> Result<(), ParseError> {
    if value == "inherit" {
        scan.config.tos = Tos::Inherit;
        return Ok(());
    }
    let field = DsField::from_str(value).map_err(|_| ParseError::invalid(value, "bad TOS value"))?;
    scan.config.tos = Tos::try_from(field)
        .map_err(|_| ParseError::invalid(value, "TOS 0x1 is reserved for inherit"))?;
    Ok(())
}

fn scan_ageing(scan: &mut Scan<'_>, value: &str) -> Result<(), ParseError> {
    scan.config.ageing = if value == "none" {
        Ageing::NoExpiry
    } else {
        parse_u32_auto(value)
            .map(Ageing::timer)
            .ok_or_else(|| ParseError::invalid(value, "ageing timer"))?
    };
    Ok(())
}

fn scan_max_address(scan: &mut Scan<'_>, value: &str) -> Result<(), ParseError> {
    scan.config.max_address = if value == "unlimited" {
        0
    } else {
        parse_u32_auto(value).ok_or_else(|| ParseError::invalid(value, "max addresses"))?
    };
    Ok(())
}

/// Scan `tokens` into a validated configuration.
///
/// Later tokens overwrite earlier ones for the same field. The virtual network id is checked
/// for only once every token has been consumed.
///
/// # Errors
///
/// Returns the first [`ParseError`] met. [`ParseError::DeviceResolution`] is fatal, see
/// [`ParseError::is_fatal`].
pub fn parse_opt<S: AsRef<str>>(
    tokens: &[S],
    resolver: &dyn InterfaceResolver,
) -> Result<Parsed, ParseError> {
    let mut scan = Scan {
        config: NvgreConfig::new(Vni::default()),
        vni: None,
        resolver,
    };
    let mut tokens = tokens.iter().map(|token| token.as_ref());
    while let Some(token) = tokens.next() {
        let Some(keyword) = lookup(token) else {
            return Err(ParseError::UnrecognizedKeyword(token.to_string()));
        };
        match keyword.action {
            Action::Value(handle) => {
                let value = tokens
                    .next()
                    .ok_or(ParseError::MissingArgument(keyword.name))?;
                handle(&mut scan, value)?;
                debug!("accepted {} {value}", keyword.name);
            }
            Action::Toggle(apply) => {
                apply(&mut scan.config);
                debug!("accepted {}", keyword.name);
            }
            Action::Help => return Ok(Parsed::Help),
        }
    }
    let vni = scan.vni.ok_or(ParseError::MissingRequiredField("vni"))?;
    Ok(Parsed::Config(NvgreConfig { vni, ..scan.config }))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::resolve::StaticResolver;
    use net::interface::InterfaceIndex;
    use pretty_assertions::assert_eq;

    fn resolver() -> StaticResolver {
        StaticResolver::new().with(
            InterfaceName::try_from("eth0").unwrap(),
            InterfaceIndex::try_new(2).unwrap(),
        )
    }

    fn parse(tokens: &[&str]) -> Result<Parsed, ParseError> {
        parse_opt(tokens, &resolver())
    }

    fn config(tokens: &[&str]) -> NvgreConfig {
        match parse(tokens) {
            Ok(Parsed::Config(config)) => config,
            other => panic!("{tokens:?} did not parse to a config: {other:?}"),
        }
    }

    fn reason(tokens: &[&str]) -> &'static str {
        match parse(tokens) {
            Err(ParseError::InvalidValue { reason, .. }) => reason,
            other => panic!("{tokens:?} was not an invalid value: {other:?}"),
        }
    }

    #[test]
    fn minimal() {
        let config = config(&["id", "42"]);
        assert_eq!(config, NvgreConfig::new(Vni::new_checked(42).unwrap()));
    }

    #[test]
    fn vni_range() {
        assert_eq!(config(&["id", "0"]).vni.as_u32(), 0);
        assert_eq!(config(&["vni", "16777215"]).vni.as_u32(), Vni::MAX);
        assert_eq!(config(&["id", "0x10"]).vni.as_u32(), 16);
        assert_eq!(reason(&["id", "16777216"]), "invalid id");
        assert_eq!(reason(&["id", "ten"]), "invalid id");
        assert_eq!(reason(&["id", "-1"]), "invalid id");
    }

    #[test]
    fn any_legal_vni_parses() {
        bolero::check!().with_type().cloned().for_each(|vni: Vni| {
            let token = vni.to_string();
            assert_eq!(config(&["id", token.as_str()]).vni, vni);
        });
    }

    #[test]
    fn vni_is_required() {
        assert_eq!(
            parse(&["ttl", "3"]),
            Err(ParseError::MissingRequiredField("vni"))
        );
        assert_eq!(parse(&[]), Err(ParseError::MissingRequiredField("vni")));
        // a bad token is reported before the missing id
        assert_eq!(reason(&["ttl", "300"]), "TTL must be <= 255");
    }

    #[test]
    fn group_must_be_multicast() {
        let config = config(&["id", "1", "group", "224.1.1.1"]);
        assert_eq!(
            config.group.map(|g| g.inner()),
            Some(Ipv4Addr::new(224, 1, 1, 1))
        );
        assert_eq!(reason(&["id", "1", "group", "10.0.0.1"]), "invalid group address");
        assert_eq!(reason(&["id", "1", "group", "any"]), "invalid group address");
    }

    #[test]
    fn local_must_not_be_multicast() {
        let config = config(&["id", "1", "local", "192.0.2.7"]);
        assert_eq!(
            config.local.map(|l| l.inner()),
            Some(Ipv4Addr::new(192, 0, 2, 7))
        );
        assert_eq!(reason(&["id", "1", "local", "224.1.1.1"]), "invalid local address");
        assert_eq!(config_local(&["local", "any"]), None);
        assert_eq!(config_local(&["local", "0.0.0.0"]), None);
        assert_eq!(config_local(&["local", "10.0.0.1", "local", "any"]), None);
    }

    fn config_local(tail: &[&str]) -> Option<UnicastIpv4Addr> {
        let mut tokens = vec!["id", "1"];
        tokens.extend_from_slice(tail);
        config(&tokens).local
    }

    #[test]
    fn dev_is_resolved() {
        assert_eq!(
            config(&["id", "1", "dev", "eth0"]).link,
            InterfaceIndex::try_new(2).ok()
        );
        let err = parse(&["id", "1", "dev", "eth9"]).unwrap_err();
        assert_eq!(err, ParseError::DeviceResolution("eth9".into()));
        assert!(err.is_fatal());
        // not even a legal name
        assert_eq!(
            parse(&["id", "1", "dev", "a/b"]),
            Err(ParseError::DeviceResolution("a/b".into()))
        );
    }

    #[test]
    fn dev_accepts_punctuated_names() {
        let resolver = StaticResolver::new()
            .with(
                InterfaceName::try_from("wg+0").unwrap(),
                InterfaceIndex::try_new(5).unwrap(),
            )
            .with(
                InterfaceName::try_from("br@lan").unwrap(),
                InterfaceIndex::try_new(6).unwrap(),
            );
        let link = |dev: &str| match parse_opt(&["id", "1", "dev", dev], &resolver) {
            Ok(Parsed::Config(config)) => config.link.map(InterfaceIndex::to_u32),
            other => panic!("{dev}: {other:?}"),
        };
        assert_eq!(link("wg+0"), Some(5));
        assert_eq!(link("br@lan"), Some(6));
        assert_eq!(
            parse_opt(&["id", "1", "dev", "eth#1"], &resolver),
            Err(ParseError::DeviceResolution("eth#1".into()))
        );
    }

    #[test]
    fn ttl() {
        assert_eq!(config(&["id", "1", "ttl", "64"]).ttl, 64);
        assert_eq!(config(&["id", "1", "hoplimit", "255"]).ttl, 255);
        assert_eq!(config(&["id", "1", "ttl", "64", "ttl", "inherit"]).ttl, 0);
        assert_eq!(reason(&["id", "1", "ttl", "256"]), "TTL must be <= 255");
        assert_eq!(reason(&["id", "1", "ttl", "many"]), "invalid TTL");
    }

    #[test]
    fn tos() {
        assert_eq!(config(&["id", "1", "tos", "inherit"]).tos, Tos::Inherit);
        assert_eq!(
            config(&["id", "1", "tos", "0x10"]).tos,
            Tos::Value(DsField::new(0x10))
        );
        assert_eq!(
            config(&["id", "1", "dsfield", "lowdelay"]).tos,
            Tos::Value(DsField::new(0x10))
        );
        assert_eq!(config(&["id", "1", "tos", "0"]).tos, Tos::Unset);
        assert_eq!(reason(&["id", "1", "tos", "0x1"]), "TOS 0x1 is reserved for inherit");
        assert_eq!(reason(&["id", "1", "tos", "0x100"]), "bad TOS value");
        assert_eq!(reason(&["id", "1", "tos", "loud"]), "bad TOS value");
    }

    #[test]
    fn ageing_and_limit() {
        assert_eq!(config(&["id", "1", "ageing", "none"]).ageing, Ageing::NoExpiry);
        assert_eq!(config(&["id", "1", "ageing", "300"]).ageing, Ageing::Timer(300));
        assert_eq!(config(&["id", "1", "ageing", "0"]).ageing, Ageing::Unset);
        assert_eq!(config(&["id", "1"]).ageing, Ageing::Unset);
        assert_eq!(reason(&["id", "1", "ageing", "forever"]), "ageing timer");
        assert_eq!(config(&["id", "1", "maxaddress", "100"]).max_address, 100);
        assert_eq!(
            config(&["id", "1", "maxaddress", "100", "maxaddress", "unlimited"]).max_address,
            0
        );
        assert_eq!(reason(&["id", "1", "maxaddress", "lots"]), "max addresses");
    }

    #[test]
    fn toggles_last_one_wins() {
        let config = config(&[
            "id", "1", "nolearning", "proxy", "rsc", "l2miss", "l3miss", "norsc",
        ]);
        assert!(!config.learning);
        assert!(config.proxy);
        assert!(!config.rsc);
        assert!(config.l2miss);
        assert!(config.l3miss);
        assert!(config_learning(&["nolearning", "learning"]));
        assert!(!config_learning(&["learning", "nolearning"]));
    }

    fn config_learning(tail: &[&str]) -> bool {
        let mut tokens = vec!["id", "1"];
        tokens.extend_from_slice(tail);
        config(&tokens).learning
    }

    #[test]
    fn keywords_match_by_prefix_in_table_order() {
        assert_eq!(lookup("i").map(|k| k.name), Some("id"));
        assert_eq!(lookup("v").map(|k| k.name), Some("vni"));
        assert_eq!(lookup("l").map(|k| k.name), Some("local"));
        assert_eq!(lookup("le").map(|k| k.name), Some("learning"));
        assert_eq!(lookup("nol").map(|k| k.name), Some("nolearning"));
        assert_eq!(lookup("nol2").map(|k| k.name), Some("nol2miss"));
        assert_eq!(lookup("h").map(|k| k.name), Some("hoplimit"));
        assert_eq!(lookup("he").map(|k| k.name), Some("help"));
        assert_eq!(lookup("d").map(|k| k.name), Some("dev"));
        assert_eq!(lookup("ds").map(|k| k.name), Some("dsfield"));
        assert_eq!(lookup("groupies").map(|k| k.name), None);
        assert_eq!(lookup("").map(|k| k.name), None);

        let config = config(&["i", "7", "g", "239.0.0.1", "t", "9", "nol", "pr"]);
        assert_eq!(config.vni.as_u32(), 7);
        assert!(config.group.is_some());
        assert_eq!(config.ttl, 9);
        assert!(!config.learning);
        assert!(config.proxy);
    }

    #[test]
    fn every_keyword_is_reachable_by_its_full_name() {
        for keyword in KEYWORDS {
            assert_eq!(lookup(keyword.name).map(|k| k.name), Some(keyword.name));
        }
    }

    #[test]
    fn value_keywords_need_an_argument() {
        assert_eq!(
            parse(&["id", "1", "group"]),
            Err(ParseError::MissingArgument("group"))
        );
        assert_eq!(parse(&["vni"]), Err(ParseError::MissingArgument("vni")));
        assert_eq!(
            parse(&["id", "1", "ma"]),
            Err(ParseError::MissingArgument("maxaddress"))
        );
    }

    #[test]
    fn unknown_keyword() {
        let err = parse(&["id", "1", "bogus"]).unwrap_err();
        assert_eq!(err, ParseError::UnrecognizedKeyword("bogus".into()));
        assert!(err.wants_usage());
        assert_eq!(
            parse(&["id", "1", ""]),
            Err(ParseError::UnrecognizedKeyword(String::new()))
        );
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse(&["help"]), Ok(Parsed::Help));
        assert_eq!(parse(&["id", "1", "help", "bogus"]), Ok(Parsed::Help));
        assert!(parse(&["bogus", "help"]).is_err());
    }

    #[test]
    fn usage_mentions_every_value_keyword() {
        for keyword in ["id", "group", "local", "ttl", "tos", "dev", "ageing", "maxaddress"] {
            assert!(USAGE.contains(keyword), "{keyword} missing from usage");
        }
    }

    #[test]
    fn usage_placeholders_are_not_self_referential() {
        let definitions: Vec<(&str, &str)> = USAGE
            .lines()
            .filter_map(|line| line.split_once(":="))
            .map(|(name, body)| (name.trim_start_matches("Where:").trim(), body))
            .collect();
        let names: Vec<&str> = definitions.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["VNI", "ADDR", "TOS", "TTL", "SECONDS", "MAXADDR"]);
        for (name, body) in definitions {
            let mut words = body.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'));
            assert!(!words.any(|word| word == name), "{name} := {body}");
        }
        assert!(USAGE.contains("maxaddress MAXADDR"));
    }

    #[test]
    fn never_panics_on_arbitrary_tokens() {
        bolero::check!()
            .with_type()
            .for_each(|tokens: &Vec<String>| {
                let _ = parse_opt(tokens, &resolver());
            });
    }
}
