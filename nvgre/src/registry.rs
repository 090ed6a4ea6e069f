// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Link-time registry of link type codecs, keyed by the `type` keyword of `ip link add`.

use linkme::distributed_slice;
use tracing::debug;

use crate::attr::NvgreAttr;
use crate::errors::ParseError;
use crate::nla::{AttrBuffer, AttrTable};
use crate::parse::{Parsed, USAGE, parse_opt};
use crate::print::print_opt;
use crate::resolve::InterfaceResolver;

/// What a codec's option parser did with the buffer it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    Done,
    Help,
}

/// Result of [`LinkUtil::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOpts {
    /// Link info data ready to be nested into a link creation request
    Encoded(AttrBuffer),
    Help,
}

pub type ParseOptFn =
    fn(&[&str], &dyn InterfaceResolver, &mut AttrBuffer) -> Result<ParseStatus, ParseError>;
pub type PrintOptFn = fn(&AttrTable<'_>, &dyn InterfaceResolver) -> Vec<String>;

/// One link type codec.
pub struct LinkUtil {
    id: &'static str,
    maxattr: u16,
    usage: &'static str,
    parse_opt: ParseOptFn,
    print_opt: PrintOptFn,
}

impl LinkUtil {
    #[must_use]
    pub const fn new(
        id: &'static str,
        maxattr: u16,
        usage: &'static str,
        parse_opt: ParseOptFn,
        print_opt: PrintOptFn,
    ) -> Self {
        Self {
            id,
            maxattr,
            usage,
            parse_opt,
            print_opt,
        }
    }

    /// The link type keyword
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Highest attribute type the codec understands
    #[must_use]
    pub fn maxattr(&self) -> u16 {
        self.maxattr
    }

    #[must_use]
    pub fn usage(&self) -> &'static str {
        self.usage
    }

    /// Parse `tokens` into a fresh attribute buffer.
    ///
    /// # Errors
    ///
    /// Whatever the codec's parser refuses; the partially filled buffer is dropped.
    pub fn parse(
        &self,
        tokens: &[&str],
        resolver: &dyn InterfaceResolver,
    ) -> Result<LinkOpts, ParseError> {
        let mut buf = AttrBuffer::new();
        match (self.parse_opt)(tokens, resolver, &mut buf)? {
            ParseStatus::Done => {
                debug!("{}: {} bytes of link info data", self.id, buf.len());
                Ok(LinkOpts::Encoded(buf))
            }
            ParseStatus::Help => Ok(LinkOpts::Help),
        }
    }

    /// Index `bytes` as an attribute stream and render it.
    #[must_use]
    pub fn print(&self, bytes: &[u8], resolver: &dyn InterfaceResolver) -> Vec<String> {
        let table = AttrTable::parse(bytes, self.maxattr);
        (self.print_opt)(&table, resolver)
    }
}

impl std::fmt::Debug for LinkUtil {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkUtil")
            .field("id", &self.id)
            .field("maxattr", &self.maxattr)
            .finish_non_exhaustive()
    }
}

#[distributed_slice]
pub static LINK_UTILS: [LinkUtil];

/// Look up the codec for a link type.
#[must_use]
pub fn link_util(kind: &str) -> Option<&'static LinkUtil> {
    LINK_UTILS.iter().find(|util| util.id == kind)
}

fn nvgre_parse_opt(
    tokens: &[&str],
    resolver: &dyn InterfaceResolver,
    buf: &mut AttrBuffer,
) -> Result<ParseStatus, ParseError> {
    match parse_opt(tokens, resolver)? {
        Parsed::Config(config) => {
            config.encode(buf)?;
            Ok(ParseStatus::Done)
        }
        Parsed::Help => Ok(ParseStatus::Help),
    }
}

#[distributed_slice(LINK_UTILS)]
static NVGRE_LINK_UTIL: LinkUtil =
    LinkUtil::new("nvgre", NvgreAttr::MAX, USAGE, nvgre_parse_opt, print_opt);

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::NvgreConfig;
    use crate::resolve::StaticResolver;
    use net::vni::Vni;
    use pretty_assertions::assert_eq;

    #[test]
    fn nvgre_is_registered() {
        let util = link_util("nvgre").unwrap();
        assert_eq!(util.id(), "nvgre");
        assert_eq!(util.maxattr(), 15);
        assert_eq!(util.usage(), USAGE);
        assert!(link_util("vxlan").is_none());
        assert!(link_util("nvg").is_none());
    }

    #[test]
    fn parse_encodes_into_a_fresh_buffer() {
        let util = link_util("nvgre").unwrap();
        let resolver = StaticResolver::new();
        let LinkOpts::Encoded(buf) = util.parse(&["id", "9", "ttl", "3"], &resolver).unwrap()
        else {
            panic!("expected an encoded buffer");
        };
        let mut config = NvgreConfig::new(Vni::new_checked(9).unwrap());
        config.ttl = 3;
        let mut expected = AttrBuffer::new();
        config.encode(&mut expected).unwrap();
        assert_eq!(buf, expected);
        assert_eq!(util.print(buf.as_bytes(), &resolver), ["id", "9", "ttl", "3"]);
    }

    #[test]
    fn help_and_errors_produce_no_buffer() {
        let util = link_util("nvgre").unwrap();
        let resolver = StaticResolver::new();
        assert_eq!(util.parse(&["help"], &resolver), Ok(LinkOpts::Help));
        assert_eq!(
            util.parse(&["id", "1", "bogus"], &resolver),
            Err(ParseError::UnrecognizedKeyword("bogus".into()))
        );
    }

    #[test]
    fn print_of_garbage_is_empty() {
        let util = link_util("nvgre").unwrap();
        assert!(util.print(&[0xff; 3], &StaticResolver::new()).is_empty());
    }
}
