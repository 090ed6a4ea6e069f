// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use std::net::Ipv4Addr;

use tracing::{trace, warn};

use super::{NLA_HDRLEN, NLA_TYPE_MASK, nla_align};

/// Read-only view of an attribute stream, indexed by attribute type.
///
/// Types above `maxattr` are ignored, as is any repeat of a type already seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrTable<'a> {
    slots: Vec<Option<&'a [u8]>>,
}

impl<'a> AttrTable<'a> {
    /// An empty table for attribute types `1..=maxattr`.
    #[must_use]
    pub fn empty(maxattr: u16) -> Self {
        Self {
            slots: vec![None; usize::from(maxattr) + 1],
        }
    }

    /// Index an attribute stream.
    ///
    /// Parsing stops at the first header which is truncated or claims more bytes than remain;
    /// whatever was indexed before that point is kept.
    #[must_use]
    pub fn parse(mut bytes: &'a [u8], maxattr: u16) -> Self {
        let mut table = Self::empty(maxattr);
        while bytes.len() >= NLA_HDRLEN {
            let len = usize::from(u16::from_ne_bytes([bytes[0], bytes[1]]));
            let kind = u16::from_ne_bytes([bytes[2], bytes[3]]) & NLA_TYPE_MASK;
            if len < NLA_HDRLEN || len > bytes.len() {
                warn!(
                    "malformed attribute header (type {kind}, length {len}, {} bytes left)",
                    bytes.len()
                );
                break;
            }
            table.insert(kind, &bytes[NLA_HDRLEN..len]);
            bytes = &bytes[nla_align(len).min(bytes.len())..];
        }
        table
    }

    /// Build a table from already separated `(type, payload)` pairs.
    #[must_use]
    pub fn from_pairs<A: Into<u16>>(
        maxattr: u16,
        pairs: impl IntoIterator<Item = (A, &'a [u8])>,
    ) -> Self {
        let mut table = Self::empty(maxattr);
        for (kind, payload) in pairs {
            table.insert(kind.into(), payload);
        }
        table
    }

    fn insert(&mut self, kind: u16, payload: &'a [u8]) {
        match self.slots.get_mut(usize::from(kind)) {
            Some(slot) if kind != 0 => {
                if slot.is_none() {
                    *slot = Some(payload);
                } else {
                    trace!("ignoring repeated attribute {kind}");
                }
            }
            _ => trace!("ignoring unknown attribute {kind}"),
        }
    }

    /// The raw payload of an attribute, if present.
    #[must_use]
    pub fn get(&self, attr: impl Into<u16>) -> Option<&'a [u8]> {
        self.slots.get(usize::from(attr.into())).copied().flatten()
    }

    #[must_use]
    pub fn contains(&self, attr: impl Into<u16>) -> bool {
        self.get(attr).is_some()
    }

    /// First payload byte; `None` if absent or empty.
    #[must_use]
    pub fn u8(&self, attr: impl Into<u16>) -> Option<u8> {
        self.get(attr).and_then(|p| p.first().copied())
    }

    /// Host byte order `u32`; `None` if absent or shorter than 4 bytes.
    #[must_use]
    pub fn u32(&self, attr: impl Into<u16>) -> Option<u32> {
        self.get(attr)
            .and_then(|p| p.get(..4))
            .and_then(|p| <[u8; 4]>::try_from(p).ok())
            .map(u32::from_ne_bytes)
    }

    /// Network byte order IPv4 address; `None` if absent or shorter than 4 bytes.
    #[must_use]
    pub fn ipv4(&self, attr: impl Into<u16>) -> Option<Ipv4Addr> {
        self.get(attr)
            .and_then(|p| p.get(..4))
            .and_then(|p| <[u8; 4]>::try_from(p).ok())
            .map(Ipv4Addr::from)
    }
}
