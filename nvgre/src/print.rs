// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Rendering the attributes of an existing NVGRE device.

use std::fmt::{Display, Formatter};

use net::interface::InterfaceIndex;
use tracing::trace;

use crate::attr::NvgreAttr;
use crate::config::Tos;
use crate::nla::AttrTable;
use crate::resolve::InterfaceResolver;

/// Render `table` as option tokens which [`crate::parse::parse_opt`] accepts back.
///
/// Nothing is rendered unless a well formed id is present. Every other attribute is optional
/// and skipped when absent, undersized or at its default value.
#[must_use]
pub fn print_opt(table: &AttrTable<'_>, resolver: &dyn InterfaceResolver) -> Vec<String> {
    let mut out = Vec::new();
    let Some(vni) = table.u32(NvgreAttr::Id) else {
        trace!("no usable id attribute, nothing to print");
        return out;
    };
    pair(&mut out, "id", vni);
    if let Some(group) = table.ipv4(NvgreAttr::Group).filter(|a| !a.is_unspecified()) {
        pair(&mut out, "group", group);
    }
    if let Some(local) = table.ipv4(NvgreAttr::Local).filter(|a| !a.is_unspecified()) {
        pair(&mut out, "local", local);
    }
    if let Some(link) = table
        .u32(NvgreAttr::Link)
        .and_then(|raw| InterfaceIndex::try_new(raw).ok())
    {
        let dev = resolver
            .name_of(link)
            .unwrap_or_else(|| link.to_u32().to_string());
        pair(&mut out, "dev", dev);
    }

    if table.u8(NvgreAttr::Learning) == Some(0) {
        out.push("nolearning".to_string());
    }
    for (attr, keyword) in [
        (NvgreAttr::Proxy, "proxy"),
        (NvgreAttr::Rsc, "rsc"),
        (NvgreAttr::L2Miss, "l2miss"),
        (NvgreAttr::L3Miss, "l3miss"),
    ] {
        if table.u8(attr).is_some_and(|flag| flag != 0) {
            out.push(keyword.to_string());
        }
    }

    match table.u8(NvgreAttr::Tos).map(Tos::from_wire) {
        Some(Tos::Inherit) => pair(&mut out, "tos", "inherit"),
        Some(Tos::Value(field)) => pair(&mut out, "tos", field),
        Some(Tos::Unset) | None => {}
    }
    if let Some(ttl) = table.u8(NvgreAttr::Ttl).filter(|ttl| *ttl != 0) {
        pair(&mut out, "ttl", ttl);
    }
    match table.u32(NvgreAttr::Ageing) {
        Some(0) => pair(&mut out, "ageing", "none"),
        Some(seconds) => pair(&mut out, "ageing", seconds),
        None => {}
    }
    if let Some(limit) = table.u32(NvgreAttr::Limit).filter(|limit| *limit != 0) {
        pair(&mut out, "maxaddr", limit);
    }
    out
}

fn pair(out: &mut Vec<String>, keyword: &str, value: impl Display) {
    out.push(keyword.to_string());
    out.push(value.to_string());
}

/// Printed options, displayed space separated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintedOpts(pub Vec<String>);

impl From<Vec<String>> for PrintedOpts {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl Display for PrintedOpts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}
