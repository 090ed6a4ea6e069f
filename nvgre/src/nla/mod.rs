// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Netlink attribute (TLV) encoding and lookup.
//!
//! Each attribute is a 4 byte header (`u16` total length, `u16` type, both in host byte order)
//! followed by the payload, zero padded to a multiple of 4 bytes.

mod buffer;
mod table;

pub use buffer::*;
pub use table::*;

/// Size of an attribute header
pub const NLA_HDRLEN: usize = 4;
/// Attribute alignment
pub const NLA_ALIGNTO: usize = 4;
/// Flag bits which may be set in the type field and are not part of the type itself
pub const NLA_TYPE_MASK: u16 = !(NLA_F_NESTED | NLA_F_NET_BYTEORDER);
const NLA_F_NESTED: u16 = 1 << 15;
const NLA_F_NET_BYTEORDER: u16 = 1 << 14;

/// Round `len` up to the attribute alignment.
#[must_use]
pub const fn nla_align(len: usize) -> usize {
    (len + NLA_ALIGNTO - 1) & !(NLA_ALIGNTO - 1)
}
