// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

use std::net::Ipv4Addr;

use tracing::trace;

use super::{NLA_HDRLEN, nla_align};

/// Serialized size limit for the link info data of a link-creation request.
pub const DEFAULT_ATTR_CAPACITY: usize = 1024;

/// An append did not fit into what is left of the buffer.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("attribute needs {needed} bytes but only {remaining} are left in the buffer")]
pub struct BufferExhausted {
    pub needed: usize,
    pub remaining: usize,
}

/// Errors appending attributes to an [`AttrBuffer`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AttrError {
    #[error(transparent)]
    Exhausted(#[from] BufferExhausted),
    #[error("attribute type {0} written more than once")]
    Duplicate(u16),
    #[error("payload of {0} bytes does not fit an attribute header")]
    PayloadTooLarge(usize),
}

/// Append-only attribute list with a fixed serialized size limit.
///
/// The backing storage grows on demand; the limit is enforced on every append, and a failed
/// append leaves the buffer untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrBuffer {
    bytes: Vec<u8>,
    capacity: usize,
    written: Vec<u16>,
}

impl Default for AttrBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl AttrBuffer {
    /// A buffer limited to [`DEFAULT_ATTR_CAPACITY`] bytes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ATTR_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::new(),
            capacity,
            written: Vec::new(),
        }
    }

    /// Append an attribute with an arbitrary payload.
    ///
    /// # Errors
    ///
    /// * [`AttrError::Duplicate`] if `attr` was already appended,
    /// * [`AttrError::PayloadTooLarge`] if the length does not fit the 16 bit header field,
    /// * [`AttrError::Exhausted`] if the padded attribute exceeds the remaining capacity.
    pub fn append_bytes(&mut self, attr: impl Into<u16>, payload: &[u8]) -> Result<(), AttrError> {
        let attr = attr.into();
        if self.written.contains(&attr) {
            return Err(AttrError::Duplicate(attr));
        }
        let len = NLA_HDRLEN + payload.len();
        let header_len = u16::try_from(len).map_err(|_| AttrError::PayloadTooLarge(payload.len()))?;
        let needed = nla_align(len);
        if needed > self.remaining() {
            return Err(BufferExhausted {
                needed,
                remaining: self.remaining(),
            }
            .into());
        }
        self.bytes.extend_from_slice(&header_len.to_ne_bytes());
        self.bytes.extend_from_slice(&attr.to_ne_bytes());
        self.bytes.extend_from_slice(payload);
        self.bytes.resize(self.bytes.len() + (needed - len), 0);
        self.written.push(attr);
        trace!("appended attribute {attr} ({} payload bytes)", payload.len());
        Ok(())
    }

    /// Append a one byte attribute.
    ///
    /// # Errors
    ///
    /// See [`AttrBuffer::append_bytes`].
    pub fn append_u8(&mut self, attr: impl Into<u16>, value: u8) -> Result<(), AttrError> {
        self.append_bytes(attr, &[value])
    }

    /// Append a host byte order `u32` attribute.
    ///
    /// # Errors
    ///
    /// See [`AttrBuffer::append_bytes`].
    pub fn append_u32(&mut self, attr: impl Into<u16>, value: u32) -> Result<(), AttrError> {
        self.append_bytes(attr, &value.to_ne_bytes())
    }

    /// Append an IPv4 address in network byte order.
    ///
    /// # Errors
    ///
    /// See [`AttrBuffer::append_bytes`].
    pub fn append_ipv4(&mut self, attr: impl Into<u16>, addr: Ipv4Addr) -> Result<(), AttrError> {
        self.append_bytes(attr, &addr.octets())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.bytes.len())
    }

    /// Attribute types in the order they were appended
    #[must_use]
    pub fn attributes(&self) -> &[u16] {
        &self.written
    }

    /// Where the next append will land.
    pub(crate) fn mark(&self) -> (usize, usize) {
        (self.bytes.len(), self.written.len())
    }

    /// Drop everything appended since `mark` was taken.
    pub(crate) fn truncate(&mut self, (bytes, written): (usize, usize)) {
        self.bytes.truncate(bytes);
        self.written.truncate(written);
    }
}
