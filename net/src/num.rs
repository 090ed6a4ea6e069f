// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Unsigned integer parsing with C-style radix prefixes

/// Parse an unsigned 32-bit integer, selecting the radix from its prefix.
///
/// `0x`/`0X` selects hex, a leading `0` selects octal, and anything else is decimal.
/// The whole string must be consumed; signs and whitespace are rejected.
#[must_use]
pub fn parse_u32_auto(s: &str) -> Option<u32> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return parse_u32_radix(hex, 16);
    }
    if s.len() > 1
        && let Some(oct) = s.strip_prefix('0')
    {
        return parse_u32_radix(oct, 8);
    }
    parse_u32_radix(s, 10)
}

/// Parse an unsigned 32-bit integer in the given radix.
///
/// Unlike [`u32::from_str_radix`], a leading `+` is refused.
#[must_use]
pub fn parse_u32_radix(s: &str, radix: u32) -> Option<u32> {
    if s.is_empty() || !s.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(s, radix).ok()
}
