//! Text grammars for addresses and masks.
//!
//! IPv4 is a strict dotted quad (leading zeros tolerated, no shorthand like
//! `127.1`). IPv6 follows RFC 4291 including the dotted-quad tail. Rendering
//! of IPv6 compresses the longest run of zero groups and keeps the
//! IPv4-compatible and IPv4-mapped tails in dotted form.

use super::family::{netmask_bits, Family, V4, V6};
use super::mask::MaskFormat;
use crate::error::{Result, ValidationError};
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

static DOTTED_QUAD_REGEX: OnceLock<Regex> = OnceLock::new();
static HEX_MASK_REGEX: OnceLock<Regex> = OnceLock::new();

fn dotted_quad_regex() -> &'static Regex {
    DOTTED_QUAD_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$")
            .expect("Invalid Regex")
    })
}

fn hex_mask_regex() -> &'static Regex {
    HEX_MASK_REGEX.get_or_init(|| Regex::new(r"^0x[0-9a-fA-F]{8}$").expect("Invalid Regex"))
}

/// Parse a dotted quad into its integer value.
pub(crate) fn parse_ipv4(text: &str) -> Option<u128> {
    let caps = dotted_quad_regex().captures(text)?;
    let mut value: u128 = 0;
    for octet in caps.iter().skip(1) {
        let octet: u16 = octet?.as_str().parse().ok()?;
        if octet > 255 {
            return None;
        }
        value = (value << 8) | u128::from(octet);
    }
    Some(value)
}

/// Parse RFC 4291 text (hex groups, one `::`, optional dotted-quad tail).
///
/// The tail goes through [`parse_ipv4`] so it accepts the same octets as a
/// standalone IPv4 address.
pub(crate) fn parse_ipv6(text: &str) -> Option<u128> {
    if !text.contains('.') {
        return text.parse::<Ipv6Addr>().ok().map(u128::from);
    }
    let (head, tail) = text.rsplit_once(':')?;
    let tail = parse_ipv4(tail)?;
    let groups = format!("{head}:{:x}:{:x}", tail >> 16, tail & 0xffff);
    groups.parse::<Ipv6Addr>().ok().map(u128::from)
}

/// Decimal prefix length, digits only.
fn parse_decimal(text: &str) -> Option<u8> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Split `address[/prefix_len]` and validate both halves.
pub(crate) fn parse_address_prefix<F: Family>(text: &str) -> Option<(u128, u8)> {
    match text.split_once('/') {
        Some((address, prefix_len)) => {
            let prefix_len = parse_decimal(prefix_len).filter(|len| *len <= F::WIDTH)?;
            Some((F::parse_ip(address)?, prefix_len))
        }
        None => Some((F::parse_ip(text)?, F::WIDTH)),
    }
}

/// Decimal prefix length to `(prefix_len, netmask)`.
pub(crate) fn parse_prefix_len<F: Family>(text: &str) -> Option<(u8, u128)> {
    let prefix_len = parse_decimal(text).filter(|len| *len <= F::WIDTH)?;
    Some((prefix_len, netmask_bits(prefix_len, F::FULL_MASK)))
}

/// IPv4 mask: `0x` + 8 hex digits, `[/]prefix_len`, or a dotted quad.
pub(crate) fn parse_mask4(text: &str) -> Result<(u8, u128, MaskFormat)> {
    let (mask, format) = if text.starts_with("0x") {
        if !hex_mask_regex().is_match(text) {
            return Err(ValidationError::mask(text));
        }
        let mask =
            u128::from_str_radix(&text[2..], 16).map_err(|_| ValidationError::mask(text))?;
        (mask, MaskFormat::Hex)
    } else if let Some(prefix_len) = text.strip_prefix('/') {
        let (_, mask) =
            parse_prefix_len::<V4>(prefix_len).ok_or_else(|| ValidationError::mask(text))?;
        (mask, MaskFormat::Prefix)
    } else if let Some((_, mask)) = parse_prefix_len::<V4>(text) {
        (mask, MaskFormat::Prefix)
    } else if let Some(mask) = parse_ipv4(text) {
        (mask, MaskFormat::DottedQuad)
    } else {
        return Err(ValidationError::mask(text));
    };

    // Non-contiguous netmasks are not supported.
    let prefix_len = V4::netmask_table()
        .get(&mask)
        .copied()
        .ok_or_else(|| ValidationError::mask(text))?;
    Ok((prefix_len, mask, format))
}

/// IPv6 mask: `[/]prefix_len` only.
pub(crate) fn parse_mask6(text: &str) -> Result<(u8, u128, MaskFormat)> {
    let digits = text.strip_prefix('/').unwrap_or(text);
    let (prefix_len, mask) =
        parse_prefix_len::<V6>(digits).ok_or_else(|| ValidationError::mask(text))?;
    Ok((prefix_len, mask, MaskFormat::Prefix))
}

pub(crate) fn format_ipv4(value: u128) -> String {
    Ipv4Addr::from(value as u32).to_string()
}

pub(crate) fn format_ipv6(value: u128) -> String {
    let groups: Vec<u16> = (0..8)
        .map(|i| (value >> (112 - 16 * i)) as u16)
        .collect();

    // Longest run of zero groups, first one wins a tie; runs of one are
    // not compressed.
    let mut best: Option<(usize, usize)> = None;
    let mut current: Option<(usize, usize)> = None;
    for (i, group) in groups.iter().enumerate() {
        if *group == 0 {
            current = match current {
                Some((start, len)) => Some((start, len + 1)),
                None => Some((i, 1)),
            };
            if let Some((start, len)) = current {
                if best.map_or(true, |(_, best_len)| len > best_len) {
                    best = Some((start, len));
                }
            }
        } else {
            current = None;
        }
    }
    let best = best.filter(|(_, len)| *len >= 2);

    let mut out = String::with_capacity(39);
    for (i, group) in groups.iter().enumerate() {
        if let Some((start, len)) = best {
            if i >= start && i < start + len {
                if i == start {
                    out.push(':');
                }
                continue;
            }
        }
        if i != 0 {
            out.push(':');
        }
        // IPv4-compatible (::a.b.c.d) and IPv4-mapped (::ffff:a.b.c.d) tails.
        let embedded_v4 = matches!(best, Some((0, 6)))
            || (matches!(best, Some((0, 5))) && groups[5] == 0xffff);
        if i == 6 && embedded_v4 {
            out.push_str(&format_ipv4(value & 0xffff_ffff));
            return out;
        }
        out.push_str(&format!("{group:x}"));
    }
    if let Some((start, len)) = best {
        if start + len == 8 {
            out.push(':');
        }
    }
    out
}
