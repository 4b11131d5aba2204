//! Address families.
//!
//! The two widths are unit marker types implementing [`Family`]. Every value
//! type in [`crate::models`] is generic over the family, so an IPv4 and an
//! IPv6 value can never be mixed by accident.

use super::mask::MaskFormat;
use super::parse;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::OnceLock;

/// IP protocol version. IPv4 sorts before IPv6.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Version {
    V4,
    V6,
}

impl Version {
    /// The version number, 4 or 6.
    pub fn number(self) -> u8 {
        match self {
            Version::V4 => 4,
            Version::V6 => 6,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IPv{}", self.number())
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::V4 {}
    impl Sealed for super::V6 {}
}

/// Per-width constants, tables and text codec.
///
/// Sealed: only [`V4`] and [`V6`] implement it.
pub trait Family:
    sealed::Sealed
    + Copy
    + Clone
    + fmt::Debug
    + Default
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Hash
    + Send
    + Sync
    + 'static
{
    const VERSION: Version;
    /// Number of bits in an address.
    const WIDTH: u8;
    /// `2^WIDTH - 1`.
    const FULL_MASK: u128;
    /// Type names used by `Debug` output.
    const ADDRESS_NAME: &'static str;
    const MASK_NAME: &'static str;
    const REVERSE_DNS_SUFFIX: &'static str;
    const FORWARD_DNS_RR_TYPE: &'static str;
    const LOCALHOST: u128;
    /// Well-known reserved blocks as `(network, prefix_len)`.
    const PRIVATE: &'static [(u128, u8)];
    const MULTICAST: &'static [(u128, u8)];
    const LOOPBACK: &'static [(u128, u8)];
    /// Loopback also requires a full-width prefix length.
    const LOOPBACK_HOST_ONLY: bool;
    const LINK_LOCAL: &'static [(u128, u8)];

    /// Every contiguous netmask of this width mapped to its prefix length.
    /// Built on first use, read-only afterwards.
    fn netmask_table() -> &'static HashMap<u128, u8>;

    /// Core address grammar, without any `/prefix` suffix.
    fn parse_ip(text: &str) -> Option<u128>;

    /// Mask grammar: `(prefix_len, mask, format)`.
    fn parse_mask(text: &str) -> Result<(u8, u128, MaskFormat)>;

    /// Canonical text of an in-range value.
    fn ip_to_string(value: u128) -> String;

    /// Reverse-DNS labels, least significant first.
    fn reverse_dns_labels(value: u128) -> Vec<String>;
}

/// IPv4 marker: 32-bit addresses.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct V4;

/// IPv6 marker: 128-bit addresses.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct V6;

impl Family for V4 {
    const VERSION: Version = Version::V4;
    const WIDTH: u8 = 32;
    const FULL_MASK: u128 = u32::MAX as u128;
    const ADDRESS_NAME: &'static str = "Ipv4";
    const MASK_NAME: &'static str = "Mask4";
    const REVERSE_DNS_SUFFIX: &'static str = "in-addr.arpa";
    const FORWARD_DNS_RR_TYPE: &'static str = "A";
    const LOCALHOST: u128 = 0x7f00_0001;
    // RFC 1918
    const PRIVATE: &'static [(u128, u8)] =
        &[(0x0a00_0000, 8), (0xac10_0000, 12), (0xc0a8_0000, 16)];
    const MULTICAST: &'static [(u128, u8)] = &[(0xe000_0000, 4)];
    const LOOPBACK: &'static [(u128, u8)] = &[(0x7f00_0000, 8)];
    const LOOPBACK_HOST_ONLY: bool = false;
    // RFC 3927
    const LINK_LOCAL: &'static [(u128, u8)] = &[(0xa9fe_0000, 16)];

    fn netmask_table() -> &'static HashMap<u128, u8> {
        static TABLE: OnceLock<HashMap<u128, u8>> = OnceLock::new();
        TABLE.get_or_init(|| build_netmask_table(Self::WIDTH, Self::FULL_MASK))
    }

    fn parse_ip(text: &str) -> Option<u128> {
        parse::parse_ipv4(text)
    }

    fn parse_mask(text: &str) -> Result<(u8, u128, MaskFormat)> {
        parse::parse_mask4(text)
    }

    fn ip_to_string(value: u128) -> String {
        parse::format_ipv4(value)
    }

    fn reverse_dns_labels(value: u128) -> Vec<String> {
        (0..4)
            .map(|octet| ((value >> (8 * octet)) & 0xff).to_string())
            .collect()
    }
}

impl Family for V6 {
    const VERSION: Version = Version::V6;
    const WIDTH: u8 = 128;
    const FULL_MASK: u128 = u128::MAX;
    const ADDRESS_NAME: &'static str = "Ipv6";
    const MASK_NAME: &'static str = "Mask6";
    const REVERSE_DNS_SUFFIX: &'static str = "ip6.arpa";
    const FORWARD_DNS_RR_TYPE: &'static str = "AAAA";
    const LOCALHOST: u128 = 1;
    // Unique local addresses, RFC 4193
    const PRIVATE: &'static [(u128, u8)] = &[(0xfc00_u128 << 112, 7)];
    const MULTICAST: &'static [(u128, u8)] = &[(0xff00_u128 << 112, 8)];
    const LOOPBACK: &'static [(u128, u8)] = &[(1, 128)];
    const LOOPBACK_HOST_ONLY: bool = true;
    const LINK_LOCAL: &'static [(u128, u8)] = &[(0xfe80_u128 << 112, 10)];

    fn netmask_table() -> &'static HashMap<u128, u8> {
        static TABLE: OnceLock<HashMap<u128, u8>> = OnceLock::new();
        TABLE.get_or_init(|| build_netmask_table(Self::WIDTH, Self::FULL_MASK))
    }

    fn parse_ip(text: &str) -> Option<u128> {
        parse::parse_ipv6(text)
    }

    fn parse_mask(text: &str) -> Result<(u8, u128, MaskFormat)> {
        parse::parse_mask6(text)
    }

    fn ip_to_string(value: u128) -> String {
        parse::format_ipv6(value)
    }

    fn reverse_dns_labels(value: u128) -> Vec<String> {
        (0..32)
            .map(|nibble| format!("{:x}", (value >> (4 * nibble)) & 0xf))
            .collect()
    }
}

/// Netmask integer for a prefix length of a given width. `prefix_len` must
/// not exceed the width.
pub(crate) fn netmask_bits(prefix_len: u8, full_mask: u128) -> u128 {
    full_mask ^ full_mask.checked_shr(u32::from(prefix_len)).unwrap_or(0)
}

fn build_netmask_table(width: u8, full_mask: u128) -> HashMap<u128, u8> {
    log::trace!("building /{width} netmask table");
    (0..=width)
        .map(|prefix_len| (netmask_bits(prefix_len, full_mask), prefix_len))
        .collect()
}
