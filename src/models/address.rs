//! IP address with a prefix length.
//!
//! [`Address`] is the building block for every other type: a [`Prefix`] is
//! derived from one, and ranges yield them when iterated.

use super::family::{netmask_bits, Family, Version, V4, V6};
use super::mask::Mask;
use super::parse;
use super::prefix::Prefix;
use super::range::AddressRange;
use crate::error::{Result, ValidationError};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::ops::{Add, Sub};
use std::str::FromStr;

/// An address of family `F` plus a prefix length.
///
/// Ordered by value, then prefix length. The netmask integer is cached at
/// construction and never changes.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address<F: Family> {
    value: u128,
    prefix_len: u8,
    netmask: u128,
    family: PhantomData<F>,
}

/// Anything accepted as the explicit netmask of an address.
pub trait IntoNetmask<F: Family> {
    /// `(prefix_len, netmask)`; hostmasks are rejected.
    fn into_netmask(self) -> Result<(u8, u128)>;
}

impl<F: Family> IntoNetmask<F> for Mask<F> {
    fn into_netmask(self) -> Result<(u8, u128)> {
        if !self.is_netmask() {
            return Err(ValidationError::mask(self.to_hex()));
        }
        Ok((self.prefix_len(), self.value()))
    }
}

impl<F: Family> IntoNetmask<F> for &str {
    fn into_netmask(self) -> Result<(u8, u128)> {
        let (prefix_len, value, _) = F::parse_mask(self)?;
        Ok((prefix_len, value))
    }
}

impl<F: Family> IntoNetmask<F> for u128 {
    fn into_netmask(self) -> Result<(u8, u128)> {
        Ok((Mask::<F>::mask_to_prefix_len(self)?, self))
    }
}

impl<F: Family> Address<F> {
    /// Wrap an integer as a full-width address.
    pub fn new(value: u128) -> Result<Self> {
        Self::with_prefix_len(value, F::WIDTH)
    }

    pub fn with_prefix_len(value: u128, prefix_len: u8) -> Result<Self> {
        if value > F::FULL_MASK {
            return Err(ValidationError::ip(value));
        }
        if prefix_len > F::WIDTH {
            return Err(ValidationError::ip(format!("{}/{prefix_len}", F::ip_to_string(value))));
        }
        Ok(Self::from_parts(value, prefix_len))
    }

    pub fn with_netmask(value: u128, netmask: impl IntoNetmask<F>) -> Result<Self> {
        if value > F::FULL_MASK {
            return Err(ValidationError::ip(value));
        }
        let (prefix_len, _) = netmask.into_netmask()?;
        Ok(Self::from_parts(value, prefix_len))
    }

    /// Parse `address[/prefix_len]`.
    pub fn parse(text: &str) -> Result<Self> {
        let (value, prefix_len) = Self::parse_address_prefix(text)?;
        Ok(Self::from_parts(value, prefix_len))
    }

    /// Parse a bare address and apply an explicit netmask. Giving a
    /// `/prefix_len` in the text as well is a mask error.
    pub fn parse_with_netmask(text: &str, netmask: impl IntoNetmask<F>) -> Result<Self> {
        if text.contains('/') {
            return Err(ValidationError::mask(text));
        }
        let value = Self::parse_ip(text)?;
        let (prefix_len, _) = netmask.into_netmask()?;
        Ok(Self::from_parts(value, prefix_len))
    }

    /// Split and validate `address[/prefix_len]` without building an address.
    pub fn parse_address_prefix(text: &str) -> Result<(u128, u8)> {
        parse::parse_address_prefix::<F>(text).ok_or_else(|| ValidationError::ip(text))
    }

    /// Parse a bare address; any `/prefix_len` suffix is rejected.
    pub fn parse_ip(text: &str) -> Result<u128> {
        F::parse_ip(text).ok_or_else(|| ValidationError::ip(text))
    }

    /// Canonical text of an integer value.
    pub fn int_to_str(value: u128) -> Result<String> {
        if value > F::FULL_MASK {
            return Err(ValidationError::ip(value));
        }
        Ok(F::ip_to_string(value))
    }

    /// `127.0.0.1` or `::1`.
    pub fn localhost() -> Self {
        Self::host(F::LOCALHOST)
    }

    /// Caller guarantees `value <= FULL_MASK` and `prefix_len <= WIDTH`.
    pub(crate) fn from_parts(value: u128, prefix_len: u8) -> Self {
        Address {
            value,
            prefix_len,
            netmask: netmask_bits(prefix_len, F::FULL_MASK),
            family: PhantomData,
        }
    }

    pub(crate) fn host(value: u128) -> Self {
        Self::from_parts(value, F::WIDTH)
    }

    pub fn value(&self) -> u128 {
        self.value
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn version(&self) -> Version {
        F::VERSION
    }

    /// Text form; `/prefix_len` is left out for a full-width prefix unless
    /// `always_prefix` is set.
    pub fn format(&self, always_prefix: bool) -> String {
        let ip = F::ip_to_string(self.value);
        if always_prefix || self.prefix_len != F::WIDTH {
            format!("{ip}/{}", self.prefix_len)
        } else {
            ip
        }
    }

    /// The network block this address belongs to.
    pub fn network(&self) -> Prefix<F> {
        Prefix::new(*self)
    }

    pub fn netmask(&self) -> Mask<F> {
        Mask::from_valid(self.netmask)
    }

    pub fn hostmask(&self) -> Mask<F> {
        Mask::from_valid(self.hostmask_int())
    }

    pub fn netmask_int(&self) -> u128 {
        self.netmask
    }

    pub fn hostmask_int(&self) -> u128 {
        self.netmask ^ F::FULL_MASK
    }

    /// Last address of the network, as a full-width address.
    pub fn broadcast(&self) -> Self {
        Self::host(self.value | self.hostmask_int())
    }

    pub fn is_unspecified(&self) -> bool {
        self.value == 0
    }

    pub fn is_private(&self) -> bool {
        self.in_blocks(F::PRIVATE)
    }

    pub fn is_multicast(&self) -> bool {
        self.in_blocks(F::MULTICAST)
    }

    pub fn is_loopback(&self) -> bool {
        if F::LOOPBACK_HOST_ONLY && self.prefix_len != F::WIDTH {
            return false;
        }
        self.in_blocks(F::LOOPBACK)
    }

    pub fn is_link_local(&self) -> bool {
        self.in_blocks(F::LINK_LOCAL)
    }

    fn in_blocks(&self, blocks: &[(u128, u8)]) -> bool {
        let host = Self::host(self.value);
        blocks
            .iter()
            .any(|&(network, prefix_len)| Prefix::new(Self::from_parts(network, prefix_len)).contains(&host))
    }

    /// Reversed labels joined by `.`, with `suffix` appended when it is not
    /// empty.
    pub fn reverse_dns_pieces(&self, suffix: &str) -> String {
        let mut pieces = F::reverse_dns_labels(self.value);
        if !suffix.is_empty() {
            pieces.push(suffix.to_string());
        }
        pieces.join(".")
    }

    pub fn reverse_dns(&self) -> String {
        self.reverse_dns_pieces(F::REVERSE_DNS_SUFFIX)
    }

    /// `A` or `AAAA`.
    pub fn forward_dns_rr_type(&self) -> &'static str {
        F::FORWARD_DNS_RR_TYPE
    }

    pub fn to_hex(&self) -> String {
        format!("0x{:0width$x}", self.value, width = usize::from(F::WIDTH / 4))
    }

    /// Offset by `n`; the result is full width. Leaving the address space
    /// is an error.
    pub fn checked_add(&self, n: i128) -> Result<Self> {
        let value = if n >= 0 {
            self.value.checked_add(n.unsigned_abs())
        } else {
            self.value.checked_sub(n.unsigned_abs())
        };
        value
            .filter(|value| *value <= F::FULL_MASK)
            .map(Self::host)
            .ok_or_else(|| ValidationError::ip(format!("{self} + {n}")))
    }

    pub fn checked_sub(&self, n: i128) -> Result<Self> {
        let value = if n >= 0 {
            self.value.checked_sub(n.unsigned_abs())
        } else {
            self.value.checked_add(n.unsigned_abs())
        };
        value
            .filter(|value| *value <= F::FULL_MASK)
            .map(Self::host)
            .ok_or_else(|| ValidationError::ip(format!("{self} - {n}")))
    }

    /// Lazily split the network into `2^diff` blocks of prefix length
    /// `prefix_len + diff`, capped at the full width.
    pub fn subnets(&self, diff: u8) -> Subnets<F> {
        let prefix_len = self.prefix_len.saturating_add(diff).min(F::WIDTH);
        let first = self.value & self.netmask;
        Subnets {
            next: Some(Self::from_parts(first, prefix_len)),
            last: self.broadcast().value,
        }
    }

    pub fn subnet(&self, diff: u8) -> Vec<Self> {
        self.subnets(diff).collect()
    }
}

/// Iterator returned by [`Address::subnets`].
#[derive(Debug, Clone)]
pub struct Subnets<F: Family> {
    next: Option<Address<F>>,
    last: u128,
}

impl<F: Family> Iterator for Subnets<F> {
    type Item = Address<F>;

    fn next(&mut self) -> Option<Address<F>> {
        let current = self.next.take()?;
        let broadcast = current.broadcast().value;
        if broadcast < self.last {
            self.next = Some(Address::from_parts(broadcast + 1, current.prefix_len));
        }
        Some(current)
    }
}

impl<F: Family> Add<i128> for Address<F> {
    type Output = Result<Address<F>>;

    fn add(self, n: i128) -> Result<Address<F>> {
        self.checked_add(n)
    }
}

impl<F: Family> Sub<i128> for Address<F> {
    type Output = Result<Address<F>>;

    fn sub(self, n: i128) -> Result<Address<F>> {
        self.checked_sub(n)
    }
}

impl<F: Family> Add for Address<F> {
    type Output = Result<Address<F>>;

    fn add(self, other: Address<F>) -> Result<Address<F>> {
        self.value
            .checked_add(other.value)
            .filter(|value| *value <= F::FULL_MASK)
            .map(Address::host)
            .ok_or_else(|| ValidationError::ip(format!("{self} + {other}")))
    }
}

impl<F: Family> Sub for Address<F> {
    type Output = Result<Address<F>>;

    fn sub(self, other: Address<F>) -> Result<Address<F>> {
        self.value
            .checked_sub(other.value)
            .map(Address::host)
            .ok_or_else(|| ValidationError::ip(format!("{self} - {other}")))
    }
}

impl<F: Family> FromStr for Address<F> {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        Address::parse(s)
    }
}

impl<F: Family> From<Address<F>> for u128 {
    fn from(address: Address<F>) -> u128 {
        address.value
    }
}

impl From<Ipv4Addr> for Address<V4> {
    fn from(addr: Ipv4Addr) -> Self {
        Address::host(u128::from(u32::from(addr)))
    }
}

impl From<Address<V4>> for Ipv4Addr {
    fn from(address: Address<V4>) -> Self {
        Ipv4Addr::from(address.value as u32)
    }
}

impl From<Ipv6Addr> for Address<V6> {
    fn from(addr: Ipv6Addr) -> Self {
        Address::host(u128::from(addr))
    }
}

impl From<Address<V6>> for Ipv6Addr {
    fn from(address: Address<V6>) -> Self {
        Ipv6Addr::from(address.value)
    }
}

impl<F: Family> fmt::Display for Address<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

impl<F: Family> fmt::Debug for Address<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({:?})", F::ADDRESS_NAME, self.format(false))
    }
}

impl<F: Family> Serialize for Address<F> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.format(false))
    }
}

impl<'de, F: Family> Deserialize<'de> for Address<F> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Address<F>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(de::Error::custom)
    }
}
