//! Version-detecting wrappers and free helpers.
//!
//! [`IpAddress`] and [`IpPrefix`] hold either width and pick it from the
//! input text. IPv4 always sorts before IPv6; range predicates between two
//! versions answer `false`.

use super::address::Address;
use super::family::{Family, Version, V4, V6};
use super::parse;
use super::prefix::Prefix;
use super::range::AddressRange;
use crate::error::{Result, ValidationError};
use primitive_types::U256;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// An address of either version.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IpAddress {
    V4(Address<V4>),
    V6(Address<V6>),
}

impl IpAddress {
    /// Parse as IPv4 first, then IPv6.
    pub fn parse(text: &str) -> Result<Self> {
        if let Ok(address) = Address::<V4>::parse(text) {
            return Ok(IpAddress::V4(address));
        }
        if let Ok(address) = Address::<V6>::parse(text) {
            return Ok(IpAddress::V6(address));
        }
        Err(ValidationError::ip(text))
    }

    /// Bare address plus netmask text, both of the same version.
    pub fn parse_with_netmask(text: &str, netmask: &str) -> Result<Self> {
        if let Ok(address) = Address::<V4>::parse_with_netmask(text, netmask) {
            return Ok(IpAddress::V4(address));
        }
        if let Ok(address) = Address::<V6>::parse_with_netmask(text, netmask) {
            return Ok(IpAddress::V6(address));
        }
        Err(ValidationError::ip(text))
    }

    /// Values up to `2^32 - 1` are taken as IPv4, so `1` is `0.0.0.1`.
    pub fn from_int(value: u128) -> Self {
        if value <= V4::FULL_MASK {
            IpAddress::V4(Address::host(value))
        } else {
            IpAddress::V6(Address::host(value))
        }
    }

    pub fn version(&self) -> Version {
        match self {
            IpAddress::V4(_) => Version::V4,
            IpAddress::V6(_) => Version::V6,
        }
    }

    pub fn same_version(&self, other: &IpAddress) -> bool {
        self.version() == other.version()
    }

    pub fn value(&self) -> u128 {
        match self {
            IpAddress::V4(address) => address.value(),
            IpAddress::V6(address) => address.value(),
        }
    }

    pub fn prefix_len(&self) -> u8 {
        match self {
            IpAddress::V4(address) => address.prefix_len(),
            IpAddress::V6(address) => address.prefix_len(),
        }
    }

    pub fn format(&self, always_prefix: bool) -> String {
        match self {
            IpAddress::V4(address) => address.format(always_prefix),
            IpAddress::V6(address) => address.format(always_prefix),
        }
    }

    pub fn network(&self) -> IpPrefix {
        match self {
            IpAddress::V4(address) => IpPrefix::V4(address.network()),
            IpAddress::V6(address) => IpPrefix::V6(address.network()),
        }
    }

    pub fn broadcast(&self) -> IpAddress {
        match self {
            IpAddress::V4(address) => IpAddress::V4(address.broadcast()),
            IpAddress::V6(address) => IpAddress::V6(address.broadcast()),
        }
    }

    pub fn is_unspecified(&self) -> bool {
        self.value() == 0
    }

    pub fn is_private(&self) -> bool {
        match self {
            IpAddress::V4(address) => address.is_private(),
            IpAddress::V6(address) => address.is_private(),
        }
    }

    pub fn is_multicast(&self) -> bool {
        match self {
            IpAddress::V4(address) => address.is_multicast(),
            IpAddress::V6(address) => address.is_multicast(),
        }
    }

    pub fn is_loopback(&self) -> bool {
        match self {
            IpAddress::V4(address) => address.is_loopback(),
            IpAddress::V6(address) => address.is_loopback(),
        }
    }

    pub fn is_link_local(&self) -> bool {
        match self {
            IpAddress::V4(address) => address.is_link_local(),
            IpAddress::V6(address) => address.is_link_local(),
        }
    }

    pub fn reverse_dns(&self) -> String {
        match self {
            IpAddress::V4(address) => address.reverse_dns(),
            IpAddress::V6(address) => address.reverse_dns(),
        }
    }

    pub fn forward_dns_rr_type(&self) -> &'static str {
        match self {
            IpAddress::V4(address) => address.forward_dns_rr_type(),
            IpAddress::V6(address) => address.forward_dns_rr_type(),
        }
    }

    pub fn to_hex(&self) -> String {
        match self {
            IpAddress::V4(address) => address.to_hex(),
            IpAddress::V6(address) => address.to_hex(),
        }
    }
}

impl From<Address<V4>> for IpAddress {
    fn from(address: Address<V4>) -> Self {
        IpAddress::V4(address)
    }
}

impl From<Address<V6>> for IpAddress {
    fn from(address: Address<V6>) -> Self {
        IpAddress::V6(address)
    }
}

impl FromStr for IpAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        IpAddress::parse(s)
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IpAddress::V4(address) => fmt::Display::fmt(address, f),
            IpAddress::V6(address) => fmt::Display::fmt(address, f),
        }
    }
}

impl fmt::Debug for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IpAddress::V4(address) => fmt::Debug::fmt(address, f),
            IpAddress::V6(address) => fmt::Debug::fmt(address, f),
        }
    }
}

impl Serialize for IpAddress {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.format(false))
    }
}

impl<'de> Deserialize<'de> for IpAddress {
    fn deserialize<D>(deserializer: D) -> std::result::Result<IpAddress, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IpAddress::parse(&s).map_err(de::Error::custom)
    }
}

/// A CIDR block of either version.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IpPrefix {
    V4(Prefix<V4>),
    V6(Prefix<V6>),
}

impl IpPrefix {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(IpAddress::parse(text)?.network())
    }

    pub fn version(&self) -> Version {
        match self {
            IpPrefix::V4(_) => Version::V4,
            IpPrefix::V6(_) => Version::V6,
        }
    }

    pub fn prefix_len(&self) -> u8 {
        match self {
            IpPrefix::V4(prefix) => prefix.prefix_len(),
            IpPrefix::V6(prefix) => prefix.prefix_len(),
        }
    }

    pub fn first(&self) -> IpAddress {
        match self {
            IpPrefix::V4(prefix) => IpAddress::V4(prefix.first()),
            IpPrefix::V6(prefix) => IpAddress::V6(prefix.first()),
        }
    }

    pub fn last(&self) -> IpAddress {
        match self {
            IpPrefix::V4(prefix) => IpAddress::V4(prefix.last()),
            IpPrefix::V6(prefix) => IpAddress::V6(prefix.last()),
        }
    }

    pub fn size(&self) -> U256 {
        match self {
            IpPrefix::V4(prefix) => prefix.size(),
            IpPrefix::V6(prefix) => prefix.size(),
        }
    }

    /// False for an address of the other version.
    pub fn contains(&self, address: &IpAddress) -> bool {
        match (self, address) {
            (IpPrefix::V4(prefix), IpAddress::V4(address)) => prefix.contains(address),
            (IpPrefix::V6(prefix), IpAddress::V6(address)) => prefix.contains(address),
            _ => false,
        }
    }

    pub fn overlaps(&self, other: &IpPrefix) -> bool {
        match (self, other) {
            (IpPrefix::V4(a), IpPrefix::V4(b)) => a.overlaps(b),
            (IpPrefix::V6(a), IpPrefix::V6(b)) => a.overlaps(b),
            _ => false,
        }
    }

    pub fn is_adjacent(&self, other: &IpPrefix) -> bool {
        match (self, other) {
            (IpPrefix::V4(a), IpPrefix::V4(b)) => a.is_adjacent(b),
            (IpPrefix::V6(a), IpPrefix::V6(b)) => a.is_adjacent(b),
            _ => false,
        }
    }

    pub fn is_subnet(&self, other: &IpPrefix) -> bool {
        match (self, other) {
            (IpPrefix::V4(a), IpPrefix::V4(b)) => a.is_subnet(b),
            (IpPrefix::V6(a), IpPrefix::V6(b)) => a.is_subnet(b),
            _ => false,
        }
    }

    pub fn is_supernet(&self, other: &IpPrefix) -> bool {
        match (self, other) {
            (IpPrefix::V4(a), IpPrefix::V4(b)) => a.is_supernet(b),
            (IpPrefix::V6(a), IpPrefix::V6(b)) => a.is_supernet(b),
            _ => false,
        }
    }
}

impl From<Prefix<V4>> for IpPrefix {
    fn from(prefix: Prefix<V4>) -> Self {
        IpPrefix::V4(prefix)
    }
}

impl From<Prefix<V6>> for IpPrefix {
    fn from(prefix: Prefix<V6>) -> Self {
        IpPrefix::V6(prefix)
    }
}

impl FromStr for IpPrefix {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        IpPrefix::parse(s)
    }
}

impl fmt::Display for IpPrefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IpPrefix::V4(prefix) => fmt::Display::fmt(prefix, f),
            IpPrefix::V6(prefix) => fmt::Display::fmt(prefix, f),
        }
    }
}

impl fmt::Debug for IpPrefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IpPrefix::V4(prefix) => fmt::Debug::fmt(prefix, f),
            IpPrefix::V6(prefix) => fmt::Debug::fmt(prefix, f),
        }
    }
}

impl Serialize for IpPrefix {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IpPrefix {
    fn deserialize<D>(deserializer: D) -> std::result::Result<IpPrefix, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IpPrefix::parse(&s).map_err(de::Error::custom)
    }
}

pub fn is_ipv4(text: &str) -> bool {
    V4::parse_ip(text).is_some()
}

pub fn is_ipv6(text: &str) -> bool {
    V6::parse_ip(text).is_some()
}

pub fn is_ip(text: &str) -> bool {
    is_ipv4(text) || is_ipv6(text)
}

/// `address[/prefix_len]` check. `version` of `None` accepts either; with
/// `accept_ip` unset a bare address without `/prefix_len` is refused.
pub fn is_cidr(text: &str, version: Option<Version>, accept_ip: bool) -> bool {
    let valid = match version {
        Some(Version::V4) => parse::parse_address_prefix::<V4>(text).is_some(),
        Some(Version::V6) => parse::parse_address_prefix::<V6>(text).is_some(),
        None => {
            return is_cidr(text, Some(Version::V4), accept_ip)
                || is_cidr(text, Some(Version::V6), accept_ip)
        }
    };
    valid && (accept_ip || text.contains('/'))
}

/// Integer to address text; values up to `2^32 - 1` render as IPv4.
pub fn htop(value: u128) -> String {
    if value <= V4::FULL_MASK {
        V4::ip_to_string(value)
    } else {
        V6::ip_to_string(value)
    }
}

/// Address text of either version to its integer value.
pub fn ptoh(text: &str) -> Result<u128> {
    match V4::parse_ip(text) {
        Some(value) => Ok(value),
        None => Address::<V6>::parse_ip(text),
    }
}
