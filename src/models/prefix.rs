//! CIDR network blocks.

use super::address::Address;
use super::family::Family;
use super::mask::Mask;
use super::range::{AddressRange, IpRange, RangeIter};
use crate::error::{Result, ValidationError};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The network block of an address: host bits cleared for `first`, set for
/// `last`. Renders as `first/prefix_len`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Prefix<F: Family> {
    range: IpRange<F>,
    prefix_len: u8,
}

impl<F: Family> Prefix<F> {
    pub fn new(address: Address<F>) -> Self {
        let first = address.value() & address.netmask_int();
        Prefix {
            range: IpRange::from_values(first, address.broadcast().value()),
            prefix_len: address.prefix_len(),
        }
    }

    /// Parse `address[/prefix_len]`; host bits are dropped.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Prefix::new(Address::parse(text)?))
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// The network address carrying this prefix length.
    pub fn address(&self) -> Address<F> {
        Address::from_parts(self.range.first().value(), self.prefix_len)
    }

    pub fn netmask(&self) -> Mask<F> {
        self.address().netmask()
    }

    pub fn hostmask(&self) -> Mask<F> {
        self.address().hostmask()
    }

    pub fn as_range(&self) -> &IpRange<F> {
        &self.range
    }
}

impl<F: Family> AddressRange<F> for Prefix<F> {
    fn first(&self) -> Address<F> {
        self.range.first()
    }

    fn last(&self) -> Address<F> {
        self.range.last()
    }
}

impl<F: Family> From<Address<F>> for Prefix<F> {
    fn from(address: Address<F>) -> Self {
        Prefix::new(address)
    }
}

impl<F: Family> IntoIterator for &Prefix<F> {
    type Item = Address<F>;
    type IntoIter = RangeIter<F>;

    fn into_iter(self) -> RangeIter<F> {
        self.iter()
    }
}

impl<F: Family> FromStr for Prefix<F> {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        Prefix::parse(s)
    }
}

impl<F: Family> PartialOrd for Prefix<F> {
    fn partial_cmp(&self, other: &Prefix<F>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Family> Ord for Prefix<F> {
    fn cmp(&self, other: &Prefix<F>) -> Ordering {
        self.cmp_range(other)
    }
}

impl<F: Family> fmt::Display for Prefix<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.range.first(), self.prefix_len)
    }
}

impl<F: Family> fmt::Debug for Prefix<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Prefix({:?})", self.to_string())
    }
}

impl<F: Family> Serialize for Prefix<F> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, F: Family> Deserialize<'de> for Prefix<F> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Prefix<F>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Prefix::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::super::family::{V4, V6};
    use super::*;
    use primitive_types::U256;

    type Prefix4 = Prefix<V4>;
    type Prefix6 = Prefix<V6>;

    #[test]
    fn test_prefix_strips_host_bits() {
        let prefix = Prefix4::parse("1.2.3.4/24").unwrap();
        assert_eq!(prefix.to_string(), "1.2.3.0/24");
        assert_eq!(prefix.first().to_string(), "1.2.3.0");
        assert_eq!(prefix.last().to_string(), "1.2.3.255");
        assert_eq!(prefix, Prefix4::parse("1.2.3.0/24").unwrap());
        assert_eq!(format!("{prefix:?}"), "Prefix(\"1.2.3.0/24\")");
        assert_eq!(prefix.address().to_string(), "1.2.3.0/24");
        assert_eq!(prefix.netmask().value(), 0xffffff00);
    }

    #[test]
    fn test_prefix_size() {
        assert_eq!(Prefix4::parse("1.2.3.4").unwrap().size(), U256::one());
        assert_eq!(Prefix4::parse("0.0.0.0/0").unwrap().size(), U256::from(1_u64 << 32));
        assert_eq!(Prefix6::parse("2001:db8::/32").unwrap().size(), U256::one() << 96);
        assert_eq!(Prefix6::parse("::/0").unwrap().size(), U256::one() << 128);
    }

    #[test]
    fn test_prefix_indexing() {
        let prefix = Prefix4::parse("1.2.3.0/24").unwrap();
        assert_eq!(prefix.get(0).unwrap().to_string(), "1.2.3.0");
        assert_eq!(prefix.get(-1).unwrap().to_string(), "1.2.3.255");
        let head: Vec<String> = prefix.slice(None, Some(5), 1).iter().map(|a| a.to_string()).collect();
        assert_eq!(head, ["1.2.3.0", "1.2.3.1", "1.2.3.2", "1.2.3.3", "1.2.3.4"]);
        let stepped: Vec<String> =
            prefix.slice(Some(3), Some(20), 5).iter().map(|a| a.to_string()).collect();
        assert_eq!(stepped, ["1.2.3.3", "1.2.3.8", "1.2.3.13", "1.2.3.18"]);
        assert_eq!((&prefix).into_iter().count(), 256);

        let six = Prefix6::parse("2001:db8::/32").unwrap();
        assert_eq!(six.get(-1).unwrap().to_string(), "2001:db8:ffff:ffff:ffff:ffff:ffff:ffff");
    }

    #[test]
    fn test_prefix_relations() {
        let wide = Prefix4::parse("10.0.0.0/8").unwrap();
        let narrow = Prefix4::parse("10.1.0.0/16").unwrap();
        assert!(narrow.is_subnet(&wide));
        assert!(wide.is_supernet(&narrow));
        assert!(wide.overlaps(&narrow));
        assert!(wide.contains(&"10.255.0.1".parse().unwrap()));
        assert!(Prefix4::parse("10.0.0.0/24")
            .unwrap()
            .is_adjacent(&Prefix4::parse("10.0.1.0/24").unwrap()));
    }

    #[test]
    fn test_prefix_order() {
        let cases = [
            ("1.0.0.0/8", "2.0.0.0/8"),
            ("1.0.0.0/8", "1.0.0.0/16"),
            ("1.0.0.0/8", "1.192.0.0/10"),
            ("1.0.0.0/8", "1.64.0.0/10"),
        ];
        for (a, b) in cases {
            let a = Prefix4::parse(a).unwrap();
            let b = Prefix4::parse(b).unwrap();
            assert!(a < b, "{a} should sort before {b}");
        }
        let a = Prefix6::parse("::").unwrap();
        assert_eq!(a.cmp(&Prefix6::parse("::/128").unwrap()), Ordering::Equal);
    }

    #[test]
    fn test_prefix_serde() {
        let prefix = Prefix6::parse("2001:db8::1/48").unwrap();
        let json = serde_json::to_string(&prefix).unwrap();
        assert_eq!(json, "\"2001:db8::/48\"");
        assert_eq!(serde_json::from_str::<Prefix6>(&json).unwrap(), prefix);
    }
}
