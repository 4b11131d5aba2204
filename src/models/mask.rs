//! Netmasks and hostmasks.
//!
//! A [`Mask`] is either a netmask (contiguous high-order ones) or a hostmask
//! (contiguous low-order ones). Non-contiguous values are rejected when the
//! mask is built.

use super::family::{netmask_bits, Family, Version};
use crate::error::{Result, ValidationError};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Not;
use std::str::FromStr;

/// How a mask renders as text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MaskFormat {
    /// `0x` followed by `WIDTH / 4` hex digits.
    Hex,
    /// Dotted quad, IPv4 only.
    DottedQuad,
    /// Bare decimal prefix length.
    Prefix,
}

/// A validated netmask or hostmask of family `F`.
///
/// Equality, ordering and hashing look at the mask value only; the render
/// format is presentation.
#[derive(Copy, Clone)]
pub struct Mask<F: Family> {
    value: u128,
    prefix_len: u8,
    format: MaskFormat,
    family: PhantomData<F>,
}

impl<F: Family> Mask<F> {
    /// Build a mask from its integer value. Netmasks and hostmasks are both
    /// accepted; a hostmask records a prefix length of 0. Renders as hex.
    pub fn new(value: u128) -> Result<Self> {
        if value > F::FULL_MASK {
            return Err(ValidationError::mask(value));
        }
        let mask = Self::from_valid(value);
        if mask.is_netmask() || mask.is_hostmask() {
            Ok(mask)
        } else {
            Err(ValidationError::mask(value))
        }
    }

    /// Parse mask text. See [`Family::parse_mask`] for the grammars.
    pub fn parse(text: &str) -> Result<Self> {
        let (prefix_len, value, format) = F::parse_mask(text)?;
        Ok(Mask {
            value,
            prefix_len,
            format,
            family: PhantomData,
        })
    }

    /// The netmask for a prefix length. Renders as a prefix length.
    pub fn from_prefix_len(prefix_len: u8) -> Result<Self> {
        let value = Self::prefix_len_to_mask(prefix_len)?;
        Ok(Mask {
            value,
            prefix_len,
            format: MaskFormat::Prefix,
            family: PhantomData,
        })
    }

    /// `value` must already be a netmask or hostmask of this width.
    pub(crate) fn from_valid(value: u128) -> Self {
        Mask {
            value,
            prefix_len: F::netmask_table().get(&value).copied().unwrap_or(0),
            format: MaskFormat::Hex,
            family: PhantomData,
        }
    }

    /// Prefix length of a netmask integer. Hostmasks and non-contiguous
    /// values are rejected.
    pub fn mask_to_prefix_len(value: u128) -> Result<u8> {
        F::netmask_table()
            .get(&value)
            .copied()
            .ok_or_else(|| ValidationError::mask(value))
    }

    /// Netmask integer of a prefix length.
    pub fn prefix_len_to_mask(prefix_len: u8) -> Result<u128> {
        if prefix_len > F::WIDTH {
            return Err(ValidationError::mask(format!("/{prefix_len}")));
        }
        Ok(netmask_bits(prefix_len, F::FULL_MASK))
    }

    pub fn value(&self) -> u128 {
        self.value
    }

    /// Number of leading one bits for a netmask, 0 for a hostmask.
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn version(&self) -> Version {
        F::VERSION
    }

    /// Format used by `Display`.
    pub fn render_format(&self) -> MaskFormat {
        self.format
    }

    pub fn is_netmask(&self) -> bool {
        F::netmask_table().contains_key(&self.value)
    }

    /// True for any run of low-order ones, including zero and all ones.
    pub fn is_hostmask(&self) -> bool {
        self.value.wrapping_add(1) & self.value == 0
    }

    /// Render in an explicit format. Dotted quad only exists for IPv4.
    pub fn format_as(&self, format: MaskFormat) -> Result<String> {
        match format {
            MaskFormat::Hex => Ok(self.to_hex()),
            MaskFormat::Prefix => Ok(self.prefix_len.to_string()),
            MaskFormat::DottedQuad if F::VERSION == Version::V4 => Ok(F::ip_to_string(self.value)),
            MaskFormat::DottedQuad => Err(ValidationError::mask(self.to_hex())),
        }
    }

    /// `0x` followed by the value as fixed-width hex.
    pub fn to_hex(&self) -> String {
        format!("0x{:0width$x}", self.value, width = usize::from(F::WIDTH / 4))
    }
}

impl<F: Family> Not for Mask<F> {
    type Output = Mask<F>;

    /// The complement of a netmask is a hostmask and vice versa.
    fn not(self) -> Mask<F> {
        Mask::from_valid(self.value ^ F::FULL_MASK)
    }
}

impl<F: Family> FromStr for Mask<F> {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        Mask::parse(s)
    }
}

impl<F: Family> TryFrom<u128> for Mask<F> {
    type Error = ValidationError;

    fn try_from(value: u128) -> Result<Self> {
        Mask::new(value)
    }
}

impl<F: Family> From<Mask<F>> for u128 {
    fn from(mask: Mask<F>) -> u128 {
        mask.value
    }
}

impl<F: Family> fmt::Display for Mask<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.format_as(self.format) {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str(&self.to_hex()),
        }
    }
}

impl<F: Family> fmt::Debug for Mask<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", F::MASK_NAME, self.to_hex())
    }
}

impl<F: Family> PartialEq for Mask<F> {
    fn eq(&self, other: &Mask<F>) -> bool {
        self.value == other.value
    }
}

impl<F: Family> Eq for Mask<F> {}

impl<F: Family> Hash for Mask<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<F: Family> PartialOrd for Mask<F> {
    fn partial_cmp(&self, other: &Mask<F>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Family> Ord for Mask<F> {
    fn cmp(&self, other: &Mask<F>) -> Ordering {
        self.value.cmp(&other.value)
    }
}

#[cfg(test)]
mod tests {
    use super::super::family::{V4, V6};
    use super::*;

    type Mask4 = Mask<V4>;
    type Mask6 = Mask<V6>;

    #[test]
    fn test_mask_from_int() {
        let mask = Mask4::new(0xffffff00).unwrap();
        assert_eq!(mask.prefix_len(), 24);
        assert!(mask.is_netmask());
        assert!(!mask.is_hostmask());
        assert_eq!(mask.to_string(), "0xffffff00");

        let host = Mask4::new(0xff).unwrap();
        assert_eq!(host.prefix_len(), 0);
        assert!(!host.is_netmask());
        assert!(host.is_hostmask());

        assert!(Mask4::new(0xff00ff00).is_err());
        assert!(Mask4::new(0x1_0000_0000).is_err());
        assert!(Mask6::new(u128::MAX).unwrap().is_netmask());
        assert!(Mask6::new(u128::MAX).unwrap().is_hostmask());
    }

    #[test]
    fn test_mask_zero_is_both() {
        let zero = Mask4::new(0).unwrap();
        assert!(zero.is_netmask());
        assert!(zero.is_hostmask());
        assert_eq!(zero.prefix_len(), 0);
    }

    #[test]
    fn test_mask_parse_keeps_format() {
        let dotted: Mask4 = "255.255.255.0".parse().unwrap();
        assert_eq!(dotted.prefix_len(), 24);
        assert_eq!(dotted.render_format(), MaskFormat::DottedQuad);
        assert_eq!(dotted.to_string(), "255.255.255.0");

        let prefix: Mask4 = "/16".parse().unwrap();
        assert_eq!(prefix.to_string(), "16");
        assert_eq!(prefix.value(), 0xffff0000);

        let hex: Mask4 = "0xfffffff0".parse().unwrap();
        assert_eq!(hex.to_string(), "0xfffffff0");
        assert_eq!(hex.prefix_len(), 28);

        let six: Mask6 = "/64".parse().unwrap();
        assert_eq!(six.to_string(), "64");
        assert_eq!(six.value(), 0xffff_ffff_ffff_ffff_u128 << 64);
    }

    #[test]
    fn test_mask_parse_rejects() {
        for bad in ["0xfffffffff", "0xff00ff00", "255.0.255.0", "/33", "x", ""] {
            assert!(Mask4::parse(bad).is_err(), "{bad:?} should be rejected");
        }
        assert_eq!(
            Mask4::parse("0xfffffffff").unwrap_err(),
            ValidationError::Mask("0xfffffffff".to_string())
        );
        for bad in ["/129", "ffff::", "0xffffffffffffffffffffffffffffffff"] {
            assert!(Mask6::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_mask_prefix_len_roundtrip() {
        for prefix_len in 0..=32 {
            let value = Mask4::prefix_len_to_mask(prefix_len).unwrap();
            assert_eq!(Mask4::mask_to_prefix_len(value).unwrap(), prefix_len);
        }
        assert_eq!(Mask4::prefix_len_to_mask(1).unwrap(), 0x80000000);
        assert!(Mask4::prefix_len_to_mask(33).is_err());
        assert!(Mask6::prefix_len_to_mask(129).is_err());
        assert!(Mask4::mask_to_prefix_len(0xff).is_err());
    }

    #[test]
    fn test_mask_format_as() {
        let mask = Mask4::from_prefix_len(20).unwrap();
        assert_eq!(mask.format_as(MaskFormat::Hex).unwrap(), "0xfffff000");
        assert_eq!(mask.format_as(MaskFormat::DottedQuad).unwrap(), "255.255.240.0");
        assert_eq!(mask.format_as(MaskFormat::Prefix).unwrap(), "20");

        let six = Mask6::from_prefix_len(8).unwrap();
        assert_eq!(
            six.format_as(MaskFormat::Hex).unwrap(),
            "0xff000000000000000000000000000000"
        );
        assert!(six.format_as(MaskFormat::DottedQuad).is_err());
    }

    #[test]
    fn test_mask_complement() {
        let mask = Mask4::from_prefix_len(24).unwrap();
        let host = !mask;
        assert_eq!(host.value(), 0xff);
        assert!(host.is_hostmask());
        assert_eq!(!host, mask);
        assert_eq!((!host).prefix_len(), 24);
        assert_eq!((!Mask6::from_prefix_len(0).unwrap()).value(), u128::MAX);
    }

    #[test]
    fn test_mask_order_by_value() {
        let a = Mask4::parse("255.255.0.0").unwrap();
        let b = Mask4::parse("/16").unwrap();
        let c = Mask4::parse("/24").unwrap();
        assert_eq!(a, b);
        assert!(a < c);
        assert_eq!(format!("{a:?}"), "Mask4(0xffff0000)");
    }
}
