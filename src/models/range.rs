//! Contiguous address ranges.
//!
//! [`AddressRange`] holds everything a range can answer from its two
//! endpoints. [`IpRange`] is the plain `first-last` form; [`Prefix`] and
//! [`Glob`] are the CIDR and wildcard forms.
//!
//! [`Prefix`]: super::Prefix
//! [`Glob`]: super::Glob

use super::address::Address;
use super::family::Family;
use crate::error::{Result, ValidationError};
use primitive_types::U256;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// Shared behaviour of every range type, derived from `first` and `last`.
pub trait AddressRange<F: Family> {
    /// Lowest address, full width.
    fn first(&self) -> Address<F>;
    /// Highest address, full width.
    fn last(&self) -> Address<F>;

    /// Number of addresses. Up to `2^128` for IPv6.
    fn size(&self) -> U256 {
        U256::from(self.last().value() - self.first().value()) + U256::one()
    }

    fn contains(&self, address: &Address<F>) -> bool {
        let value = address.value();
        self.first().value() <= value && value <= self.last().value()
    }

    fn overlaps<R: AddressRange<F>>(&self, other: &R) -> bool
    where
        Self: Sized,
    {
        self.contains(&other.first())
            || self.contains(&other.last())
            || other.contains(&self.first())
            || other.contains(&self.last())
    }

    /// True when the two ranges touch without a gap and without overlap.
    fn is_adjacent<R: AddressRange<F>>(&self, other: &R) -> bool
    where
        Self: Sized,
    {
        let after = other
            .last()
            .value()
            .checked_add(1)
            .map_or(false, |next| next == self.first().value());
        let before = other
            .first()
            .value()
            .checked_sub(1)
            .map_or(false, |prev| prev == self.last().value());
        after || before
    }

    /// `self` lies entirely inside `other`.
    fn is_subnet<R: AddressRange<F>>(&self, other: &R) -> bool
    where
        Self: Sized,
    {
        other.first() <= self.first() && self.last() <= other.last()
    }

    /// `self` covers all of `other`.
    fn is_supernet<R: AddressRange<F>>(&self, other: &R) -> bool
    where
        Self: Sized,
    {
        self.first() <= other.first() && other.last() <= self.last()
    }

    /// The address at `index`; negative indexes count from the end.
    fn get(&self, index: i128) -> Option<Address<F>> {
        let first = self.first().value();
        let span = self.last().value() - first;
        let offset = if index >= 0 {
            let index = index.unsigned_abs();
            (index <= span).then_some(index)
        } else {
            let back = index.unsigned_abs() - 1;
            (back <= span).then(|| span - back)
        };
        offset.map(|offset| Address::host(first + offset))
    }

    /// A lazy view over `[start:stop:step]` with the usual clamping rules.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    fn slice(&self, start: Option<i128>, stop: Option<i128>, step: i128) -> AddressSlice<F> {
        assert!(step != 0, "slice step cannot be zero");
        let (offset, len) = slice_indices(self.size(), start, stop, step);
        AddressSlice {
            base: self.first().value(),
            offset,
            len,
            step,
            family: PhantomData,
        }
    }

    /// Every address from `first` to `last`.
    fn iter(&self) -> RangeIter<F> {
        self.slice(None, None, 1).iter()
    }

    /// Order by `first`, then larger ranges first.
    fn cmp_range<R: AddressRange<F>>(&self, other: &R) -> Ordering
    where
        Self: Sized,
    {
        self.first()
            .cmp(&other.first())
            .then_with(|| other.size().cmp(&self.size()))
    }
}

/// Resolve slice bounds against a length of up to `2^128`.
///
/// Positions are carried shifted by one so the `-1` used as the exclusive
/// stop of a backwards walk stays unsigned. Returns the offset of the first
/// element and the element count.
fn slice_indices(len: U256, start: Option<i128>, stop: Option<i128>, step: i128) -> (u128, U256) {
    let backwards = step < 0;
    let resolve = |index: Option<i128>, default: U256| -> U256 {
        let Some(index) = index else {
            return default;
        };
        let shifted = if index >= 0 {
            Some(U256::from(index.unsigned_abs()) + U256::one())
        } else {
            let back = U256::from(index.unsigned_abs());
            (back <= len).then(|| len - back + U256::one())
        };
        match shifted {
            None if backwards => U256::zero(),
            None => U256::one(),
            Some(position) if position > len => {
                if backwards {
                    len
                } else {
                    len + U256::one()
                }
            }
            Some(position) => position,
        }
    };

    let stride = U256::from(step.unsigned_abs());
    let (start, count) = if backwards {
        let start = resolve(start, len);
        let stop = resolve(stop, U256::zero());
        let count = if start > stop {
            (start - stop + stride - U256::one()) / stride
        } else {
            U256::zero()
        };
        (start, count)
    } else {
        let start = resolve(start, U256::one());
        let stop = resolve(stop, len + U256::one());
        let count = if stop > start {
            (stop - start + stride - U256::one()) / stride
        } else {
            U256::zero()
        };
        (start, count)
    };

    if count.is_zero() {
        (0, count)
    } else {
        ((start - U256::one()).low_u128(), count)
    }
}

/// A restartable slice of a range. Iterate it as many times as needed.
#[derive(Debug, Clone)]
pub struct AddressSlice<F: Family> {
    base: u128,
    offset: u128,
    len: U256,
    step: i128,
    family: PhantomData<F>,
}

impl<F: Family> AddressSlice<F> {
    pub fn len(&self) -> U256 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len.is_zero()
    }

    pub fn iter(&self) -> RangeIter<F> {
        RangeIter {
            base: self.base,
            offset: self.offset,
            remaining: self.len,
            step: self.step,
            family: PhantomData,
        }
    }
}

impl<F: Family> IntoIterator for AddressSlice<F> {
    type Item = Address<F>;
    type IntoIter = RangeIter<F>;

    fn into_iter(self) -> RangeIter<F> {
        self.iter()
    }
}

impl<F: Family> IntoIterator for &AddressSlice<F> {
    type Item = Address<F>;
    type IntoIter = RangeIter<F>;

    fn into_iter(self) -> RangeIter<F> {
        self.iter()
    }
}

/// Cursor over a range or slice.
#[derive(Debug, Clone)]
pub struct RangeIter<F: Family> {
    base: u128,
    offset: u128,
    remaining: U256,
    step: i128,
    family: PhantomData<F>,
}

impl<F: Family> Iterator for RangeIter<F> {
    type Item = Address<F>;

    fn next(&mut self) -> Option<Address<F>> {
        if self.remaining.is_zero() {
            return None;
        }
        let address = Address::host(self.base + self.offset);
        self.remaining = self.remaining - U256::one();
        if !self.remaining.is_zero() {
            let stride = self.step.unsigned_abs();
            self.offset = if self.step > 0 {
                self.offset + stride
            } else {
                self.offset - stride
            };
        }
        Some(address)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.remaining > U256::from(usize::MAX as u64) {
            (usize::MAX, None)
        } else {
            let remaining = self.remaining.low_u64() as usize;
            (remaining, Some(remaining))
        }
    }
}

/// A plain `first-last` range.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct IpRange<F: Family> {
    first: Address<F>,
    last: Address<F>,
}

impl<F: Family> IpRange<F> {
    /// Endpoints are taken as full-width addresses. `first > last` is an
    /// address error.
    pub fn new(first: Address<F>, last: Address<F>) -> Result<Self> {
        let first = Address::host(first.value());
        let last = Address::host(last.value());
        if first > last {
            return Err(ValidationError::ip(format!("{first}-{last}")));
        }
        Ok(IpRange { first, last })
    }

    /// Caller guarantees `first <= last`.
    pub(crate) fn from_values(first: u128, last: u128) -> Self {
        IpRange {
            first: Address::host(first),
            last: Address::host(last),
        }
    }
}

impl<F: Family> AddressRange<F> for IpRange<F> {
    fn first(&self) -> Address<F> {
        self.first
    }

    fn last(&self) -> Address<F> {
        self.last
    }
}

impl<F: Family> IntoIterator for &IpRange<F> {
    type Item = Address<F>;
    type IntoIter = RangeIter<F>;

    fn into_iter(self) -> RangeIter<F> {
        self.iter()
    }
}

impl<F: Family> PartialOrd for IpRange<F> {
    fn partial_cmp(&self, other: &IpRange<F>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Family> Ord for IpRange<F> {
    fn cmp(&self, other: &IpRange<F>) -> Ordering {
        self.cmp_range(other)
    }
}

impl<F: Family> fmt::Display for IpRange<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

impl<F: Family> fmt::Debug for IpRange<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IpRange({:?}, {:?})", self.first, self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::super::family::{V4, V6};
    use super::*;

    fn range4(first: &str, last: &str) -> IpRange<V4> {
        IpRange::new(first.parse().unwrap(), last.parse().unwrap()).unwrap()
    }

    fn values(slice: AddressSlice<V4>) -> Vec<String> {
        slice.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_new_range() {
        let range = range4("10.0.0.1/24", "10.0.0.5");
        assert_eq!(range.first().prefix_len(), 32);
        assert_eq!(range.to_string(), "10.0.0.1-10.0.0.5");
        assert_eq!(range.size(), U256::from(5));
        assert_eq!(
            IpRange::<V4>::new("10.0.0.5".parse().unwrap(), "10.0.0.1".parse().unwrap())
                .unwrap_err(),
            ValidationError::Ip("10.0.0.5-10.0.0.1".to_string())
        );
    }

    #[test]
    fn test_size_full_v6() {
        let range = IpRange::<V6>::from_values(0, u128::MAX);
        assert_eq!(range.size(), U256::one() << 128);
    }

    #[test]
    fn test_contains_and_overlaps() {
        let range = range4("10.0.0.10", "10.0.0.20");
        assert!(range.contains(&"10.0.0.10".parse().unwrap()));
        assert!(range.contains(&"10.0.0.20/8".parse().unwrap()));
        assert!(!range.contains(&"10.0.0.21".parse().unwrap()));

        assert!(range.overlaps(&range4("10.0.0.20", "10.0.0.30")));
        assert!(range.overlaps(&range4("10.0.0.0", "10.0.0.255")));
        assert!(range4("10.0.0.0", "10.0.0.255").overlaps(&range));
        assert!(!range.overlaps(&range4("10.0.0.21", "10.0.0.30")));
    }

    #[test]
    fn test_adjacent() {
        let range = range4("10.0.0.10", "10.0.0.20");
        assert!(range.is_adjacent(&range4("10.0.0.21", "10.0.0.30")));
        assert!(range.is_adjacent(&range4("10.0.0.0", "10.0.0.9")));
        assert!(!range.is_adjacent(&range4("10.0.0.22", "10.0.0.30")));
        assert!(!range.is_adjacent(&range4("10.0.0.20", "10.0.0.30")));

        let low = range4("0.0.0.0", "0.0.0.0");
        let high = range4("255.255.255.255", "255.255.255.255");
        assert!(!low.is_adjacent(&high));
        assert!(!high.is_adjacent(&low));
        assert!(low.is_adjacent(&range4("0.0.0.1", "0.0.0.1")));
    }

    #[test]
    fn test_subnet_supernet() {
        let inner = range4("10.0.0.10", "10.0.0.20");
        let outer = range4("10.0.0.0", "10.0.0.255");
        assert!(inner.is_subnet(&outer));
        assert!(!inner.is_supernet(&outer));
        assert!(outer.is_supernet(&inner));
        assert!(inner.is_subnet(&inner));
        assert!(inner.is_supernet(&inner));
    }

    #[test]
    fn test_get() {
        let range = range4("10.0.0.0", "10.0.0.9");
        assert_eq!(range.get(0).unwrap().to_string(), "10.0.0.0");
        assert_eq!(range.get(9).unwrap().to_string(), "10.0.0.9");
        assert_eq!(range.get(-1).unwrap().to_string(), "10.0.0.9");
        assert_eq!(range.get(-10).unwrap().to_string(), "10.0.0.0");
        assert_eq!(range.get(10), None);
        assert_eq!(range.get(-11), None);

        let full = IpRange::<V6>::from_values(0, u128::MAX);
        assert_eq!(full.get(-1).unwrap().value(), u128::MAX);
        assert_eq!(full.get(i128::MAX).unwrap().value(), i128::MAX as u128);
        assert_eq!(full.get(i128::MIN).unwrap().value(), 1_u128 << 127);
    }

    #[test]
    fn test_slice() {
        let range = range4("10.0.0.0", "10.0.0.9");
        assert_eq!(values(range.slice(Some(2), Some(5), 1)), ["10.0.0.2", "10.0.0.3", "10.0.0.4"]);
        assert_eq!(values(range.slice(None, None, 4)), ["10.0.0.0", "10.0.0.4", "10.0.0.8"]);
        assert_eq!(values(range.slice(Some(-2), None, 1)), ["10.0.0.8", "10.0.0.9"]);
        assert_eq!(values(range.slice(None, Some(-8), 1)), ["10.0.0.0", "10.0.0.1"]);
        assert_eq!(values(range.slice(Some(-100), Some(2), 1)), ["10.0.0.0", "10.0.0.1"]);
        assert_eq!(values(range.slice(Some(8), Some(100), 1)), ["10.0.0.8", "10.0.0.9"]);
        assert!(range.slice(Some(5), Some(2), 1).is_empty());
        assert!(range.slice(Some(100), None, 1).is_empty());
    }

    #[test]
    fn test_slice_backwards() {
        let range = range4("10.0.0.0", "10.0.0.4");
        assert_eq!(
            values(range.slice(None, None, -1)),
            ["10.0.0.4", "10.0.0.3", "10.0.0.2", "10.0.0.1", "10.0.0.0"]
        );
        assert_eq!(values(range.slice(Some(3), Some(0), -2)), ["10.0.0.3", "10.0.0.1"]);
        assert_eq!(values(range.slice(Some(100), Some(-100), -3)), ["10.0.0.4", "10.0.0.1"]);
        assert!(range.slice(Some(0), Some(3), -1).is_empty());
    }

    #[test]
    fn test_slice_is_restartable() {
        let range = range4("10.0.0.0", "10.0.0.255");
        let slice = range.slice(Some(10), Some(20), 3);
        assert_eq!(slice.len(), U256::from(4));
        let first_pass: Vec<_> = slice.iter().collect();
        let second_pass: Vec<_> = (&slice).into_iter().collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(slice.iter().size_hint(), (4, Some(4)));
    }

    #[test]
    fn test_slice_huge_v6() {
        let full = IpRange::<V6>::from_values(0, u128::MAX);
        let tail: Vec<_> = full.slice(Some(-2), None, 1).iter().map(|a| a.value()).collect();
        assert_eq!(tail, [u128::MAX - 1, u128::MAX]);
        let slice = full.slice(None, None, i128::MAX);
        assert_eq!(slice.len(), U256::from(3));
        let back: Vec<_> = full.slice(None, Some(-3), -1).iter().map(|a| a.value()).collect();
        assert_eq!(back, [u128::MAX, u128::MAX - 1]);
        assert_eq!(full.iter().size_hint(), (usize::MAX, None));
    }

    #[test]
    #[should_panic(expected = "slice step cannot be zero")]
    fn test_slice_zero_step() {
        range4("10.0.0.0", "10.0.0.4").slice(None, None, 0);
    }

    #[test]
    fn test_iter() {
        let range = range4("10.0.0.254", "10.0.1.1");
        let all: Vec<String> = (&range).into_iter().map(|a| a.to_string()).collect();
        assert_eq!(all, ["10.0.0.254", "10.0.0.255", "10.0.1.0", "10.0.1.1"]);
    }

    #[test]
    fn test_range_order() {
        let wide = range4("10.0.0.0", "10.0.0.255");
        let narrow = range4("10.0.0.0", "10.0.0.15");
        let later = range4("10.0.0.1", "10.0.0.2");
        let mut ranges = vec![later, narrow, wide];
        ranges.sort();
        assert_eq!(ranges, vec![wide, narrow, later]);
    }
}
