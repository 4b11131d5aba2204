//! IPv4 wildcard and dash ranges such as `10.1.*`, `1.2.3.4-10` or `1.2-5`.

use super::address::Address;
use super::family::V4;
use super::range::{AddressRange, IpRange, RangeIter};
use crate::error::{Result, ValidationError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An IPv4 range written in glob syntax.
///
/// Up to four dot-separated parts, missing trailing parts count as `*`.
/// Each part is an octet, `*`, or `a-b`; once `*` or a dash part appears,
/// only `*` may follow.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Glob {
    range: IpRange<V4>,
}

impl Glob {
    pub fn parse(text: &str) -> Result<Self> {
        let mut parts: Vec<&str> = text.split('.').collect();
        if parts.len() > 4 {
            return Err(ValidationError::ip(text));
        }
        if parts.last() == Some(&"") {
            if let Some(last) = parts.last_mut() {
                *last = "*";
            }
        }
        if parts.contains(&"") {
            return Err(ValidationError::ip(text));
        }
        parts.resize(4, "*");

        let octet = |part: &str| -> Result<u128> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ValidationError::ip(text));
            }
            part.parse::<u8>()
                .map(u128::from)
                .map_err(|_| ValidationError::ip(text))
        };

        let mut first: u128 = 0;
        let mut last: u128 = 0;
        let mut stars_only = false;
        for part in parts {
            let (low, high) = if part == "*" {
                stars_only = true;
                (0, 255)
            } else if stars_only {
                return Err(ValidationError::ip(text));
            } else if let Some((low, high)) = part.split_once('-') {
                stars_only = true;
                (octet(low)?, octet(high)?)
            } else {
                let value = octet(part)?;
                (value, value)
            };
            first = (first << 8) | low;
            last = (last << 8) | high;
        }

        if first > last {
            return Err(ValidationError::ip(text));
        }
        Ok(Glob {
            range: IpRange::from_values(first, last),
        })
    }

    pub fn as_range(&self) -> &IpRange<V4> {
        &self.range
    }
}

impl AddressRange<V4> for Glob {
    fn first(&self) -> Address<V4> {
        self.range.first()
    }

    fn last(&self) -> Address<V4> {
        self.range.last()
    }
}

impl IntoIterator for &Glob {
    type Item = Address<V4>;
    type IntoIter = RangeIter<V4>;

    fn into_iter(self) -> RangeIter<V4> {
        self.iter()
    }
}

impl FromStr for Glob {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        Glob::parse(s)
    }
}

impl PartialOrd for Glob {
    fn partial_cmp(&self, other: &Glob) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Glob {
    fn cmp(&self, other: &Glob) -> Ordering {
        self.cmp_range(other)
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.range, f)
    }
}

impl fmt::Debug for Glob {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Glob({:?})", self.range.to_string())
    }
}
