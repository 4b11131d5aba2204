//! Address algebra value types.
//!
//! Every type here is immutable once built:
//! - [`Address`] - an address plus prefix length ([`Ipv4`], [`Ipv6`])
//! - [`Mask`] - a netmask or hostmask ([`Mask4`], [`Mask6`])
//! - [`IpRange`], [`Prefix`] and [`Glob`] - contiguous ranges sharing [`AddressRange`]
//! - [`IpAddress`] and [`IpPrefix`] - wrappers that pick the version from the text

mod address;
mod family;
mod glob;
mod ip;
mod mask;
mod parse;
mod prefix;
mod range;

// Re-export public types
pub use address::{Address, IntoNetmask, Subnets};
pub use family::{Family, Version, V4, V6};
pub use glob::Glob;
pub use ip::{htop, is_cidr, is_ip, is_ipv4, is_ipv6, ptoh, IpAddress, IpPrefix};
pub use mask::{Mask, MaskFormat};
pub use prefix::Prefix;
pub use range::{AddressRange, AddressSlice, IpRange, RangeIter};

pub type Ipv4 = Address<V4>;
pub type Ipv6 = Address<V6>;
pub type Mask4 = Mask<V4>;
pub type Mask6 = Mask<V6>;
pub type Prefix4 = Prefix<V4>;
pub type Prefix6 = Prefix<V6>;
