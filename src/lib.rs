//! IPv4/IPv6 address algebra.
//!
//! Parsing, formatting, arithmetic and set relations over addresses, masks
//! and address ranges. See [`models`] for the value types.

pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

pub use error::{Result, ValidationError};
pub use models::{
    Address, AddressRange, Glob, IpAddress, IpPrefix, IpRange, Ipv4, Ipv6, Mask, Mask4, Mask6,
    MaskFormat, Prefix, Prefix4, Prefix6, Version, V4, V6,
};
