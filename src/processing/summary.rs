//! Per-input summary rows.
//!
//! An input is tried as an address or CIDR network of either version first,
//! then as an IPv4 glob.

use crate::error::{Result, ValidationError};
use crate::models::{Address, AddressRange, Family, Glob, IpAddress, Mask, MaskFormat, Version};
use itertools::Itertools;
use serde::Serialize;

/// Subnet lists longer than this are cut short.
pub const SUBNET_LIST_LIMIT: usize = 256;

/// Everything reported about one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    /// The text as given.
    pub input: String,
    /// `address`, `network` or `glob`.
    pub kind: String,
    pub version: String,
    /// `first/len` for addresses and networks, `first-last` for globs.
    pub range: String,
    pub first: String,
    pub last: String,
    /// Address count, decimal.
    pub size: String,
    pub netmask: String,
    pub hostmask: String,
    pub broadcast: String,
    pub reverse_dns: String,
    /// Reserved blocks the first address falls in.
    pub flags: Vec<String>,
    pub subnets: Vec<String>,
}

/// Build the row for one input.
pub fn summarize(input: &str, subnet_diff: Option<u8>) -> Result<SummaryRow> {
    let input = input.trim();
    match IpAddress::parse(input) {
        Ok(IpAddress::V4(address)) => Ok(address_row(input, address, subnet_diff)),
        Ok(IpAddress::V6(address)) => Ok(address_row(input, address, subnet_diff)),
        Err(err) => match Glob::parse(input) {
            Ok(glob) => Ok(glob_row(input, &glob)),
            Err(_) => {
                log::warn!("{input:?} is neither an address nor a glob");
                Err(err)
            }
        },
    }
}

/// Summarize every input, keeping input order. Rejected inputs are returned
/// separately.
pub fn summarize_all(
    inputs: &[String],
    subnet_diff: Option<u8>,
) -> (Vec<SummaryRow>, Vec<ValidationError>) {
    let (rows, errors): (Vec<_>, Vec<_>) = inputs
        .iter()
        .map(|input| summarize(input, subnet_diff))
        .partition_result();
    log::info!("# Summarized {} inputs, {} rejected", rows.len(), errors.len());
    (rows, errors)
}

fn address_row<F: Family>(input: &str, address: Address<F>, subnet_diff: Option<u8>) -> SummaryRow {
    let network = address.network();
    let kind = if address.prefix_len() == F::WIDTH {
        "address"
    } else {
        "network"
    };
    let subnets = match subnet_diff {
        Some(diff) => {
            let subnets: Vec<String> = address
                .subnets(diff)
                .take(SUBNET_LIST_LIMIT + 1)
                .map(|subnet| subnet.to_string())
                .collect();
            if subnets.len() > SUBNET_LIST_LIMIT {
                log::warn!("{input}: subnet list cut to {SUBNET_LIST_LIMIT} entries");
            }
            subnets.into_iter().take(SUBNET_LIST_LIMIT).collect()
        }
        None => Vec::new(),
    };
    SummaryRow {
        input: input.to_string(),
        kind: kind.to_string(),
        version: F::VERSION.to_string(),
        range: network.to_string(),
        first: network.first().to_string(),
        last: network.last().to_string(),
        size: network.size().to_string(),
        netmask: mask_text(address.netmask()),
        hostmask: mask_text(address.hostmask()),
        broadcast: address.broadcast().to_string(),
        reverse_dns: address.reverse_dns(),
        flags: flags(&address),
        subnets,
    }
}

fn glob_row(input: &str, glob: &Glob) -> SummaryRow {
    let first = glob.first();
    SummaryRow {
        input: input.to_string(),
        kind: "glob".to_string(),
        version: Version::V4.to_string(),
        range: glob.to_string(),
        first: first.to_string(),
        last: glob.last().to_string(),
        size: glob.size().to_string(),
        netmask: String::new(),
        hostmask: String::new(),
        broadcast: glob.last().to_string(),
        reverse_dns: first.reverse_dns(),
        flags: flags(&first),
        subnets: Vec::new(),
    }
}

/// Dotted quad for IPv4, hex for IPv6.
fn mask_text<F: Family>(mask: Mask<F>) -> String {
    let format = match F::VERSION {
        Version::V4 => MaskFormat::DottedQuad,
        Version::V6 => MaskFormat::Hex,
    };
    mask.format_as(format).unwrap_or_else(|_| mask.to_hex())
}

fn flags<F: Family>(address: &Address<F>) -> Vec<String> {
    [
        ("private", address.is_private()),
        ("multicast", address.is_multicast()),
        ("loopback", address.is_loopback()),
        ("link-local", address.is_link_local()),
        ("unspecified", address.is_unspecified()),
    ]
    .into_iter()
    .filter(|(_, set)| *set)
    .map(|(name, _)| name.to_string())
    .collect()
}
