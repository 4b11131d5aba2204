//! Property tests for the address algebra.

use primitive_types::U256;
use proptest::prelude::*;
use std::net::{Ipv4Addr, Ipv6Addr};
use subnet_algebra::{AddressRange, IpRange, Ipv4, Ipv6, Mask4, Mask6, Prefix4};

proptest! {
    #[test]
    fn ipv4_text_round_trip(value in any::<u32>(), prefix_len in 0u8..=32) {
        let text = format!("{}/{}", Ipv4Addr::from(value), prefix_len);
        let ip = Ipv4::parse(&text).unwrap();
        prop_assert_eq!(ip.format(true), text);
        prop_assert_eq!(Ipv4::parse(&ip.to_string()).unwrap(), ip);
    }

    #[test]
    fn ipv6_text_matches_std(value in any::<u128>()) {
        let ip = Ipv6::new(value).unwrap();
        let std_text = Ipv6Addr::from(value).to_string();
        prop_assert_eq!(Ipv6::parse(&std_text).unwrap(), ip);
        prop_assert_eq!(Ipv6::parse(&ip.to_string()).unwrap(), ip);
        // std renders the deprecated ::a.b.c.d block in hex.
        if value >> 32 != 0 {
            prop_assert_eq!(ip.to_string(), std_text);
        }
    }

    #[test]
    fn ipv6_text_is_canonical(groups in any::<[u16; 8]>()) {
        let value = groups.iter().fold(0u128, |acc, group| (acc << 16) | u128::from(*group));
        prop_assume!(value >> 32 != 0);
        let padded = groups.iter().map(|group| format!("{group:04X}")).collect::<Vec<_>>().join(":");
        let canonical = Ipv6::parse(&padded).unwrap().to_string();
        prop_assert_eq!(&canonical, &Ipv6Addr::from(value).to_string());
        prop_assert_eq!(Ipv6::parse(&canonical).unwrap().to_string(), canonical);
    }

    #[test]
    fn mask_prefix_len_round_trip(prefix_len in 0u8..=128) {
        let v6 = Mask6::prefix_len_to_mask(prefix_len).unwrap();
        prop_assert_eq!(Mask6::mask_to_prefix_len(v6).unwrap(), prefix_len);
        if prefix_len <= 32 {
            let v4 = Mask4::prefix_len_to_mask(prefix_len).unwrap();
            prop_assert_eq!(Mask4::mask_to_prefix_len(v4).unwrap(), prefix_len);
        }
    }

    #[test]
    fn prefix_contains_its_addresses(value in any::<u32>(), prefix_len in 0u8..=32, probe in any::<u32>()) {
        let net = Prefix4::new(Ipv4::with_prefix_len(u128::from(value), prefix_len).unwrap());
        let probe = Ipv4::new(u128::from(probe)).unwrap();
        let inside = net.first() <= probe && probe <= net.last();
        prop_assert_eq!(net.contains(&probe), inside);
        prop_assert!(net.contains(&net.first()));
        prop_assert!(net.contains(&net.last()));
    }

    #[test]
    fn adjacency_is_symmetric(a in any::<u32>(), b in any::<u32>(), c in any::<u32>(), d in any::<u32>()) {
        let range = |x: u32, y: u32| {
            IpRange::new(
                Ipv4::new(u128::from(x.min(y))).unwrap(),
                Ipv4::new(u128::from(x.max(y))).unwrap(),
            )
            .unwrap()
        };
        let left = range(a, b);
        let right = range(c, d);
        prop_assert_eq!(left.is_adjacent(&right), right.is_adjacent(&left));
        let touching = range(b.max(a).saturating_add(1), d);
        prop_assert_eq!(left.is_adjacent(&touching), touching.is_adjacent(&left));
    }

    #[test]
    fn subnets_partition_the_network(value in any::<u128>(), prefix_len in 0u8..=128, diff in 0u8..=6) {
        prop_assume!(prefix_len + diff <= 128);
        let ip = Ipv6::with_prefix_len(value, prefix_len).unwrap();
        let subnets = ip.subnet(diff);
        prop_assert_eq!(subnets.len(), 1usize << diff);
        let total = subnets
            .iter()
            .fold(U256::zero(), |sum, subnet| sum + subnet.network().size());
        prop_assert_eq!(total, ip.network().size());
    }
}
