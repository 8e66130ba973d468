use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::constants::ONE_WEEK_SECS;

/// A compiled-in seed node: IPv6 (or IPv4-mapped) address and port
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedSpec6 {
    pub addr: [u8; 16],
    pub port: u16,
}

impl SeedSpec6 {
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = Ipv6Addr::from(self.addr);
        let ip = match ip.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(ip),
        };
        SocketAddr::new(ip, self.port)
    }
}

/// A bootstrap candidate with the time it was last seen, unix seconds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SeedAddress {
    pub addr: SocketAddr,
    pub last_seen: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    pub name: &'static str,
    pub host: &'static str,
}

impl DnsSeed {
    pub const fn new(name: &'static str, host: &'static str) -> Self {
        Self { name, host }
    }
}

/// Fixed seed nodes for main. No nodes are published.
pub const MAIN_FIXED_SEEDS: &[SeedSpec6] = &[];

/// Fixed seed nodes for testnet. No nodes are published.
pub const TESTNET_FIXED_SEEDS: &[SeedSpec6] = &[];

/// Gives each fixed seed a last-seen time between one and two weeks before `now`.
///
/// Seeds then look old enough that peers prefer the fresher addresses learned
/// after connecting, but not so old that they are pruned as stale.
pub fn expand<R: Rng>(fixed: &[SeedSpec6], now: i64, rng: &mut R) -> Vec<SeedAddress> {
    fixed
        .iter()
        .map(|seed| SeedAddress { addr: seed.socket_addr(), last_seen: now - rng.gen_range(0..ONE_WEEK_SECS) - ONE_WEEK_SECS })
        .collect()
}

/// [`expand`] against the wall clock with a freshly seeded generator.
pub fn expand_now(fixed: &[SeedSpec6]) -> Vec<SeedAddress> {
    expand(fixed, unix_now(), &mut StdRng::from_entropy())
}

pub fn unix_now() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn v4_seed(a: u8, b: u8, c: u8, d: u8, port: u16) -> SeedSpec6 {
        let mut addr = [0u8; 16];
        addr[10] = 0xff;
        addr[11] = 0xff;
        addr[12..].copy_from_slice(&[a, b, c, d]);
        SeedSpec6 { addr, port }
    }

    fn fixed_list() -> Vec<SeedSpec6> {
        let mut v6 = [0u8; 16];
        v6[0] = 0x20;
        v6[1] = 0x01;
        v6[15] = 0x01;
        vec![v4_seed(10, 0, 0, 1, 12020), v4_seed(192, 168, 1, 20, 12020), SeedSpec6 { addr: v6, port: 12120 }]
    }

    #[test]
    fn mapped_addresses_become_ipv4() {
        let seeds = fixed_list();
        assert_eq!(seeds[0].socket_addr(), SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), 12020));
        assert!(seeds[2].socket_addr().is_ipv6());
        assert_eq!(seeds[2].socket_addr().port(), 12120);
    }

    #[test]
    fn expand_keeps_every_address_in_the_window() {
        let fixed = fixed_list();
        let now = 1_700_000_000;
        let mut rng = StdRng::seed_from_u64(7);
        let expanded = expand(&fixed, now, &mut rng);

        assert_eq!(expanded.len(), fixed.len());
        for (seed, spec) in expanded.iter().zip(&fixed) {
            assert_eq!(seed.addr, spec.socket_addr());
            assert!(seed.last_seen <= now - ONE_WEEK_SECS);
            assert!(seed.last_seen > now - 2 * ONE_WEEK_SECS);
        }
    }

    #[test]
    fn expand_redraws_timestamps_on_each_call() {
        let fixed: Vec<SeedSpec6> = (0..32).map(|i| v4_seed(10, 0, 1, i, 12020)).collect();
        let now = 1_700_000_000;
        let first = expand(&fixed, now, &mut StdRng::seed_from_u64(1));
        let second = expand(&fixed, now, &mut StdRng::seed_from_u64(2));

        let addrs = |seeds: &[SeedAddress]| seeds.iter().map(|s| s.addr).collect::<Vec<_>>();
        assert_eq!(addrs(&first), addrs(&second));
        assert_ne!(
            first.iter().map(|s| s.last_seen).collect::<Vec<_>>(),
            second.iter().map(|s| s.last_seen).collect::<Vec<_>>()
        );
    }

    #[test]
    fn expand_now_uses_the_clock() {
        let before = unix_now();
        let expanded = expand_now(&fixed_list());
        let after = unix_now();
        assert_eq!(expanded.len(), 3);
        for seed in expanded {
            assert!(seed.last_seen <= after - ONE_WEEK_SECS);
            assert!(seed.last_seen > before - 2 * ONE_WEEK_SECS);
        }
    }

    #[test]
    fn empty_list_expands_to_nothing() {
        assert!(expand_now(MAIN_FIXED_SEEDS).is_empty());
        assert!(expand_now(TESTNET_FIXED_SEEDS).is_empty());
    }
}
