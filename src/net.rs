//! Per-interface network sampling: address resolution plus link state.

use crate::link::{self, LinkState};
use serde::{Serialize, Serializer};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use sysinfo::Networks;

/// One snapshot of a single named interface.
///
/// Address fields degrade independently: a failed lookup leaves only its own
/// field empty, serialized as the literal `"None"` downstream consumers
/// expect.
#[derive(Debug, Clone, Serialize)]
pub struct NetSnapshot {
    pub interface: String,
    #[serde(serialize_with = "serialize_opt")]
    pub mac: Option<String>,
    #[serde(serialize_with = "serialize_opt")]
    pub ipv4_addr: Option<Ipv4Addr>,
    #[serde(serialize_with = "serialize_opt")]
    pub ipv4_mask: Option<Ipv4Addr>,
    #[serde(serialize_with = "serialize_opt")]
    pub ipv4_cidr: Option<u8>,
    #[serde(flatten)]
    pub link: LinkState,
}

fn serialize_opt<T: fmt::Display, S: Serializer>(
    value: &Option<T>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.collect_str(v),
        None => serializer.serialize_str("None"),
    }
}

/// Take one snapshot of `interface`.
///
/// The interface name is echoed back even when it does not exist; every
/// lookup then degrades to its sentinel while the link state classifies as
/// admin-down.
pub fn sample(interface: &str) -> NetSnapshot {
    let networks = Networks::new_with_refreshed_list();
    let data = networks.list().get(interface);

    let mac = data.map(|d| d.mac_address().to_string());
    let ipv4 = data.and_then(|d| {
        d.ip_networks().iter().find_map(|net| match net.addr {
            IpAddr::V4(addr) => Some((addr, net.prefix)),
            IpAddr::V6(_) => None,
        })
    });

    let signals = link::read_signals(interface);
    let link = link::infer(&signals);

    NetSnapshot {
        interface: interface.to_string(),
        mac,
        ipv4_addr: ipv4.map(|(addr, _)| addr),
        ipv4_mask: ipv4.map(|(_, prefix)| mask_from_prefix(prefix)),
        ipv4_cidr: ipv4.map(|(_, prefix)| prefix),
        link,
    }
}

/// Dotted-quad subnet mask for a prefix length, e.g. 24 -> 255.255.255.0.
fn mask_from_prefix(prefix: u8) -> Ipv4Addr {
    let bits = match prefix {
        0 => 0,
        1..=31 => u32::MAX << (32 - prefix as u32),
        _ => u32::MAX,
    };
    Ipv4Addr::from(bits)
}
