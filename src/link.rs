//! Network link-state inference.
//!
//! Raw per-interface signals from `/sys/class/net` are folded into a
//! normalized link/protocol/carrier record. The kernel exposes the signals
//! in a non-obvious way (reading `carrier` fails with EINVAL while the
//! interface is administratively down), so classification happens in a fixed
//! decision table rather than from any single attribute:
//!
//! | Cable        | admin state | operstate | carrier     |
//! |--------------|-------------|-----------|-------------|
//! | disconnected | DOWN        | down      | unreadable  |
//! | disconnected | UP          | down      | 0           |
//! | connected    | DOWN        | down      | unreadable  |
//! | connected    | UP          | up        | 1           |

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// Default sysfs root for network interfaces.
const SYS_CLASS_NET: &str = "/sys/class/net";

/// Raw low-level signals for one interface, gathered in a single pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLinkSignals {
    /// Whether the `carrier` attribute could be read at all.
    pub carrier_readable: bool,
    /// First line of `operstate`, if readable.
    pub oper_state: Option<String>,
    /// Whether the interface exposes a `wireless` attribute directory.
    pub wireless: bool,
    /// First line of `speed`, if readable.
    pub raw_speed: Option<String>,
    /// First line of `duplex`, if readable.
    pub raw_duplex: Option<String>,
}

/// Overall link status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkStatus {
    Up,
    Down,
    AdminDown,
    Unknown,
}

/// Administrative (protocol) status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProtocolStatus {
    Up,
    Down,
    Unknown,
}

/// Physical-layer carrier status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarrierStatus {
    Up,
    Down,
    AdminDown,
    Unknown,
}

/// Negotiated link speed in Mbps, as reported by the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Speed {
    /// Raw rate string, e.g. "100" or "1000".
    Rate(String),
    /// Attribute absent or no negotiated speed.
    Unknown,
    /// Not applicable (wireless interfaces).
    NotApplicable,
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speed::Rate(rate) => f.write_str(rate),
            Speed::Unknown => f.write_str("unknown"),
            Speed::NotApplicable => f.write_str("none"),
        }
    }
}

impl Serialize for Speed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Duplex mode, as reported by the kernel ("half" or "full").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Duplex {
    /// Raw mode string.
    Mode(String),
    /// Attribute absent or unreadable.
    Unknown,
    /// Not applicable (wireless interfaces).
    NotApplicable,
}

impl fmt::Display for Duplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Duplex::Mode(mode) => f.write_str(mode),
            Duplex::Unknown => f.write_str("unknown"),
            Duplex::NotApplicable => f.write_str("none"),
        }
    }
}

impl Serialize for Duplex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Normalized link state for one interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkState {
    pub link: LinkStatus,
    pub protocol: ProtocolStatus,
    pub carrier: CarrierStatus,
    #[serde(serialize_with = "serialize_python_bool")]
    pub wireless: bool,
    pub speed: Speed,
    pub duplex: Duplex,
}

/// Downstream consumers of the snapshot files expect the original
/// "True"/"False" literals, not JSON booleans.
fn serialize_python_bool<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "True" } else { "False" })
}

/// Classify raw interface signals into a normalized [`LinkState`].
///
/// Pure and deterministic; all I/O happens in [`read_signals`].
pub fn infer(signals: &RawLinkSignals) -> LinkState {
    // An unreadable carrier attribute means the interface is administratively
    // down, not that the read failed.
    let protocol = if signals.carrier_readable {
        ProtocolStatus::Up
    } else {
        ProtocolStatus::Down
    };

    let oper_state = signals.oper_state.as_deref();
    let carrier = match (protocol, oper_state) {
        (_, Some("up")) => CarrierStatus::Up,
        (ProtocolStatus::Up, Some("down")) => CarrierStatus::Down,
        // Carrier cannot be determined while the interface is admin-down.
        (ProtocolStatus::Down, _) => CarrierStatus::AdminDown,
        // Missing or garbled operstate with the interface enabled.
        _ => CarrierStatus::Unknown,
    };

    let link = match (protocol, carrier) {
        (ProtocolStatus::Up, CarrierStatus::Up) => LinkStatus::Up,
        (ProtocolStatus::Down, _) => LinkStatus::AdminDown,
        (ProtocolStatus::Up, CarrierStatus::Down) => LinkStatus::Down,
        _ => LinkStatus::Unknown,
    };

    let speed = if signals.wireless {
        Speed::NotApplicable
    } else if protocol == ProtocolStatus::Down {
        // Admin-down interfaces have no readable speed attribute.
        Speed::Unknown
    } else {
        match signals.raw_speed.as_deref() {
            // "-1" is the kernel's sentinel for "no negotiated speed".
            None | Some("-1") => Speed::Unknown,
            Some(rate) => Speed::Rate(rate.to_string()),
        }
    };

    let duplex = if signals.wireless {
        Duplex::NotApplicable
    } else if protocol == ProtocolStatus::Down {
        Duplex::Unknown
    } else {
        match &signals.raw_duplex {
            None => Duplex::Unknown,
            Some(mode) => Duplex::Mode(mode.clone()),
        }
    };

    LinkState {
        link,
        protocol,
        carrier,
        wireless: signals.wireless,
        speed,
        duplex,
    }
}

/// Gather raw signals for `interface` from the live sysfs tree.
pub fn read_signals(interface: &str) -> RawLinkSignals {
    read_signals_from(Path::new(SYS_CLASS_NET), interface)
}

/// Gather raw signals for `interface` under an explicit sysfs root.
pub fn read_signals_from(root: &Path, interface: &str) -> RawLinkSignals {
    let iface_dir = root.join(interface);

    RawLinkSignals {
        carrier_readable: std::fs::read_to_string(iface_dir.join("carrier")).is_ok(),
        oper_state: read_first_line(&iface_dir.join("operstate")),
        wireless: iface_dir.join("wireless").exists(),
        raw_speed: read_first_line(&iface_dir.join("speed")),
        raw_duplex: read_first_line(&iface_dir.join("duplex")),
    }
}

fn read_first_line(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    Some(content.lines().next().unwrap_or("").to_string())
}
