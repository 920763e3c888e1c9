//! Host resource sampling using sysinfo.

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};
use std::time::Duration;
use sysinfo::System;

/// Operating system family, in the vocabulary downstream consumers expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OsKind {
    Linux,
    Windows,
    MacOs,
    FreeBsd,
    OpenBsd,
    NetBsd,
    Bsd,
    SunOs,
    Unknown,
}

impl OsKind {
    /// Detect the running OS family.
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "linux" | "android" => OsKind::Linux,
            "windows" => OsKind::Windows,
            "macos" | "ios" => OsKind::MacOs,
            "freebsd" => OsKind::FreeBsd,
            "openbsd" => OsKind::OpenBsd,
            "netbsd" => OsKind::NetBsd,
            "dragonfly" => OsKind::Bsd,
            "solaris" | "illumos" => OsKind::SunOs,
            _ => OsKind::Unknown,
        }
    }
}

/// One host-wide resource snapshot.
///
/// Built fresh on every tick and discarded after serialization.
#[derive(Debug, Clone, Serialize)]
pub struct HostSnapshot {
    pub os: OsKind,
    #[serde(serialize_with = "serialize_systime")]
    pub systime: DateTime<Local>,
    #[serde(serialize_with = "serialize_uptime")]
    pub uptime: Duration,
    #[serde(serialize_with = "serialize_boottime")]
    pub boottime: DateTime<Local>,
    pub cpu_util: f64,
    pub ram_util: f64,
    pub swap_util: f64,
}

fn serialize_systime<S: Serializer>(
    time: &DateTime<Local>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format("%Y-%m-%d %H:%M:%S %z (%Z)"))
}

fn serialize_boottime<S: Serializer>(
    time: &DateTime<Local>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format("%Y-%m-%d %H:%M:%S"))
}

fn serialize_uptime<S: Serializer>(uptime: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_uptime(uptime))
}

/// Render an uptime as `D days, HH:MM:SS`.
fn format_uptime(uptime: &Duration) -> String {
    let total = uptime.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    format!("{} days, {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

/// Round a utilization percentage to one decimal place, clamped to [0, 100].
fn round_pct(value: f64) -> f64 {
    ((value * 10.0).round() / 10.0).clamp(0.0, 100.0)
}

/// Take one host resource snapshot.
///
/// Blocks for [`sysinfo::MINIMUM_CPU_UPDATE_INTERVAL`] between two CPU
/// refreshes; the utilization figure is the busy share over that window.
/// Stateless: every call re-measures from a fresh [`System`].
pub async fn sample() -> HostSnapshot {
    let mut system = System::new();

    system.refresh_cpu_usage();
    tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
    system.refresh_cpu_usage();
    let cpu_util = round_pct(system.global_cpu_usage() as f64);

    system.refresh_memory();
    let ram_util = round_pct(utilization(system.used_memory(), system.total_memory()));
    let swap_util = round_pct(utilization(system.used_swap(), system.total_swap()));

    let systime = Local::now();
    let uptime = Duration::from_secs(System::uptime());
    let boottime = DateTime::from_timestamp(System::boot_time() as i64, 0)
        .map(|t| t.with_timezone(&Local))
        .unwrap_or_else(|| systime - chrono::Duration::seconds(uptime.as_secs() as i64));

    HostSnapshot {
        os: OsKind::detect(),
        systime,
        uptime,
        boottime,
        cpu_util,
        ram_util,
        swap_util,
    }
}

fn utilization(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (used as f64 / total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(&Duration::from_secs(0)), "0 days, 00:00:00");
        assert_eq!(format_uptime(&Duration::from_secs(24_993)), "0 days, 06:56:33");
        assert_eq!(
            format_uptime(&Duration::from_secs(2 * 86_400 + 3_661)),
            "2 days, 01:01:01"
        );
    }

    #[test]
    fn test_round_pct() {
        assert_eq!(round_pct(22.84), 22.8);
        assert_eq!(round_pct(22.86), 22.9);
        assert_eq!(round_pct(-0.3), 0.0);
        assert_eq!(round_pct(100.2), 100.0);
    }

    #[test]
    fn test_utilization_zero_total() {
        // Machines without swap must report 0, not NaN.
        assert_eq!(utilization(0, 0), 0.0);
        assert_eq!(utilization(500, 1000), 50.0);
    }

    #[tokio::test]
    async fn test_consecutive_samples_are_valid() {
        let first = sample().await;
        tokio::time::sleep(Duration::from_secs(1)).await;
        let second = sample().await;

        for snapshot in [&first, &second] {
            assert!((0.0..=100.0).contains(&snapshot.cpu_util));
            assert!((0.0..=100.0).contains(&snapshot.ram_util));
            assert!((0.0..=100.0).contains(&snapshot.swap_util));
            assert!(snapshot.boottime <= snapshot.systime);
        }
    }

    #[test]
    fn test_snapshot_field_names() {
        let snapshot = HostSnapshot {
            os: OsKind::Linux,
            systime: Local::now(),
            uptime: Duration::from_secs(3_600),
            boottime: Local::now(),
            cpu_util: 3.7,
            ram_util: 21.6,
            swap_util: 0.0,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["os"], "LINUX");
        assert_eq!(json["uptime"], "0 days, 01:00:00");
        assert_eq!(json["cpu_util"], 3.7);
        assert_eq!(json["ram_util"], 21.6);
        assert_eq!(json["swap_util"], 0.0);
        assert!(json["systime"].is_string());
        assert!(json["boottime"].is_string());
    }
}
