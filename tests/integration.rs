//! End-to-end collector tests: provisioning, writer loops, and snapshot
//! round trips through the filesystem.

use nemesis::config::CollectorConfig;
use nemesis::{host, supervisor, writer};
use std::time::Duration;
use tempfile::tempdir;

#[tokio::test]
async fn collector_publishes_both_snapshot_files() {
    let dir = tempdir().unwrap();
    let config = CollectorConfig {
        data_dir: dir.path().to_path_buf(),
        interface: "does-not-exist0".to_string(),
        sys_refresh_secs: 1,
        net_refresh_secs: 1,
        ..CollectorConfig::default()
    };

    let handles = supervisor::start(&config).unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;

    let ipv4 = dir.path().join("nemesis_data").join("json").join("ipv4");
    let ipv6 = dir.path().join("nemesis_data").join("json").join("ipv6");

    // Reserved IPv6 tree exists but stays unpopulated.
    assert!(ipv6.is_dir());
    assert_eq!(std::fs::read_dir(&ipv6).unwrap().count(), 0);

    let host_json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(ipv4.join("host.json")).unwrap()).unwrap();
    for field in ["os", "systime", "uptime", "boottime", "cpu_util", "ram_util", "swap_util"] {
        assert!(!host_json[field].is_null(), "host.json missing {}", field);
    }

    let net_json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(ipv4.join("net.json")).unwrap()).unwrap();
    for field in [
        "interface",
        "mac",
        "ipv4_addr",
        "ipv4_mask",
        "ipv4_cidr",
        "link",
        "protocol",
        "carrier",
        "wireless",
        "speed",
        "duplex",
    ] {
        assert!(!net_json[field].is_null(), "net.json missing {}", field);
    }
    assert_eq!(net_json["interface"], "does-not-exist0");
    assert_eq!(net_json["mac"], "None");
    assert_eq!(net_json["link"], "ADMIN_DOWN");
    assert_eq!(net_json["wireless"], "False");

    for handle in handles {
        handle.abort();
    }
}

#[tokio::test]
async fn written_host_snapshot_round_trips_exactly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("host.json");

    let snapshot = host::sample().await;
    let expected = serde_json::to_value(&snapshot).unwrap();

    writer::write_atomic(&path, &serde_json::to_vec(&snapshot).unwrap()).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed, expected);
}

#[test]
fn snapshot_formats_match_documented_layout() {
    let snapshot = nemesis::host::HostSnapshot {
        os: nemesis::host::OsKind::Linux,
        systime: chrono::Local::now(),
        uptime: Duration::from_secs(32_121),
        boottime: chrono::Local::now(),
        cpu_util: 3.7,
        ram_util: 21.6,
        swap_util: 0.0,
    };

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["uptime"], "0 days, 08:55:21");

    // boottime: "YYYY-mm-dd HH:MM:SS"
    let boottime = json["boottime"].as_str().unwrap();
    assert_eq!(boottime.len(), 19);
    assert_eq!(&boottime[4..5], "-");
    assert_eq!(&boottime[10..11], " ");

    // systime starts with the same date-time layout, then offset and zone.
    let systime = json["systime"].as_str().unwrap();
    assert!(systime.len() > 19);
    assert_eq!(&systime[4..5], "-");
}
