use hspdelta_core::snapshot::{CanonicalSnapshot, ComparableValue, RawSnapshot, Record};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// A realistic raw profile body as returned by the profile service.
#[allow(dead_code)]
pub fn raw_profile_json(captured_date: &str) -> Value {
    json!({
        "id": "1b8c5f6e-0f1d-4e3b-9a53-7d3f0a2f9c11",
        "captured_date": captured_date,
        "last_boot_time": "2020-03-29T08:12:44+00:00",
        "arch": "x86_64",
        "os_release": "8.1",
        "running_processes": ["kworker/0:1", "sshd", "kworker/u8:3", "systemd", "sshd"],
        "installed_products": [
            {"id": "479", "name": "Red Hat Enterprise Linux for x86_64", "status": "Subscribed"},
            {"id": "69", "name": "Red Hat Enterprise Linux Server"}
        ],
        "kernel_modules": ["nf_tables", "xfs", "nf_tables"],
        "installed_services": ["sshd.service", "chronyd.service"],
        "enabled_services": ["sshd.service"],
        "dnf_modules": [
            {"name": "python36", "stream": "3.6"},
            {"name": "perl", "stream": "5.26"}
        ],
        "yum_repos": [
            {"id": "rhel-8-baseos", "name": "BaseOS", "base_url": "https://cdn.example.com/baseos", "enabled": true, "gpgcheck": true}
        ],
        "network_interfaces": [
            {
                "name": "eth0",
                "type": "ether",
                "state": "UP",
                "mac_address": "52:54:00:12:34:56",
                "mtu": 1500,
                "ipv4_addresses": ["192.168.122.10"],
                "ipv6_addresses": ["fe80::5054:ff:fe12:3456"]
            },
            {
                "name": "lo",
                "type": "loopback",
                "state": "UNKNOWN",
                "mac_address": "00:00:00:00:00:00",
                "mtu": 65536,
                "ipv4_addresses": ["127.0.0.1"],
                "ipv6_addresses": ["::1"]
            }
        ],
        "installed_packages": [
            "7:bash-4.4.20-1.el8.x86_64",
            "openssh-server-8.0p1-4.el8_1.x86_64",
            "tzdata-2019c-1.el8.noarch"
        ]
    })
}

#[allow(dead_code)]
pub fn raw_profile(captured_date: &str) -> RawSnapshot {
    RawSnapshot::try_from(raw_profile_json(captured_date)).unwrap()
}

/// Minimal canonical snapshot with a kernel module set.
#[allow(dead_code)]
pub fn with_kernel_modules(captured_date: &str, modules: &[&str]) -> CanonicalSnapshot {
    CanonicalSnapshot::new(captured_date).with_field(
        "kernel_modules",
        ComparableValue::string_set(modules.iter().copied()),
    )
}

/// Canonical snapshot with a single `eth0` interface record.
#[allow(dead_code)]
pub fn with_eth0(captured_date: &str, mtu: u64, mac: &str) -> CanonicalSnapshot {
    let mut attrs = BTreeMap::new();
    attrs.insert("ipv4_addresses".to_string(), json!(["10.0.0.5"]));
    attrs.insert("ipv6_addresses".to_string(), json!([]));
    attrs.insert("mac_address".to_string(), json!(mac));
    attrs.insert("mtu".to_string(), json!(mtu));
    attrs.insert("state".to_string(), json!("UP"));
    attrs.insert("type".to_string(), json!("ether"));
    let mut records = BTreeMap::new();
    records.insert("eth0".to_string(), Record::Attributes(attrs));
    CanonicalSnapshot::new(captured_date)
        .with_field("network_interfaces", ComparableValue::RecordMap(records))
}
