//! Snapshot normalization.
//!
//! These rules decide what counts as a change between two snapshots:
//!
//! - `id` and `last_boot_time` are dropped.
//! - `running_processes` loses every `kworker*` entry.
//! - `installed_products` is reduced to product ids.
//! - `kernel_modules`, `installed_services`, `enabled_services` become sets.
//! - `dnf_modules` and `yum_repos` become one synthesized label per entry.
//! - `network_interfaces` is keyed by interface name.
//! - `installed_packages` becomes package name → VRA.
//! - Everything else passes through as an opaque scalar.
//!
//! A collection field that is absent or `null` is left out of the canonical
//! form; the differ treats it as empty.

use crate::errors::{HspError, Result};
use crate::snapshot::canonical::{CanonicalSnapshot, ComparableValue, Record};
use crate::snapshot::fields::*;
use crate::snapshot::package::parse_package;
use crate::snapshot::raw::{json_kind, RawSnapshot};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Kernel worker threads come and go constantly.
const KWORKER_PREFIX: &str = "kworker";

/// Interface attributes carried into the canonical record.
const INTERFACE_ATTRIBUTES: &[&str] = &[
    "ipv4_addresses",
    "ipv6_addresses",
    "mac_address",
    "mtu",
    "state",
    "type",
];

/// Normalize one raw snapshot.
///
/// Pure function of its input: the same raw snapshot always yields an equal
/// canonical snapshot.
///
/// # Errors
///
/// - `MalformedSnapshot`: `captured_date` missing or not a string, or a
///   collection field with the wrong shape or a missing required sub-field
/// - `UnparsableVersion`: an installed package descriptor cannot be parsed
pub fn normalize(raw: &RawSnapshot) -> Result<CanonicalSnapshot> {
    let captured_date = match raw.get(CAPTURED_DATE) {
        Some(Value::String(ts)) => ts.clone(),
        Some(other) => {
            return Err(HspError::malformed(
                CAPTURED_DATE,
                format!("expected a string, got {}", json_kind(other)),
            ))
        }
        None => return Err(HspError::malformed(CAPTURED_DATE, "field is absent")),
    };

    let mut canonical = CanonicalSnapshot::new(captured_date);

    for (name, value) in raw.fields() {
        if name == CAPTURED_DATE || DROPPED.contains(&name) {
            continue;
        }
        if let Some(comparable) = normalize_field(name, value)? {
            canonical.insert(name, comparable);
        }
    }

    Ok(canonical)
}

fn normalize_field(name: &str, value: &Value) -> Result<Option<ComparableValue>> {
    let is_collection = matches!(
        name,
        RUNNING_PROCESSES
            | INSTALLED_PRODUCTS
            | KERNEL_MODULES
            | INSTALLED_SERVICES
            | ENABLED_SERVICES
            | DNF_MODULES
            | YUM_REPOS
            | NETWORK_INTERFACES
            | INSTALLED_PACKAGES
    );
    if is_collection && value.is_null() {
        return Ok(None);
    }

    let comparable = match name {
        RUNNING_PROCESSES => ComparableValue::string_set(
            string_list(name, value)?
                .into_iter()
                .filter(|p| !p.starts_with(KWORKER_PREFIX)),
        ),
        INSTALLED_PRODUCTS => {
            let ids = object_list(name, value)?
                .into_iter()
                .map(|product| required_str(name, product, "id"))
                .collect::<Result<Vec<_>>>()?;
            ComparableValue::string_set(ids)
        }
        KERNEL_MODULES | INSTALLED_SERVICES | ENABLED_SERVICES => {
            ComparableValue::string_set(string_list(name, value)?)
        }
        DNF_MODULES => {
            let labels = object_list(name, value)?
                .into_iter()
                .map(|module| dnf_module_label(name, module))
                .collect::<Result<Vec<_>>>()?;
            ComparableValue::label_set(labels)
        }
        YUM_REPOS => {
            let labels = object_list(name, value)?
                .into_iter()
                .map(|repo| yum_repo_label(name, repo))
                .collect::<Result<Vec<_>>>()?;
            ComparableValue::label_set(labels)
        }
        NETWORK_INTERFACES => ComparableValue::RecordMap(interface_records(name, value)?),
        INSTALLED_PACKAGES => ComparableValue::RecordMap(package_records(name, value)?),
        _ => ComparableValue::Scalar(value.clone()),
    };

    Ok(Some(comparable))
}

/// `"<name> <stream>"`
fn dnf_module_label(field: &str, module: &Map<String, Value>) -> Result<String> {
    let name = required_str(field, module, "name")?;
    let stream = required_str(field, module, "stream")?;
    Ok(format!("{name} {stream}"))
}

/// `"<name> [<base_url>] enabled: <bool> gpgcheck: <bool>"`, fixed order.
fn yum_repo_label(field: &str, repo: &Map<String, Value>) -> Result<String> {
    let name = required_str(field, repo, "name")?;
    Ok(format!(
        "{name} [{}] enabled: {} gpgcheck: {}",
        label_part(repo.get("base_url")),
        label_part(repo.get("enabled")),
        label_part(repo.get("gpgcheck")),
    ))
}

fn label_part(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "unknown".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn interface_records(field: &str, value: &Value) -> Result<BTreeMap<String, Record>> {
    let mut records = BTreeMap::new();
    for iface in object_list(field, value)? {
        let name = required_str(field, iface, "name")?;
        let attributes = INTERFACE_ATTRIBUTES
            .iter()
            .map(|attr| {
                let v = iface.get(*attr).cloned().unwrap_or(Value::Null);
                (attr.to_string(), v)
            })
            .collect();
        records.insert(name, Record::Attributes(attributes));
    }
    Ok(records)
}

/// Duplicate package names: the later descriptor wins.
fn package_records(field: &str, value: &Value) -> Result<BTreeMap<String, Record>> {
    let mut records = BTreeMap::new();
    for descriptor in string_list(field, value)? {
        let package = parse_package(descriptor)?;
        records.insert(package.name, Record::Text(package.vra));
    }
    Ok(records)
}

fn string_list<'a>(field: &str, value: &'a Value) -> Result<Vec<&'a str>> {
    let items = value.as_array().ok_or_else(|| {
        HspError::malformed(field, format!("expected an array, got {}", json_kind(value)))
    })?;
    items
        .iter()
        .map(|item| {
            item.as_str().ok_or_else(|| {
                HspError::malformed(
                    field,
                    format!("expected string entries, got {}", json_kind(item)),
                )
            })
        })
        .collect()
}

fn object_list<'a>(field: &str, value: &'a Value) -> Result<Vec<&'a Map<String, Value>>> {
    let items = value.as_array().ok_or_else(|| {
        HspError::malformed(field, format!("expected an array, got {}", json_kind(value)))
    })?;
    items
        .iter()
        .map(|item| {
            item.as_object().ok_or_else(|| {
                HspError::malformed(
                    field,
                    format!("expected object entries, got {}", json_kind(item)),
                )
            })
        })
        .collect()
}

fn required_str(field: &str, entry: &Map<String, Value>, key: &str) -> Result<String> {
    match entry.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(HspError::malformed(
            field,
            format!("`{key}` must be a string, got {}", json_kind(other)),
        )),
        None => Err(HspError::malformed(
            field,
            format!("entry is missing `{key}`"),
        )),
    }
}
