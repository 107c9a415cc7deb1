//! Snapshot fetcher.
//!
//! Turns a host identifier into its display name and the full list of raw
//! profile bodies, in the order the history service lists them. Sorting is
//! left to the caller.

use crate::service::ProfileService;
use hspdelta_core::errors::{HspError, Result};
use hspdelta_core::snapshot::RawSnapshot;
use hspdelta_core::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;
use uuid::Uuid;

/// A host and its raw profile history.
#[derive(Debug, Clone, PartialEq)]
pub struct HostHistory {
    pub host_id: String,
    pub display_name: String,
    /// In service order, not sorted by capture time.
    pub snapshots: Vec<RawSnapshot>,
}

/// Resolve, name and fetch in one go.
///
/// # Errors
///
/// `NotFound` when any lookup comes back empty, plus whatever the service
/// returns.
pub fn fetch_host_history<S>(service: &S, host: &str) -> Result<HostHistory>
where
    S: ProfileService + ?Sized,
{
    let start = Instant::now();
    log_op_start!("fetch_host_history", host = host);

    let result = resolve_host_id(service, host).and_then(|host_id| {
        let display_name = lookup_display_name(service, &host_id)?;
        tracing::info!(%display_name, "fetching historical profiles");
        let snapshots = fetch_history(service, &host_id)?;
        Ok(HostHistory {
            host_id,
            display_name,
            snapshots,
        })
    });

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(history) => {
            log_op_end!(
                "fetch_host_history",
                duration_ms = duration_ms,
                snapshot_count = history.snapshots.len()
            );
        }
        Err(err) => {
            log_op_error!("fetch_host_history", err.clone(), duration_ms = duration_ms);
        }
    }
    result
}

/// A UUID is already a canonical host id; anything else is a display name.
///
/// # Errors
///
/// `NotFound` if no host carries that display name.
pub fn resolve_host_id<S>(service: &S, host: &str) -> Result<String>
where
    S: ProfileService + ?Sized,
{
    let host = host.trim();
    if Uuid::parse_str(host).is_ok() {
        return Ok(host.to_string());
    }
    service
        .find_hosts_by_display_name(host)?
        .into_iter()
        .next()
        .map(|record| record.id)
        .ok_or_else(|| HspError::not_found(format!("host with display name {host}")))
}

/// First inventory record's display name, falling back to the id when the
/// record has none.
///
/// # Errors
///
/// `NotFound` if the inventory has no such host.
pub fn lookup_display_name<S>(service: &S, host_id: &str) -> Result<String>
where
    S: ProfileService + ?Sized,
{
    service
        .get_host(host_id)?
        .into_iter()
        .next()
        .map(|record| record.display_name.unwrap_or_else(|| host_id.to_string()))
        .ok_or_else(|| HspError::not_found(format!("host {host_id}")))
}

/// Every profile body for the host, one lookup per descriptor.
///
/// # Errors
///
/// `NotFound` if the host has no history or any profile lookup is empty.
/// The first failure aborts the fetch.
pub fn fetch_history<S>(service: &S, host_id: &str) -> Result<Vec<RawSnapshot>>
where
    S: ProfileService + ?Sized,
{
    let descriptors = service.list_profiles(host_id)?;
    if descriptors.is_empty() {
        return Err(HspError::not_found(format!("profile history of host {host_id}")));
    }

    let total = descriptors.len();
    let mut snapshots = Vec::with_capacity(total);
    for (index, descriptor) in descriptors.iter().enumerate() {
        let snapshot = service
            .get_profile(&descriptor.id)?
            .into_iter()
            .next()
            .ok_or_else(|| HspError::not_found(format!("profile {}", descriptor.id)))?;
        tracing::info!(profile_id = %descriptor.id, "fetched snapshot {}/{}", index + 1, total);
        snapshots.push(snapshot);
    }
    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{HostRecord, MockProfileService, ProfileDescriptor};
    use mockall::predicate::eq;
    use serde_json::json;

    const HOST_ID: &str = "6f2c0f0e-7c1a-4a53-9d57-3a2f5b9c1d10";

    fn body(ts: &str) -> RawSnapshot {
        RawSnapshot::try_from(json!({"captured_date": ts})).unwrap()
    }

    fn descriptor(id: &str) -> ProfileDescriptor {
        ProfileDescriptor {
            id: id.to_string(),
            captured_date: None,
        }
    }

    #[test]
    fn test_uuid_skips_display_name_lookup() {
        let mut service = MockProfileService::new();
        service.expect_find_hosts_by_display_name().never();
        assert_eq!(resolve_host_id(&service, HOST_ID).unwrap(), HOST_ID);
    }

    #[test]
    fn test_display_name_resolves_to_first_result() {
        let mut service = MockProfileService::new();
        service
            .expect_find_hosts_by_display_name()
            .with(eq("web-01"))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    HostRecord {
                        id: "first".to_string(),
                        display_name: Some("web-01".to_string()),
                    },
                    HostRecord {
                        id: "second".to_string(),
                        display_name: Some("web-01".to_string()),
                    },
                ])
            });
        assert_eq!(resolve_host_id(&service, "web-01").unwrap(), "first");
    }

    #[test]
    fn test_unknown_display_name_is_not_found() {
        let mut service = MockProfileService::new();
        service
            .expect_find_hosts_by_display_name()
            .returning(|_| Ok(Vec::new()));
        let err = resolve_host_id(&service, "ghost").unwrap_err();
        assert!(matches!(err, HspError::NotFound { .. }));
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let mut service = MockProfileService::new();
        service.expect_get_host().returning(|id| {
            Ok(vec![HostRecord {
                id: id.to_string(),
                display_name: None,
            }])
        });
        assert_eq!(lookup_display_name(&service, HOST_ID).unwrap(), HOST_ID);
    }

    #[test]
    fn test_history_fetches_each_profile_in_order() {
        let mut service = MockProfileService::new();
        service
            .expect_list_profiles()
            .with(eq(HOST_ID))
            .returning(|_| Ok(vec![descriptor("p2"), descriptor("p1")]));
        service
            .expect_get_profile()
            .with(eq("p2"))
            .times(1)
            .returning(|_| Ok(vec![body("2020-03-31T00:00:00Z")]));
        service
            .expect_get_profile()
            .with(eq("p1"))
            .times(1)
            .returning(|_| Ok(vec![body("2020-03-30T00:00:00Z")]));

        let snapshots = fetch_history(&service, HOST_ID).unwrap();
        assert_eq!(
            snapshots,
            vec![body("2020-03-31T00:00:00Z"), body("2020-03-30T00:00:00Z")]
        );
    }

    #[test]
    fn test_empty_history_is_not_found() {
        let mut service = MockProfileService::new();
        service.expect_list_profiles().returning(|_| Ok(Vec::new()));
        service.expect_get_profile().never();
        let err = fetch_history(&service, HOST_ID).unwrap_err();
        assert_eq!(
            err,
            HspError::not_found(format!("profile history of host {HOST_ID}"))
        );
    }

    #[test]
    fn test_empty_profile_lookup_aborts() {
        let mut service = MockProfileService::new();
        service
            .expect_list_profiles()
            .returning(|_| Ok(vec![descriptor("p1"), descriptor("p2")]));
        service
            .expect_get_profile()
            .with(eq("p1"))
            .returning(|_| Ok(Vec::new()));
        service.expect_get_profile().with(eq("p2")).never();
        let err = fetch_history(&service, HOST_ID).unwrap_err();
        assert_eq!(err, HspError::not_found("profile p1"));
    }

    #[test]
    fn test_service_error_propagates() {
        let mut service = MockProfileService::new();
        service.expect_get_host().returning(|_| {
            Err(HspError::Service {
                status: 401,
                url: "https://x/api/inventory/v1/hosts/h".to_string(),
            })
        });
        let err = fetch_host_history(&service, HOST_ID).unwrap_err();
        assert!(matches!(err, HspError::Service { status: 401, .. }));
    }

    #[test]
    fn test_full_history_by_display_name() {
        let mut service = MockProfileService::new();
        service.expect_find_hosts_by_display_name().returning(|_| {
            Ok(vec![HostRecord {
                id: HOST_ID.to_string(),
                display_name: None,
            }])
        });
        service.expect_get_host().returning(|id| {
            Ok(vec![HostRecord {
                id: id.to_string(),
                display_name: Some("web-01.example.com".to_string()),
            }])
        });
        service
            .expect_list_profiles()
            .returning(|_| Ok(vec![descriptor("p1")]));
        service
            .expect_get_profile()
            .returning(|_| Ok(vec![body("2020-03-30T00:00:00Z")]));

        let history = fetch_host_history(&service, "web-01.example.com").unwrap();
        assert_eq!(history.host_id, HOST_ID);
        assert_eq!(history.display_name, "web-01.example.com");
        assert_eq!(history.snapshots.len(), 1);
    }
}
