//! The remote lookups a report run depends on.

use hspdelta_core::errors::Result;
use hspdelta_core::snapshot::RawSnapshot;
use serde::{Deserialize, Serialize};

/// One inventory host entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// One entry in a host's profile history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDescriptor {
    pub id: String,
    #[serde(default)]
    pub captured_date: Option<String>,
}

/// Request/response access to the inventory and profile services.
///
/// Every method returns the service's result collection as-is; an empty
/// collection is not an error at this layer. Callers decide what "no
/// results" means.
#[cfg_attr(test, mockall::automock)]
pub trait ProfileService {
    /// Hosts whose display name matches exactly.
    fn find_hosts_by_display_name(&self, display_name: &str) -> Result<Vec<HostRecord>>;

    /// The host with the given canonical id.
    fn get_host(&self, host_id: &str) -> Result<Vec<HostRecord>>;

    /// Profile descriptors recorded for a host, in service order.
    fn list_profiles(&self, host_id: &str) -> Result<Vec<ProfileDescriptor>>;

    /// Full profile body for one descriptor.
    fn get_profile(&self, profile_id: &str) -> Result<Vec<RawSnapshot>>;
}
