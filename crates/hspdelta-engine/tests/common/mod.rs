use hspdelta_client::{HostRecord, ProfileDescriptor, ProfileService};
use hspdelta_core::errors::{HspError, Result};
use hspdelta_core::snapshot::RawSnapshot;
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const HOST_ID: &str = "6f2c0f0e-7c1a-4a53-9d57-3a2f5b9c1d10";
pub const DISPLAY_NAME: &str = "web-01.example.com";

/// In-memory profile service holding one host.
#[derive(Default)]
pub struct FakeProfileService {
    pub profiles: Vec<(String, Value)>,
    pub fail_profile: Option<String>,
}

#[allow(dead_code)]
impl FakeProfileService {
    /// Profiles listed in the given order; ids are `p0`, `p1`, ...
    pub fn with_bodies(bodies: Vec<Value>) -> Self {
        Self {
            profiles: bodies
                .into_iter()
                .enumerate()
                .map(|(i, body)| (format!("p{i}"), body))
                .collect(),
            fail_profile: None,
        }
    }
}

impl ProfileService for FakeProfileService {
    fn find_hosts_by_display_name(&self, display_name: &str) -> Result<Vec<HostRecord>> {
        if display_name == DISPLAY_NAME {
            Ok(vec![HostRecord {
                id: HOST_ID.to_string(),
                display_name: Some(DISPLAY_NAME.to_string()),
            }])
        } else {
            Ok(Vec::new())
        }
    }

    fn get_host(&self, host_id: &str) -> Result<Vec<HostRecord>> {
        if host_id == HOST_ID {
            Ok(vec![HostRecord {
                id: HOST_ID.to_string(),
                display_name: Some(DISPLAY_NAME.to_string()),
            }])
        } else {
            Ok(Vec::new())
        }
    }

    fn list_profiles(&self, _host_id: &str) -> Result<Vec<ProfileDescriptor>> {
        Ok(self
            .profiles
            .iter()
            .map(|(id, _)| ProfileDescriptor {
                id: id.clone(),
                captured_date: None,
            })
            .collect())
    }

    fn get_profile(&self, profile_id: &str) -> Result<Vec<RawSnapshot>> {
        if self.fail_profile.as_deref() == Some(profile_id) {
            return Err(HspError::Service {
                status: 500,
                url: format!("fake://profiles/{profile_id}"),
            });
        }
        let bodies: BTreeMap<&str, &Value> = self
            .profiles
            .iter()
            .map(|(id, body)| (id.as_str(), body))
            .collect();
        bodies
            .get(profile_id)
            .map(|body| RawSnapshot::try_from((*body).clone()).map(|raw| vec![raw]))
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[allow(dead_code)]
pub fn body(captured_date: &str, modules: &[&str]) -> Value {
    json!({
        "id": "volatile",
        "captured_date": captured_date,
        "last_boot_time": captured_date,
        "kernel_modules": modules,
        "running_processes": ["sshd", "kworker/0:1"],
    })
}
