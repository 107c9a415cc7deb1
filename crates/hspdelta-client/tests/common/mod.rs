use hspdelta_client::{ClientConfig, HttpProfileService};
use hspdelta_core_types::Sensitive;
use serde_json::{json, Value};

pub const USERNAME: &str = "insights-operator";
pub const PASSWORD: &str = "s3cret-pass";
pub const HOST_ID: &str = "6f2c0f0e-7c1a-4a53-9d57-3a2f5b9c1d10";

/// Service pointed at a wiremock server. Must be called from a blocking
/// context: the blocking client owns its own runtime.
#[allow(dead_code)]
pub fn service_for(uri: &str) -> HttpProfileService {
    let config = ClientConfig::new(
        uri,
        USERNAME,
        Sensitive::new(PASSWORD.to_string()),
        true,
    )
    .unwrap();
    HttpProfileService::new(config).unwrap()
}

#[allow(dead_code)]
pub fn profile_body(captured_date: &str, modules: &[&str]) -> Value {
    json!({
        "data": [{
            "id": "ignored",
            "system_profile": {
                "captured_date": captured_date,
                "id": "volatile",
                "kernel_modules": modules,
            }
        }]
    })
}
