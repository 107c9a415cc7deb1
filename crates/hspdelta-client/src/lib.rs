//! hspdelta Client - access to the inventory and historical profile services
//!
//! - [`ProfileService`]: the four lookups the report needs
//! - [`HttpProfileService`]: blocking HTTP implementation with basic auth
//! - [`fetcher`]: host resolution and history retrieval on top of any
//!   `ProfileService`

pub mod config;
pub mod errors;
pub mod fetcher;
pub mod http;
pub mod service;

pub use config::{ClientConfig, DEFAULT_API_HOSTNAME};
pub use fetcher::{fetch_host_history, HostHistory};
pub use http::HttpProfileService;
pub use service::{HostRecord, ProfileDescriptor, ProfileService};
