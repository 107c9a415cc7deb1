//! Historical system profile snapshots.
//!
//! A [`RawSnapshot`] is the JSON body returned by the profile service for one
//! point in time. [`normalize`] turns it into a [`CanonicalSnapshot`], and a
//! run's canonical snapshots are ordered into a [`SnapshotSeries`].

pub mod canonical;
pub mod normalize;
pub mod package;
pub mod raw;
pub mod series;

pub use canonical::{CanonicalSnapshot, ComparableValue, Record};
pub use normalize::normalize;
pub use package::{parse_package, PackageDescriptor};
pub use raw::RawSnapshot;
pub use series::SnapshotSeries;

/// Field names with dedicated normalization rules.
pub mod fields {
    pub const CAPTURED_DATE: &str = "captured_date";
    pub const ID: &str = "id";
    pub const LAST_BOOT_TIME: &str = "last_boot_time";
    pub const RUNNING_PROCESSES: &str = "running_processes";
    pub const INSTALLED_PRODUCTS: &str = "installed_products";
    pub const KERNEL_MODULES: &str = "kernel_modules";
    pub const INSTALLED_SERVICES: &str = "installed_services";
    pub const ENABLED_SERVICES: &str = "enabled_services";
    pub const DNF_MODULES: &str = "dnf_modules";
    pub const YUM_REPOS: &str = "yum_repos";
    pub const NETWORK_INTERFACES: &str = "network_interfaces";
    pub const INSTALLED_PACKAGES: &str = "installed_packages";

    /// Interface attributes compared as unordered lists.
    pub const ADDRESS_LISTS: &[&str] = &["ipv4_addresses", "ipv6_addresses"];

    /// Fields removed before comparison.
    pub const DROPPED: &[&str] = &[ID, LAST_BOOT_TIME];
}
