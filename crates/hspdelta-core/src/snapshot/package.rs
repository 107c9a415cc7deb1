//! Package descriptor parsing.
//!
//! Installed packages arrive as NEVRA strings. Accepted shapes:
//!
//! - `name-version-release.arch`
//! - `epoch:name-version-release.arch`
//! - `name-epoch:version-release.arch`
//!
//! The epoch is always discarded. The result splits into the package name and
//! its version-release-architecture (VRA) string.

use crate::errors::{HspError, Result};

/// A parsed package descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub name: String,
    /// `version-release.arch`
    pub vra: String,
}

/// Parse one package descriptor into name and VRA.
///
/// # Errors
///
/// `UnparsableVersion` naming the descriptor when it has no architecture
/// suffix, fewer than three dash-separated components, an empty component,
/// or a malformed epoch.
///
/// # Example
///
/// ```
/// use hspdelta_core::snapshot::parse_package;
///
/// let pkg = parse_package("7:bash-4.4.20-1.el8.x86_64").unwrap();
/// assert_eq!(pkg.name, "bash");
/// assert_eq!(pkg.vra, "4.4.20-1.el8.x86_64");
/// ```
pub fn parse_package(descriptor: &str) -> Result<PackageDescriptor> {
    let unparsable = || HspError::UnparsableVersion {
        descriptor: descriptor.to_string(),
    };

    let trimmed = descriptor.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(unparsable());
    }

    let body = strip_leading_epoch(trimmed).ok_or_else(unparsable)?;

    let (nvr, arch) = body.rsplit_once('.').ok_or_else(unparsable)?;
    let (nv, release) = nvr.rsplit_once('-').ok_or_else(unparsable)?;
    let (name, version) = nv.rsplit_once('-').ok_or_else(unparsable)?;
    let version = strip_inner_epoch(version).ok_or_else(unparsable)?;

    let parts_ok = [name, version, release, arch].iter().all(|p| !p.is_empty())
        && !arch.contains('-')
        && !name.contains(':')
        && !release.contains(':');
    if !parts_ok {
        return Err(unparsable());
    }

    Ok(PackageDescriptor {
        name: name.to_string(),
        vra: format!("{version}-{release}.{arch}"),
    })
}

/// `7:bash-...` → `bash-...`. Returns `None` for a non-numeric epoch.
fn strip_leading_epoch(descriptor: &str) -> Option<&str> {
    match descriptor.split_once(':') {
        Some((prefix, rest)) if !prefix.contains('-') => is_epoch(prefix).then_some(rest),
        _ => Some(descriptor),
    }
}

/// `7:4.4.20` → `4.4.20`. Returns `None` for a non-numeric epoch.
fn strip_inner_epoch(version: &str) -> Option<&str> {
    match version.split_once(':') {
        Some((epoch, rest)) => is_epoch(epoch).then_some(rest),
        None => Some(version),
    }
}

fn is_epoch(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
