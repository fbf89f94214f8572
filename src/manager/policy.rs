//! Version policy
//!
//! Decides whether a package version may be installed next to the versions
//! already present, and which of them must go first.

use tracing::debug;

use crate::error::{Result, already_installed, invalid_options};
use crate::package::{PackageIdentity, version};

/// Flags controlling what happens when other versions are installed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddPolicy {
    /// Remove an installed version the target compares against (see
    /// [`resolve_version_policy`] for the exact rule)
    pub upgrade: bool,
    /// Counterpart of `upgrade`
    pub downgrade: bool,
    /// Remove every installed version, even the same one
    pub replace: bool,
    /// Keep other versions installed
    pub allow_multiple_versions: bool,
}

impl AddPolicy {
    /// Reject contradictory flag combinations
    pub fn validate(&self) -> Result<()> {
        if self.upgrade && self.downgrade {
            return Err(invalid_options("upgrade and downgrade are mutually exclusive"));
        }
        if self.replace && (self.upgrade || self.downgrade) {
            return Err(invalid_options(
                "replace cannot be combined with upgrade or downgrade",
            ));
        }
        if self.allow_multiple_versions && (self.upgrade || self.downgrade || self.replace) {
            return Err(invalid_options(
                "allow-multiple cannot be combined with upgrade, downgrade or replace",
            ));
        }
        Ok(())
    }

    fn any_override(&self) -> bool {
        self.replace || self.upgrade || self.downgrade
    }
}

/// Installed packages to remove before the target can be committed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyDecision {
    pub to_evict: Vec<PackageIdentity>,
}

/// Apply `policy` to every installed package named `name`
///
/// Entries of `installed` with another name are ignored. The first
/// enumeration error aborts the decision. Nothing is removed here: the
/// caller evicts [`PolicyDecision::to_evict`] once the whole decision
/// succeeded.
///
/// With `upgrade` or `downgrade`, `cmp = compare(target, installed)`; the
/// request is rejected when `cmp >= 0` without `downgrade`, or when
/// `cmp <= 0` without `upgrade`. Otherwise the installed version is evicted.
pub fn resolve_version_policy<I>(
    installed: I,
    name: &str,
    target_version: &str,
    policy: &AddPolicy,
) -> Result<PolicyDecision>
where
    I: IntoIterator<Item = Result<PackageIdentity>>,
{
    let mut decision = PolicyDecision::default();

    for entry in installed {
        let entry = entry?;
        if entry.name() != name {
            continue;
        }

        if policy.allow_multiple_versions {
            if entry.version() == target_version {
                return Err(already_installed(name, entry.version()));
            }
            continue;
        }

        if !policy.any_override() {
            return Err(already_installed(name, entry.version()));
        }

        if policy.replace {
            debug!(package = %entry, "Replacing");
            decision.to_evict.push(entry);
            continue;
        }

        let cmp = version::compare(target_version, entry.version());
        if cmp.is_ge() && !policy.downgrade {
            return Err(already_installed(name, entry.version()));
        }
        if cmp.is_le() && !policy.upgrade {
            return Err(already_installed(name, entry.version()));
        }

        debug!(package = %entry, target = target_version, "Superseded");
        decision.to_evict.push(entry);
    }

    Ok(decision)
}
