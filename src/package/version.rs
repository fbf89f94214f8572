//! Semantic versions as they appear in package file names
//!
//! Versions always carry a leading `v` (`v1.2.3`). The shorthands `v1` and
//! `v1.2` are accepted and read as `v1.0.0` and `v1.2.0`.

use std::cmp::Ordering;

use semver::Version;

/// Parse a `v`-prefixed version string
pub fn parse(version: &str) -> Option<Version> {
    let rest = version.strip_prefix('v')?;
    let core_end = rest.find(['-', '+']).unwrap_or(rest.len());
    let padded = match rest[..core_end].matches('.').count() {
        // shorthand forms may not carry pre-release or build metadata
        0 if core_end == rest.len() => format!("{rest}.0.0"),
        1 if core_end == rest.len() => format!("{rest}.0"),
        2 => rest.to_string(),
        _ => return None,
    };
    Version::parse(&padded).ok()
}

/// Check whether a version string is valid
pub fn is_valid(version: &str) -> bool {
    parse(version).is_some()
}

/// Compare two version strings by precedence
///
/// Build metadata is ignored. An invalid version sorts before every valid
/// one, and two invalid versions are equal.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => (a.major, a.minor, a.patch)
            .cmp(&(b.major, b.minor, b.patch))
            .then_with(|| a.pre.cmp(&b.pre)),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}
