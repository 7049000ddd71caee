//! Version string comparison for update decisions.
//!
//! The host sorts its own update list with a dot-separated segment
//! comparison rather than strict semver, so this module implements the same
//! rule instead of delegating to a semver parser: segments are compared
//! numerically when both sides parse as integers, lexicographically
//! otherwise, and a shorter version is padded with zero segments
//! (`"1.2"` equals `"1.2.0"`).
//!
//! Release tags carry an optional leading `v` (`v1.3.0`); [`normalize`]
//! strips it before the tag is treated as a version string.

use std::cmp::Ordering;

/// Compares two dot-separated version strings.
///
/// Both sides are split on `.`; each segment pair is compared numerically
/// when both segments parse as unsigned integers and lexicographically
/// otherwise. Missing trailing segments compare as `0`.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
///
/// assert_eq!(extup::version::compare("1.2.0", "1.3.0"), Ordering::Less);
/// assert_eq!(extup::version::compare("1.2", "1.2.0"), Ordering::Equal);
/// assert_eq!(extup::version::compare("1.10.0", "1.9.9"), Ordering::Greater);
/// ```
pub fn compare(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<&str> = a.split('.').collect();
    let b_parts: Vec<&str> = b.split('.').collect();
    let len = a_parts.len().max(b_parts.len());

    for idx in 0..len {
        let a_seg = a_parts.get(idx).copied().unwrap_or("0");
        let b_seg = b_parts.get(idx).copied().unwrap_or("0");

        let ord = match (a_seg.parse::<u64>(), b_seg.parse::<u64>()) {
            (Ok(a_num), Ok(b_num)) => a_num.cmp(&b_num),
            _ => a_seg.cmp(b_seg),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    Ordering::Equal
}

/// Strips one leading `v` from a release tag, if present.
pub fn normalize(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Returns `true` when `candidate` is a strictly newer version than
/// `current`. Both sides are normalized first.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    compare(normalize(current), normalize(candidate)) == Ordering::Less
}
