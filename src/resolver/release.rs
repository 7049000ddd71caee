//! Release feed data model.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::version;

/// One release as published on the remote feed.
///
/// Deserialized from one element of the feed's JSON array; only the fields
/// this crate consumes are kept.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Release {
    /// Release tag, usually `v`-prefixed (`v1.3.0`).
    pub tag_name: String,
    /// Source archive URL for this release.
    pub zipball_url: String,
    /// Publication timestamp; `null` while a release is still a draft.
    pub published_at: Option<DateTime<Utc>>,
    /// Release notes in Markdown; the feed may send `null`.
    pub body: Option<String>,
    /// Whether this entry is an unpublished draft.
    pub draft: bool,
}

impl Release {
    /// The release tag treated as a version string (leading `v` stripped).
    pub fn version(&self) -> &str {
        version::normalize(&self.tag_name)
    }

    /// Release notes, empty when the feed sent none.
    pub fn changelog(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

/// Selects the latest published release from a feed response.
///
/// The feed is served newest-first, so this is the first non-draft entry;
/// entries are not re-sorted.
pub fn latest_published(releases: Vec<Release>) -> Option<Release> {
    releases.into_iter().find(|release| !release.draft)
}
