//! Update announcement and package-details checkpoints.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::resolver::ResolveOutcome;
use crate::updater::GithubUpdater;
use crate::version;

/// The host's update-check state, threaded through every registered
/// update handler during one check pass.
///
/// `checked` maps package identifiers to their installed versions and is
/// populated by the host before the pass starts; an empty map means the
/// host has not actually checked anything yet and handlers must not act.
/// `response` collects the updates announced by handlers.
#[derive(Debug, Clone, Default)]
pub struct UpdateCheck {
    /// Installed packages the host examined, id to version.
    pub checked: HashMap<String, String>,
    /// Updates announced so far, keyed by package id.
    pub response: HashMap<String, AvailableUpdate>,
}

/// An update offer handed to the host's update-list checkpoint.
///
/// Ephemeral: built only when a newer release exists, consumed by the host
/// immediately.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableUpdate {
    /// Package identifier of the extension being updated.
    pub id: String,
    /// Installation directory name.
    pub slug: String,
    /// The update-source URL, shown as the update's origin.
    pub url: String,
    /// Archive the host should download.
    pub package: String,
    /// The version the package becomes after updating.
    pub new_version: String,
    /// Minimum host version the extension declares.
    pub requires_host: String,
}

/// Descriptive record for the host's package-details screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageDetails {
    /// Human-readable extension name.
    pub name: String,
    /// Installation directory name.
    pub slug: String,
    /// Package identifier.
    pub id: String,
    /// Version offered by the resolved release.
    pub version: String,
    /// Author name.
    pub author: String,
    /// Author profile URL.
    pub author_url: String,
    /// Publication time of the resolved release.
    pub last_updated: Option<DateTime<Utc>>,
    /// Extension homepage.
    pub homepage: String,
    /// Short description from the extension metadata.
    pub short_description: String,
    /// Long-form detail sections.
    pub sections: DetailSections,
    /// Direct download link for the resolved release archive.
    pub download_link: String,
}

/// The named sections rendered on the details screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailSections {
    /// The extension's own description.
    pub description: String,
    /// Release notes of the resolved release ("what's new").
    pub updates: String,
}

impl GithubUpdater {
    /// Update-check checkpoint.
    ///
    /// When the host has performed a check (`checked` is populated) and the
    /// resolved release is newer than the installed version, an
    /// [`AvailableUpdate`] is added to the response map. Resolution
    /// failures degrade to "no update available"; the rest of the host's
    /// check pass is never disturbed.
    pub async fn on_check_for_updates(&self, mut check: UpdateCheck) -> UpdateCheck {
        if check.checked.is_empty() {
            return check;
        }

        if let Some(update) = self.available_update().await {
            info!(
                id = %update.id,
                installed = %self.extension().version(),
                available = %update.new_version,
                "update available",
            );
            check.response.insert(update.id.clone(), update);
        }
        check
    }

    /// Builds the update offer, if the resolved release supersedes the
    /// installed version.
    pub async fn available_update(&self) -> Option<AvailableUpdate> {
        match self.resolver().resolve().await {
            ResolveOutcome::Release(release) => {
                let extension = self.extension();
                if version::is_newer(release.version(), extension.version()) {
                    Some(AvailableUpdate {
                        id: extension.id().to_string(),
                        slug: extension.slug().to_string(),
                        url: extension.update_url().to_string(),
                        package: release.zipball_url.clone(),
                        new_version: release.version().to_string(),
                        requires_host: extension.requires_host().to_string(),
                    })
                } else {
                    debug!(
                        installed = %extension.version(),
                        latest = %release.version(),
                        "installed version is current",
                    );
                    None
                }
            }
            ResolveOutcome::NoRelease => None,
            ResolveOutcome::Failed(failure) => {
                debug!("update check skipped: {failure}");
                None
            }
        }
    }

    /// Package-details checkpoint.
    ///
    /// Returns `Some(details)` only for this extension's own slug;
    /// `None` tells the host to keep its own answer (queries for other
    /// packages are never intercepted). A matching query for which no
    /// release resolves also passes through, keeping resolution failures
    /// inside the "no update available" envelope.
    pub async fn on_request_package_details(&self, slug: &str) -> Option<PackageDetails> {
        let extension = self.extension();
        if slug != extension.slug() {
            return None;
        }

        let release = self.resolver().latest_release().await?;
        Some(PackageDetails {
            name: extension.name().to_string(),
            slug: extension.slug().to_string(),
            id: extension.id().to_string(),
            version: release.version().to_string(),
            author: extension.author().to_string(),
            author_url: extension.author_url().to_string(),
            last_updated: release.published_at,
            homepage: extension.homepage().to_string(),
            short_description: extension.description().to_string(),
            sections: DetailSections {
                description: extension.description().to_string(),
                updates: release.changelog().to_string(),
            },
            download_link: release.zipball_url.clone(),
        })
    }
}
