//! Update integration for one installed extension.
//!
//! [`GithubUpdater`] bridges the host's package lifecycle to a GitHub
//! release feed that the host's own registry knows nothing about. It is a
//! set of checkpoint handlers, one per lifecycle hook the host exposes:
//!
//! | Host checkpoint | Handler |
//! | --- | --- |
//! | update-check pass | [`on_check_for_updates`](GithubUpdater::on_check_for_updates) |
//! | package details screen | [`on_request_package_details`](GithubUpdater::on_request_package_details) |
//! | before archive download | [`on_before_package_download`](GithubUpdater::on_before_package_download) |
//! | after archive extraction | [`on_after_package_extract`](GithubUpdater::on_after_package_extract) |
//!
//! Construction has no side effects: the host's composition root builds the
//! updater and wires the handlers into its own hook mechanism, so an
//! updater can be created and exercised in isolation. The host constructs
//! a fresh updater per request cycle; the embedded
//! [`ReleaseResolver`](crate::resolver::ReleaseResolver) guarantees that
//! all four handlers together issue at most one feed query per cycle.
//!
//! An updater whose declared update source is unusable (foreign host,
//! malformed URL) is inert: every handler passes its input through
//! unchanged and the network is never touched.

use crate::metadata::ExtensionInfo;
use crate::resolver::ReleaseResolver;

mod announce;
mod install;


pub use announce::{AvailableUpdate, DetailSections, PackageDetails, UpdateCheck};
pub use install::{DownloadRequest, InstallContext};

/// Checkpoint handlers updating one extension from a GitHub release feed.
pub struct GithubUpdater {
    extension: ExtensionInfo,
    resolver: ReleaseResolver,
    token: Option<String>,
}

impl GithubUpdater {
    /// Creates an updater for an installed extension.
    ///
    /// The access token, when present, is used both to query the release
    /// feed and to authorize the archive download of a private repository.
    /// It is held for the life of this instance and never persisted.
    pub fn new(extension: ExtensionInfo, token: Option<String>) -> Self {
        let resolver = ReleaseResolver::new(extension.update_url(), token.clone());
        Self { extension, resolver, token }
    }

    /// Points the embedded resolver at a different API root (GitHub
    /// Enterprise, or a stub server in tests).
    #[must_use]
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.resolver = self.resolver.with_api_root(api_root);
        self
    }

    /// The extension this updater manages.
    pub fn extension(&self) -> &ExtensionInfo {
        &self.extension
    }

    /// The embedded release resolver.
    pub fn resolver(&self) -> &ReleaseResolver {
        &self.resolver
    }

    /// Whether the declared update source was usable.
    pub fn is_enabled(&self) -> bool {
        self.resolver.is_enabled()
    }

    pub(crate) fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
