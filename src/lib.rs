//! extup - update checker and installer bridge for extension hosts.
//!
//! A host platform that installs extensions from its own package registry
//! has no way to update an extension published only as GitHub releases.
//! This crate bridges that gap for a single installed extension: it
//! resolves the latest published release from the repository declared in
//! the extension's manifest, announces an update to the host when that
//! release supersedes the installed version, serves the host's
//! package-details screen, authorizes the archive download of a private
//! repository, and relocates the extracted archive so the host's installer
//! finds it under the expected directory name.
//!
//! # Architecture
//!
//! - [`metadata`] - the `extension.toml` manifest, loaded once into a
//!   read-only [`ExtensionInfo`] record
//! - [`config`] - the updater's own settings (the optional access token)
//! - [`version`] - dot-separated version comparison matching the host's
//!   update-list ordering
//! - [`resolver`] - the release feed query, memoized per instance
//! - [`updater`] - [`GithubUpdater`], one handler per host lifecycle
//!   checkpoint
//! - [`core`] - the error taxonomy
//!
//! # Wiring
//!
//! Construction is side-effect free; the host's composition root loads the
//! pieces and registers the checkpoint handlers with its own hook
//! mechanism:
//!
//! ```rust,no_run
//! use extup::config::UpdaterConfig;
//! use extup::{ExtensionInfo, GithubUpdater};
//!
//! # async fn wire() -> extup::Result<()> {
//! let extension = ExtensionInfo::load("extensions/my-extension/extension.toml").await?;
//! let config = UpdaterConfig::load().await?;
//! let updater = GithubUpdater::new(extension, config.github_token().map(str::to_owned));
//!
//! // Host hook wiring, one call per checkpoint:
//! //   update-check pass   -> updater.on_check_for_updates(state).await
//! //   details screen      -> updater.on_request_package_details(&slug).await
//! //   before download     -> updater.on_before_package_download(request, &url, &ctx).await
//! //   after extraction    -> updater.on_after_package_extract(&path, &ctx).await
//! # Ok(())
//! # }
//! ```
//!
//! All resolution failures (unreachable feed, rejected request, malformed
//! response) stay inside the updater and degrade to "no update available";
//! only a failed relocation during an active install surfaces an error,
//! because that install genuinely did not complete.

pub mod config;
pub mod core;
pub mod metadata;
pub mod resolver;
pub mod updater;
pub mod version;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use crate::core::error::{ExtupError, ResolveFailure, Result};
pub use crate::metadata::ExtensionInfo;
pub use crate::resolver::{Release, ReleaseResolver, ResolveOutcome, UpdateSource};
pub use crate::updater::GithubUpdater;
