//! Download authorization and post-extraction relocation checkpoints.

use std::path::{Path, PathBuf};

use reqwest::header::{self, HeaderMap};
use tracing::{debug, info};

use crate::core::error::{ExtupError, Result};
use crate::resolver::auth_header;
use crate::updater::GithubUpdater;

/// Mutable arguments for an outgoing download request, handed through the
/// pre-download checkpoint so handlers can decorate the single request the
/// host is about to issue.
#[derive(Debug, Clone, Default)]
pub struct DownloadRequest {
    /// Headers the host will send with the request.
    pub headers: HeaderMap,
}

/// Identifies which package an install-phase checkpoint concerns.
///
/// During a batch install the host dispatches the same checkpoints for
/// every package; handlers use this context to act only on their own.
#[derive(Debug, Clone, Default)]
pub struct InstallContext {
    /// Package identifier of the extension being installed, when known.
    pub package_id: Option<String>,
}

impl InstallContext {
    /// Context naming a specific package.
    pub fn for_package(package_id: impl Into<String>) -> Self {
        Self { package_id: Some(package_id.into()) }
    }

    fn names(&self, id: &str) -> bool {
        self.package_id.as_deref() == Some(id)
    }
}

impl GithubUpdater {
    /// Pre-download checkpoint.
    ///
    /// Attaches `Authorization: token <credential>` to the outgoing request
    /// when all three conditions hold: the install context names this
    /// extension, a credential is configured, and the target URL is exactly
    /// the announced release archive. Anything else, including another
    /// package's download in the same batch, passes through untouched so
    /// the credential never leaks to an unrelated host.
    pub async fn on_before_package_download(
        &self,
        mut request: DownloadRequest,
        target_url: &str,
        context: &InstallContext,
    ) -> DownloadRequest {
        if !context.names(self.extension().id()) {
            return request;
        }
        let Some(token) = self.token() else {
            return request;
        };
        let Some(release) = self.resolver().latest_release().await else {
            return request;
        };
        if target_url == release.zipball_url
            && let Some(value) = auth_header(token)
        {
            debug!(%target_url, "authorizing package download");
            request.headers.insert(header::AUTHORIZATION, value);
        }
        request
    }

    /// Post-extraction checkpoint.
    ///
    /// Release archives extract into a directory named after the repository
    /// and commit (`owner-repo-abcdef`), not the slug the host expects, so
    /// the extracted directory is renamed to `<parent>/<slug>` before the
    /// host's installer takes over. Returns the final package path.
    ///
    /// # Errors
    ///
    /// Returns [`ExtupError::Relocation`] when the rename fails; the host's
    /// installer reports the failed install and owns any retry policy.
    pub async fn on_after_package_extract(
        &self,
        extracted: &Path,
        context: &InstallContext,
    ) -> Result<PathBuf> {
        if !context.names(self.extension().id()) {
            return Ok(extracted.to_path_buf());
        }

        let Some(parent) = extracted.parent() else {
            return Ok(extracted.to_path_buf());
        };
        let target = parent.join(self.extension().slug());
        if target == extracted {
            return Ok(target);
        }

        tokio::fs::rename(extracted, &target).await.map_err(|source| {
            ExtupError::Relocation {
                from: extracted.to_path_buf(),
                to: target.clone(),
                source,
            }
        })?;
        info!(
            from = %extracted.display(),
            to = %target.display(),
            "relocated extracted package",
        );
        Ok(target)
    }
}
