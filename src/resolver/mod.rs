//! Release resolution against the remote feed.
//!
//! [`ReleaseResolver`] answers one question: what is the latest published
//! release for this extension's declared update source? It issues at most
//! one network request per instance and memoizes the outcome, failures
//! included, so every checkpoint invoked during one host request cycle
//! shares a single feed query. A fresh check cycle gets a fresh resolver
//! (the host reconstructs the updater per cycle); nothing is persisted.
//!
//! The memoized slot is a [`tokio::sync::OnceCell`], which gives the
//! initialize-at-most-once guarantee even if a host dispatches checkpoints
//! concurrently.

use reqwest::header::{self, HeaderValue};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::core::error::ResolveFailure;

pub mod release;
pub mod source;

pub use release::Release;
pub use source::{RELEASE_FEED_HOST, UpdateSource};

/// Default API root for the release feed.
pub const DEFAULT_API_ROOT: &str = "https://api.github.com";

/// Timeout applied to the single feed request.
const FEED_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// The memoized result of one resolution attempt.
///
/// An unset cache slot means "not yet queried"; once set, the slot is
/// terminal for the life of the resolver instance.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    /// The latest published release.
    Release(Release),
    /// The feed was reachable but held no published release, or the update
    /// source was unusable to begin with.
    NoRelease,
    /// The query failed; the failure is cached so repeated checkpoint
    /// invocations do not retry the network.
    Failed(ResolveFailure),
}

impl ResolveOutcome {
    /// The resolved release, if this outcome carries one.
    pub fn release(&self) -> Option<&Release> {
        match self {
            Self::Release(release) => Some(release),
            Self::NoRelease | Self::Failed(_) => None,
        }
    }
}

/// Resolves and caches the latest published release for one update source.
#[derive(Debug)]
pub struct ReleaseResolver {
    source: Option<UpdateSource>,
    token: Option<String>,
    api_root: String,
    client: reqwest::Client,
    cache: OnceCell<ResolveOutcome>,
}

impl ReleaseResolver {
    /// Creates a resolver for a declared update-source URL.
    ///
    /// An unparseable URL does not error here; it yields a disabled
    /// resolver whose outcome is always [`ResolveOutcome::NoRelease`] and
    /// which never touches the network. The updater stays inert for that
    /// installation instead of failing the host's update cycle.
    pub fn new(update_url: &str, token: Option<String>) -> Self {
        let source = match UpdateSource::parse(update_url) {
            Ok(source) => Some(source),
            Err(err) => {
                debug!(%update_url, "update checks disabled: {err}");
                None
            }
        };

        // A disabled resolver starts with its outcome pre-resolved.
        let cache = if source.is_some() {
            OnceCell::new()
        } else {
            OnceCell::new_with(Some(ResolveOutcome::NoRelease))
        };

        Self {
            source,
            token,
            api_root: DEFAULT_API_ROOT.to_string(),
            client: feed_client(),
            cache,
        }
    }

    /// Points the resolver at a different API root (a GitHub Enterprise
    /// deployment, or a stub server in tests).
    #[must_use]
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into().trim_end_matches('/').to_string();
        self
    }

    /// Whether the declared update source was usable.
    pub fn is_enabled(&self) -> bool {
        self.source.is_some()
    }

    /// The parsed update source, when usable.
    pub fn update_source(&self) -> Option<&UpdateSource> {
        self.source.as_ref()
    }

    /// Resolves the latest published release, querying the feed on the
    /// first call and returning the cached outcome on every later one.
    pub async fn resolve(&self) -> &ResolveOutcome {
        self.cache.get_or_init(|| self.fetch_latest()).await
    }

    /// Convenience accessor: the resolved release, treating both
    /// "no release" and cached failures as `None`.
    pub async fn latest_release(&self) -> Option<&Release> {
        self.resolve().await.release()
    }

    async fn fetch_latest(&self) -> ResolveOutcome {
        let Some(source) = &self.source else {
            return ResolveOutcome::NoRelease;
        };
        let url = format!("{}/{}", self.api_root, source.releases_path());
        debug!(%url, "querying release feed");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token
            && let Some(value) = auth_header(token)
        {
            request = request.header(header::AUTHORIZATION, value);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                debug!(%url, "release feed unreachable: {err}");
                return ResolveOutcome::Failed(ResolveFailure::Network {
                    url,
                    message: err.to_string(),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "release feed request rejected");
            return ResolveOutcome::Failed(ResolveFailure::RemoteStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                debug!(%url, "release feed body unreadable: {err}");
                return ResolveOutcome::Failed(ResolveFailure::Network {
                    url,
                    message: err.to_string(),
                });
            }
        };

        let releases: Vec<Release> = match serde_json::from_str(&body) {
            Ok(releases) => releases,
            Err(err) => {
                warn!(%url, "release feed returned malformed JSON: {err}");
                return ResolveOutcome::Failed(ResolveFailure::Parse {
                    url,
                    message: err.to_string(),
                });
            }
        };

        match release::latest_published(releases) {
            Some(release) => {
                debug!(tag = %release.tag_name, "resolved latest published release");
                ResolveOutcome::Release(release)
            }
            None => {
                debug!(%url, "feed holds no published release");
                ResolveOutcome::NoRelease
            }
        }
    }
}

/// Builds the `Authorization: token <credential>` header value, marked
/// sensitive so it is redacted from debug output.
pub(crate) fn auth_header(token: &str) -> Option<HeaderValue> {
    match HeaderValue::from_str(&format!("token {token}")) {
        Ok(mut value) => {
            value.set_sensitive(true);
            Some(value)
        }
        Err(_) => {
            warn!("ignoring access token that is not a valid header value");
            None
        }
    }
}

fn feed_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("extup/", env!("CARGO_PKG_VERSION")))
        .timeout(FEED_TIMEOUT)
        .build()
        .unwrap_or_default()
}
