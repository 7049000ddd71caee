//! Update-source URL parsing.
//!
//! An extension declares where its releases live with a plain repository
//! URL such as `https://github.com/jane/my-extension`. Only URLs whose host
//! is exactly [`RELEASE_FEED_HOST`] and whose path is exactly one
//! `owner/repo` pair are usable; anything else disables update checks for
//! that installation.

use std::fmt;

use crate::core::error::{ExtupError, Result};

/// The only release-feed host this crate understands.
pub const RELEASE_FEED_HOST: &str = "github.com";

/// A parsed `owner/repo` reference on the release-feed host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSource {
    owner: String,
    repo: String,
}

impl UpdateSource {
    /// Parses a declared update-source URL.
    ///
    /// # Errors
    ///
    /// Returns [`ExtupError::UnsupportedUpdateSource`] when the URL has no
    /// http(s) scheme, names a different host, or does not carry exactly an
    /// `owner/repo` path.
    pub fn parse(url: &str) -> Result<Self> {
        let unsupported = || ExtupError::UnsupportedUpdateSource { url: url.to_string() };

        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .ok_or_else(unsupported)?;
        let (host, path) = rest.split_once('/').ok_or_else(unsupported)?;
        if host != RELEASE_FEED_HOST {
            return Err(unsupported());
        }

        // Drop any query or fragment before inspecting the path.
        let path = match path.find(['?', '#']) {
            Some(idx) => &path[..idx],
            None => path,
        };

        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        let owner = segments.next().ok_or_else(unsupported)?;
        let repo = segments.next().ok_or_else(unsupported)?;
        if segments.next().is_some() {
            return Err(unsupported());
        }

        Ok(Self { owner: owner.to_string(), repo: repo.to_string() })
    }

    /// Repository owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// API path listing this repository's releases, relative to the API root.
    pub fn releases_path(&self) -> String {
        format!("repos/{}/{}/releases", self.owner, self.repo)
    }
}

impl fmt::Display for UpdateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_plain_repository_url() {
        let source = UpdateSource::parse("https://github.com/jane/my-extension").unwrap();
        assert_eq!(source.owner(), "jane");
        assert_eq!(source.repo(), "my-extension");
        assert_eq!(source.releases_path(), "repos/jane/my-extension/releases");
    }

    #[test]
    fn tolerates_trailing_slash_and_query() {
        let source = UpdateSource::parse("https://github.com/jane/my-extension/").unwrap();
        assert_eq!(source.to_string(), "jane/my-extension");

        let source = UpdateSource::parse("https://github.com/jane/my-extension?tab=readme").unwrap();
        assert_eq!(source.repo(), "my-extension");
    }

    #[test]
    fn rejects_other_hosts() {
        let err = UpdateSource::parse("https://gitlab.com/jane/my-extension").unwrap_err();
        assert!(matches!(err, ExtupError::UnsupportedUpdateSource { .. }));
    }

    #[test]
    fn rejects_missing_or_extra_path_segments() {
        assert!(UpdateSource::parse("https://github.com/jane").is_err());
        assert!(UpdateSource::parse("https://github.com/").is_err());
        assert!(UpdateSource::parse("https://github.com/jane/repo/tree/main").is_err());
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(UpdateSource::parse("git@github.com:jane/my-extension.git").is_err());
        assert!(UpdateSource::parse("jane/my-extension").is_err());
        assert!(UpdateSource::parse("").is_err());
    }
}
