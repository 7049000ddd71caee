//! Error handling for extup.
//!
//! The error system is split in two:
//!
//! - [`ExtupError`] - the crate-wide error type covering every failure mode,
//!   from manifest loading through package relocation.
//! - [`ResolveFailure`] - the subset of failures that can occur while
//!   resolving the latest release from the remote feed. These are kept as a
//!   separate, `Clone`-able type because the release resolver memoizes its
//!   outcome for the lifetime of one instance, failures included (see
//!   [`crate::resolver::ResolveOutcome`]).
//!
//! Resolution failures are absorbed by the update checkpoints and degrade to
//! "no update available"; they never interrupt the host's wider update cycle.
//! An [`ExtupError::Relocation`] failure, in contrast, is surfaced to the
//! host's installer, since a failed relocation means the install did not
//! complete.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExtupError>;

/// The crate-wide error type.
#[derive(Error, Debug)]
pub enum ExtupError {
    /// The declared update-source URL does not point at a supported release
    /// feed (wrong host, or not exactly an `owner/repo` path).
    ///
    /// An updater built from such a URL is inert: it never issues a network
    /// call and never announces an update.
    #[error("unsupported update source URL: {url}")]
    UnsupportedUpdateSource {
        /// The update-source URL as declared in the extension manifest.
        url: String,
    },

    /// Resolving the latest release from the remote feed failed.
    #[error(transparent)]
    Resolve(#[from] ResolveFailure),

    /// Moving the extracted package directory into place failed.
    ///
    /// The host's installer owns any retry or rollback policy; this crate
    /// reports the failure and leaves the extracted directory where it is.
    #[error("failed to move extracted package {} to {}", from.display(), to.display())]
    Relocation {
        /// The directory produced by the host's archive extraction.
        from: PathBuf,
        /// The expected installation directory.
        to: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The extension manifest file could not be read.
    #[error("failed to read extension manifest {}", path.display())]
    ManifestRead {
        /// Path to the manifest file.
        path: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The extension manifest file is not valid TOML or is missing
    /// required fields.
    #[error("invalid extension manifest {}", path.display())]
    ManifestParse {
        /// Path to the manifest file.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// The updater configuration file could not be read.
    #[error("failed to read updater configuration {}", path.display())]
    ConfigRead {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The updater configuration file is not valid TOML.
    #[error("invalid updater configuration {}", path.display())]
    ConfigParse {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// A failure while querying the remote release feed.
///
/// These carry their cause as a rendered message rather than a source error
/// so the resolver can cache them alongside successful outcomes. All of them
/// are recoverable: the update checkpoints treat a cached failure exactly
/// like "no usable release".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    /// Transport-level failure (DNS, TLS, connect, timeout).
    #[error("network error querying release feed {url}: {message}")]
    Network {
        /// The feed URL that was queried.
        url: String,
        /// Rendered transport error.
        message: String,
    },

    /// The feed answered with a non-success HTTP status.
    #[error("release feed {url} answered HTTP {status}")]
    RemoteStatus {
        /// The feed URL that was queried.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The feed answered with a body that is not a JSON release array.
    #[error("release feed {url} returned a malformed response: {message}")]
    Parse {
        /// The feed URL that was queried.
        url: String,
        /// Rendered deserialization error.
        message: String,
    },
}
