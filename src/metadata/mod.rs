//! Extension metadata loaded from the installed manifest.
//!
//! Every installable extension ships an `extension.toml` at the root of its
//! installation directory. The host identifies the extension by the
//! path-like pair `<directory>/<manifest file>` (for example
//! `my-extension/extension.toml`); the leading segment of that identifier is
//! the *slug*, the directory name the extension must live under.
//!
//! [`ExtensionInfo`] is a read-only, fixed-field record of that manifest.
//! It is loaded once by the host's composition root and handed to
//! [`GithubUpdater`](crate::updater::GithubUpdater) by value; nothing in
//! this crate mutates or re-reads it afterwards.
//!
//! # Manifest format
//!
//! ```toml
//! [extension]
//! name = "My Extension"
//! version = "1.2.0"
//! description = "Does something useful."
//! author = "Jane Developer"
//! author_url = "https://example.com/jane"
//! homepage = "https://example.com/my-extension"
//! update_url = "https://github.com/jane/my-extension"
//! requires_host = "6.6"
//! ```
//!
//! Only `name` and `version` are required; every other field defaults to an
//! empty string. An empty or unsupported `update_url` leaves the extension
//! installable but never updatable through this crate.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::error::{ExtupError, Result};

/// The canonical manifest filename at the root of an extension directory.
pub const MANIFEST_FILENAME: &str = "extension.toml";

/// On-disk manifest shape: a single `[extension]` table.
#[derive(Debug, Deserialize)]
struct ManifestFile {
    extension: ManifestFields,
}

#[derive(Debug, Deserialize)]
struct ManifestFields {
    name: String,
    version: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    author_url: String,
    #[serde(default)]
    homepage: String,
    #[serde(default)]
    update_url: String,
    #[serde(default)]
    requires_host: String,
}

/// Read-only descriptive record for one installed extension.
#[derive(Debug, Clone)]
pub struct ExtensionInfo {
    manifest_path: PathBuf,
    id: String,
    slug: String,
    name: String,
    version: String,
    description: String,
    author: String,
    author_url: String,
    homepage: String,
    update_url: String,
    requires_host: String,
}

impl ExtensionInfo {
    /// Loads an extension manifest from disk.
    ///
    /// The identifier is derived from the manifest location: the name of the
    /// directory containing the manifest, joined with the manifest filename
    /// (`my-extension/extension.toml`).
    ///
    /// # Errors
    ///
    /// Returns [`ExtupError::ManifestRead`] when the file cannot be read and
    /// [`ExtupError::ManifestParse`] when it is not valid TOML or is missing
    /// the required `name`/`version` fields.
    pub async fn load(manifest_path: impl AsRef<Path>) -> Result<Self> {
        let path = manifest_path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|source| {
            ExtupError::ManifestRead { path: path.to_path_buf(), source }
        })?;
        let manifest: ManifestFile = toml::from_str(&raw).map_err(|source| {
            ExtupError::ManifestParse { path: path.to_path_buf(), source }
        })?;

        let id = extension_id(path);
        let slug = id.split('/').next().unwrap_or_default().to_string();
        debug!(%id, version = %manifest.extension.version, "loaded extension manifest");

        let fields = manifest.extension;
        Ok(Self {
            manifest_path: path.to_path_buf(),
            id,
            slug,
            name: fields.name,
            version: fields.version,
            description: fields.description,
            author: fields.author,
            author_url: fields.author_url,
            homepage: fields.homepage,
            update_url: fields.update_url,
            requires_host: fields.requires_host,
        })
    }

    /// Path the manifest was loaded from.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Host-recognized identifier, `<directory>/<manifest file>`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Installation directory name (the leading segment of [`id`](Self::id)).
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Human-readable extension name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Currently installed version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Short description shown on the host's package screens.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Author name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Author profile URL.
    pub fn author_url(&self) -> &str {
        &self.author_url
    }

    /// Extension homepage URL.
    pub fn homepage(&self) -> &str {
        &self.homepage
    }

    /// Declared update-source URL, possibly empty.
    pub fn update_url(&self) -> &str {
        &self.update_url
    }

    /// Minimum host version this extension declares.
    pub fn requires_host(&self) -> &str {
        &self.requires_host
    }
}

/// Derives the host identifier from a manifest path.
fn extension_id(path: &Path) -> String {
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    match path.parent().and_then(Path::file_name) {
        Some(dir) => format!("{}/{}", dir.to_string_lossy(), file),
        None => file,
    }
}
