//! End-to-end walk through one host request cycle: check for updates,
//! render package details, authorize the archive download, and relocate
//! the extracted package.

use std::collections::HashMap;

use anyhow::Result;
use tempfile::TempDir;

use extup::config::UpdaterConfig;
use extup::test_utils::{StubFeed, feed_body, release_entry, write_manifest, zipball_url};
use extup::updater::{DownloadRequest, InstallContext, UpdateCheck};
use extup::{ExtensionInfo, GithubUpdater};

const UPDATE_URL: &str = "https://github.com/jane/my-extension";
const EXTENSION_ID: &str = "my-extension/extension.toml";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn checked(version: &str) -> UpdateCheck {
    UpdateCheck {
        checked: HashMap::from([(EXTENSION_ID.to_string(), version.to_string())]),
        response: HashMap::new(),
    }
}

#[tokio::test]
async fn full_update_cycle_against_a_private_feed() -> Result<()> {
    init_tracing();
    let dir = TempDir::new()?;

    // Composition root: manifest, configuration, updater.
    let manifest = write_manifest(dir.path(), "my-extension", "1.2.0", UPDATE_URL);
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "github_token = \"sekret\"\n")?;
    let config = UpdaterConfig::load_from(&config_path).await?;

    let feed = StubFeed::serve(
        200,
        feed_body(vec![
            release_entry("v2.0.0", true),
            release_entry("v1.3.0", false),
            release_entry("v1.2.5", false),
        ]),
    )
    .await;

    let extension = ExtensionInfo::load(&manifest).await?;
    let updater = GithubUpdater::new(extension, config.github_token().map(str::to_owned))
        .with_api_root(feed.api_root());
    assert!(updater.is_enabled());

    // Update-check pass: the draft is skipped, v1.3.0 supersedes 1.2.0.
    let check = updater.on_check_for_updates(checked("1.2.0")).await;
    let update = check.response.get(EXTENSION_ID).expect("update announced");
    assert_eq!(update.new_version, "1.3.0");
    assert_eq!(update.package, zipball_url("v1.3.0"));

    // The feed request itself was authorized with the configured token.
    let feed_request = feed.last_request().expect("feed queried");
    assert!(feed_request.contains("authorization: token sekret"));

    // Details screen for this extension.
    let details = updater.on_request_package_details("my-extension").await.expect("details");
    assert_eq!(details.version, "1.3.0");
    assert_eq!(details.sections.updates, "Notes for v1.3.0.");
    assert_eq!(details.download_link, update.package);

    // Queries for other packages pass through.
    assert!(updater.on_request_package_details("unrelated").await.is_none());

    // Download authorization: only the announced archive of this install.
    let own_install = InstallContext::for_package(EXTENSION_ID);
    let request = updater
        .on_before_package_download(DownloadRequest::default(), &update.package, &own_install)
        .await;
    assert!(request.headers.contains_key("authorization"));

    let foreign = updater
        .on_before_package_download(
            DownloadRequest::default(),
            "https://api.github.com/repos/somebody/else/zipball/v4.0.0",
            &own_install,
        )
        .await;
    assert!(foreign.headers.is_empty());

    // Extraction produced a commit-named directory; it ends up at the slug.
    let staging = dir.path().join("upgrade-staging");
    let extracted = staging.join("jane-my-extension-0a1b2c3");
    std::fs::create_dir_all(&extracted)?;
    std::fs::write(extracted.join("extension.toml"), "payload")?;

    let final_path = updater.on_after_package_extract(&extracted, &own_install).await?;
    assert_eq!(final_path, staging.join("my-extension"));
    assert!(final_path.join("extension.toml").exists());

    // The whole cycle issued exactly one feed query.
    assert_eq!(feed.hits(), 1);
    Ok(())
}

#[tokio::test]
async fn unreachable_feed_means_no_update_and_no_disruption() -> Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let manifest = write_manifest(dir.path(), "my-extension", "1.2.0", UPDATE_URL);

    // Bind then drop a listener so the port refuses connections.
    let refused = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        format!("http://{}", listener.local_addr()?)
    };

    let extension = ExtensionInfo::load(&manifest).await?;
    let updater = GithubUpdater::new(extension, None).with_api_root(refused);

    let check = updater.on_check_for_updates(checked("1.2.0")).await;
    assert!(check.response.is_empty());
    assert!(updater.on_request_package_details("my-extension").await.is_none());
    Ok(())
}

#[tokio::test]
async fn foreign_update_source_disables_the_updater() -> Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    let manifest =
        write_manifest(dir.path(), "my-extension", "1.2.0", "https://gitlab.com/jane/my-extension");

    let extension = ExtensionInfo::load(&manifest).await?;
    let updater = GithubUpdater::new(extension, Some("sekret".to_string()));

    assert!(!updater.is_enabled());
    let check = updater.on_check_for_updates(checked("1.2.0")).await;
    assert!(check.response.is_empty());
    Ok(())
}
