mod helper;

use std::sync::Arc;
use std::time::Duration;

use mockito::Server;
use releaser::config::{RegistryConfig, ReleaserConfig};
use releaser::releases::ReleaseFetcher;
use releaser::version::error::RegistryError;
use releaser::version::types::{RegistryType, ReleaseRecord};

use helper::registry::StaticRegistry;

fn versions(releases: &[ReleaseRecord]) -> Vec<&str> {
    releases.iter().map(ReleaseRecord::version).collect()
}

#[tokio::test]
async fn fetch_sorted_uses_configured_base_url() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/versions/rack.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"number": "3.0.0", "created_at": "2022-09-06T00:00:00.000Z"},
                {"number": "3.0.0.beta1", "created_at": "2022-08-08T00:00:00.000Z"},
                {"number": "2.2.4", "created_at": "2022-06-30T00:00:00.000Z"}
            ]"#,
        )
        .create_async()
        .await;

    let mut config = ReleaserConfig::default();
    config.fetch.stagger_delay_ms = 0;
    config.registries.rubygems = RegistryConfig {
        enabled: true,
        base_url: Some(server.url()),
    };

    let fetcher = ReleaseFetcher::from_config(&config).unwrap();
    let releases = fetcher
        .fetch_sorted(RegistryType::RubyGems, "rack")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(versions(&releases), vec!["2.2.4", "3.0.0.beta1", "3.0.0"]);
}

#[tokio::test]
async fn fetch_many_reports_missing_packages_individually() {
    let registry = StaticRegistry::new(RegistryType::CratesIo)
        .with_versions("tokio", vec!["1.10.0", "1.9.0", "1.0.0-alpha.1"]);
    let fetcher = ReleaseFetcher::new(vec![Arc::new(registry)], Duration::ZERO);

    let results = fetcher
        .fetch_many(
            RegistryType::CratesIo,
            &["tokio".to_string(), "nope".to_string()],
        )
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(
        versions(results[0].1.as_ref().unwrap()),
        vec!["1.0.0-alpha.1", "1.9.0", "1.10.0"]
    );
    assert!(matches!(results[1].1, Err(RegistryError::NotFound(_))));
}

#[tokio::test]
async fn fetch_sorted_refuses_disabled_registry() {
    let mut config = ReleaserConfig::default();
    config.registries.npm.enabled = false;

    let fetcher = ReleaseFetcher::from_config(&config).unwrap();
    let result = fetcher.fetch_sorted(RegistryType::Npm, "lodash").await;

    assert!(matches!(
        result,
        Err(RegistryError::Disabled(RegistryType::Npm))
    ));
}
