use crate::support::{index_path, mount_index, mount_status};
use blog_pdf::cache::{cache_key, ContentCache, HTML_EXTENSION};
use blog_pdf::config::FetchConfig;
use blog_pdf::crawler::PageFetcher;
use blog_pdf::CrawlError;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_fetcher(dir: &TempDir) -> PageFetcher {
    let config = FetchConfig {
        throttle_max_ms: 0,
        ..FetchConfig::default()
    };
    PageFetcher::from_config(&config, ContentCache::new(dir.path())).expect("fetcher")
}

#[tokio::test]
async fn test_second_load_hits_cache() {
    let mock_server = MockServer::start().await;
    mount_index(&mock_server, 1, &["https://example.com/a"], 1).await;

    let dir = TempDir::new().unwrap();
    let fetcher = create_fetcher(&dir);
    let url = format!("{}{}", mock_server.uri(), index_path(1));

    let first = fetcher.load(&url).await.expect("first load");
    let second = fetcher.load(&url).await.expect("second load");

    assert_eq!(first, second);
    assert!(first.contains("https://example.com/a"));

    // The body is stored under the MD5 key of the URL
    let cached = std::fs::read_to_string(dir.path().join(cache_key(&url, HTML_EXTENSION)))
        .expect("cache file");
    assert_eq!(cached, first);
}

#[tokio::test]
async fn test_cache_survives_new_fetcher() {
    let mock_server = MockServer::start().await;
    mount_index(&mock_server, 1, &[], 1).await;

    let dir = TempDir::new().unwrap();
    let url = format!("{}{}", mock_server.uri(), index_path(1));

    create_fetcher(&dir).load(&url).await.expect("first run");
    create_fetcher(&dir).load(&url).await.expect("second run");
}

#[tokio::test]
async fn test_empty_page_is_cached() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let fetcher = create_fetcher(&dir);
    let url = format!("{}/empty", mock_server.uri());

    assert_eq!(fetcher.load(&url).await.unwrap(), "");
    assert_eq!(fetcher.load(&url).await.unwrap(), "");
}

#[tokio::test]
async fn test_non_200_is_fatal_and_not_cached() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, 1, 500, 2).await;

    let dir = TempDir::new().unwrap();
    let fetcher = create_fetcher(&dir);
    let url = format!("{}{}", mock_server.uri(), index_path(1));

    for _ in 0..2 {
        match fetcher.load(&url).await {
            Err(CrawlError::HttpStatus { status, url: failed }) => {
                assert_eq!(status, 500);
                assert_eq!(failed, url);
            }
            other => panic!("expected HttpStatus error, got {:?}", other),
        }
    }

    assert!(!fetcher.cache().contains(&cache_key(&url, HTML_EXTENSION)).await);
}

#[tokio::test]
async fn test_other_success_codes_are_fatal() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, 1, 204, 1).await;

    let dir = TempDir::new().unwrap();
    let url = format!("{}{}", mock_server.uri(), index_path(1));

    let result = create_fetcher(&dir).load(&url).await;
    assert!(matches!(
        result,
        Err(CrawlError::HttpStatus { status: 204, .. })
    ));
}

#[tokio::test]
async fn test_sends_configured_user_agent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = FetchConfig {
        user_agent: "TestBot/1.0".to_string(),
        throttle_max_ms: 0,
        ..FetchConfig::default()
    };
    let fetcher = PageFetcher::from_config(&config, ContentCache::new(dir.path())).unwrap();

    let body = fetcher
        .load(&format!("{}/ua", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_request_timeout_is_fatal() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = FetchConfig {
        request_timeout: 1,
        throttle_max_ms: 0,
        ..FetchConfig::default()
    };
    let fetcher = PageFetcher::from_config(&config, ContentCache::new(dir.path())).unwrap();

    let result = fetcher.load(&format!("{}/slow", mock_server.uri())).await;
    match result {
        Err(CrawlError::Http { source, .. }) => assert!(source.is_timeout()),
        other => panic!("expected timeout, got {:?}", other),
    }
}

/// Always pauses for the full configured maximum
fn full_pause(max: Duration) -> Duration {
    max
}

#[tokio::test]
async fn test_throttle_only_after_network_fetch() {
    let mock_server = MockServer::start().await;
    mount_index(&mock_server, 1, &["https://example.com/a"], 1).await;

    let dir = TempDir::new().unwrap();
    let config = FetchConfig {
        throttle_max_ms: 200,
        ..FetchConfig::default()
    };
    let fetcher = PageFetcher::from_config(&config, ContentCache::new(dir.path()))
        .unwrap()
        .with_throttle(full_pause);
    let url = format!("{}{}", mock_server.uri(), index_path(1));

    let started = Instant::now();
    let first = fetcher.load(&url).await.expect("network load");
    assert!(
        started.elapsed() >= Duration::from_millis(200),
        "cache miss returned before the throttle: {:?}",
        started.elapsed()
    );

    let started = Instant::now();
    let second = fetcher.load(&url).await.expect("cached load");
    assert!(
        started.elapsed() < Duration::from_millis(100),
        "cache hit was throttled: {:?}",
        started.elapsed()
    );

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_cache_hit_skips_random_throttle() {
    let mock_server = MockServer::start().await;
    mount_index(&mock_server, 1, &[], 1).await;

    let dir = TempDir::new().unwrap();
    let config = FetchConfig {
        throttle_max_ms: 200,
        ..FetchConfig::default()
    };
    let fetcher = PageFetcher::from_config(&config, ContentCache::new(dir.path())).unwrap();
    let url = format!("{}{}", mock_server.uri(), index_path(1));

    fetcher.load(&url).await.expect("network load");

    let started = Instant::now();
    fetcher.load(&url).await.expect("cached load");
    assert!(started.elapsed() < Duration::from_millis(100));
}

#[test]
fn test_invalid_user_agent_fails_client_build() {
    let dir = TempDir::new().unwrap();
    let config = FetchConfig {
        user_agent: "bad\nagent".to_string(),
        ..FetchConfig::default()
    };

    let result = PageFetcher::from_config(&config, ContentCache::new(dir.path()));
    assert!(matches!(result, Err(CrawlError::ClientBuild(_))));
}
