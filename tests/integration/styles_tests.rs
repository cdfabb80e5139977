//! Integration tests for the style registry client.

use mapsync::error::RegistryError;
use mapsync::registry::StyleClient;
use serde_json::json;

use super::test_utils::MockRegistry;

#[tokio::test]
async fn test_list_styles_preserves_server_order() {
    let registry = MockRegistry::start().await;
    registry.add_style("style-1", "zeta");
    registry.add_style("style-2", "alpha");
    registry.add_style("style-3", "mid");

    let client = StyleClient::new(registry.gateway());
    let styles = client.list_styles().await.unwrap();

    let ids: Vec<&str> = styles.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["style-1", "style-2", "style-3"]);
    assert_eq!(styles[0].name, "zeta");
    assert_eq!(styles[0].owner, super::test_utils::TEST_USER);
}

#[tokio::test]
async fn test_list_styles_empty_account() {
    let registry = MockRegistry::start().await;

    let client = StyleClient::new(registry.gateway());
    let styles = client.list_styles().await.unwrap();
    assert!(styles.is_empty());
}

#[tokio::test]
async fn test_list_styles_error_uses_status_fallback() {
    let registry = MockRegistry::start().await;
    registry.set_list_error(500, None);

    let client = StyleClient::new(registry.gateway());
    let err = client.list_styles().await.unwrap_err();

    assert_eq!(err.to_string(), "Couldn't list styles (HTTP 500)");
    assert!(matches!(err, RegistryError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_list_styles_error_uses_server_message() {
    let registry = MockRegistry::start().await;
    registry.set_list_error(429, Some("rate limited"));

    let client = StyleClient::new(registry.gateway());
    let err = client.list_styles().await.unwrap_err();

    assert_eq!(err.to_string(), "Couldn't list styles: rate limited");
}

#[tokio::test]
async fn test_rejected_token_surfaces_server_message() {
    let registry = MockRegistry::start().await;

    let client = StyleClient::new(registry.gateway_with_bad_token());
    let err = client.list_styles().await.unwrap_err();

    assert_eq!(err.to_string(), "Couldn't list styles: unauthorized");
}

#[tokio::test]
async fn test_create_style_appears_in_listing() {
    let registry = MockRegistry::start().await;

    let client = StyleClient::new(registry.gateway());
    let definition = json!({"version": 8, "name": "districts", "layers": []});
    client.create_style(&definition).await.unwrap();

    let styles = client.list_styles().await.unwrap();
    assert_eq!(styles.len(), 1);
    assert_eq!(styles[0].name, "districts");
}

#[tokio::test]
async fn test_update_style_changes_name() {
    let registry = MockRegistry::start().await;
    registry.add_style("style-a", "before");

    let client = StyleClient::new(registry.gateway());
    client
        .update_style("style-a", &json!({"name": "after"}))
        .await
        .unwrap();

    assert_eq!(registry.style_names(), vec!["after"]);
}

#[tokio::test]
async fn test_update_missing_style_fails() {
    let registry = MockRegistry::start().await;

    let client = StyleClient::new(registry.gateway());
    let err = client
        .update_style("no-such-style", &json!({"name": "after"}))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Couldn't update style (HTTP 404)");
}

#[tokio::test]
async fn test_fetch_style_returns_style_and_token() {
    let registry = MockRegistry::start().await;
    registry.add_style("style-a", "base");

    let client = StyleClient::new(registry.gateway());
    let (style, etag) = client.fetch_style("style-a").await.unwrap().unwrap();

    assert_eq!(style.id, "style-a");
    assert_eq!(style.name, "base");
    assert!(!etag.as_str().is_empty());
}

#[tokio::test]
async fn test_fetch_missing_style_is_none() {
    let registry = MockRegistry::start().await;

    let client = StyleClient::new(registry.gateway());
    let result = client.fetch_style("ghost").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_token_changes_when_style_changes() {
    let registry = MockRegistry::start().await;
    registry.add_style("style-a", "base");

    let client = StyleClient::new(registry.gateway());
    let (_, before) = client.fetch_style("style-a").await.unwrap().unwrap();
    client
        .update_style("style-a", &json!({"layers": []}))
        .await
        .unwrap();
    let (_, after) = client.fetch_style("style-a").await.unwrap().unwrap();

    assert_ne!(before, after);
}

#[tokio::test]
async fn test_transport_failure_is_transport_error() {
    // Nothing is listening here.
    let gateway =
        mapsync::registry::Gateway::with_base_url("tk.test", "testuser", "http://127.0.0.1:1")
            .unwrap();
    let client = StyleClient::new(gateway);

    let err = client.list_styles().await.unwrap_err();
    assert!(matches!(err, RegistryError::Transport(_)));
}
