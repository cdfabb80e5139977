//! Integration tests for conditional style deletion.
//!
//! These exercise the three-phase protocol end to end against the mock
//! registry: discovery filtering, verification-time races, precondition
//! failures, the registry's transient 404s, and hard-error aborts.

use mapsync::error::RegistryError;
use mapsync::registry::StyleClient;

use super::test_utils::MockRegistry;

// =============================================================================
// Happy Path
// =============================================================================

#[tokio::test]
async fn test_deletes_only_exact_name_matches() {
    let registry = MockRegistry::start().await;
    registry.add_style("style-a", "base");
    registry.add_style("style-b", "base");
    registry.add_style("style-c", "other");

    let client = StyleClient::new(registry.gateway());
    let deleted = client.delete_styles_with_name("base").await.unwrap();

    assert_eq!(deleted, 2);
    assert_eq!(registry.style_ids(), vec!["style-c"]);
    // Only the two matching styles were ever attempted.
    assert_eq!(registry.delete_attempts(), vec!["style-a", "style-b"]);
}

#[tokio::test]
async fn test_zero_matches_is_success_with_count_zero() {
    let registry = MockRegistry::start().await;
    registry.add_style("style-a", "something else");

    let client = StyleClient::new(registry.gateway());
    let deleted = client.delete_styles_with_name("base").await.unwrap();

    assert_eq!(deleted, 0);
    assert!(registry.delete_attempts().is_empty());
}

#[tokio::test]
async fn test_empty_registry_is_success() {
    let registry = MockRegistry::start().await;

    let client = StyleClient::new(registry.gateway());
    let deleted = client.delete_styles_with_name("base").await.unwrap();

    assert_eq!(deleted, 0);
}

#[tokio::test]
async fn test_name_match_is_case_sensitive() {
    let registry = MockRegistry::start().await;
    registry.add_style("style-a", "Base");

    let client = StyleClient::new(registry.gateway());
    let deleted = client.delete_styles_with_name("base").await.unwrap();

    assert_eq!(deleted, 0);
    assert_eq!(registry.style_ids(), vec!["style-a"]);
}

// =============================================================================
// Verification Phase Races
// =============================================================================

#[tokio::test]
async fn test_not_found_on_verification_skips_candidate() {
    let registry = MockRegistry::start().await;
    registry.add_style("style-a", "base");
    registry.add_style("style-b", "base");
    registry.override_fetch("style-a", 404);

    let client = StyleClient::new(registry.gateway());
    let deleted = client.delete_styles_with_name("base").await.unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(registry.delete_attempts(), vec!["style-b"]);
}

#[tokio::test]
async fn test_renamed_style_is_never_deleted() {
    let registry = MockRegistry::start().await;
    registry.add_style("style-a", "base");
    registry.add_style("style-b", "base");
    // Another actor renames style-a between our listing and our point-fetch.
    registry.rename_on_fetch("style-a", "rescued");

    let client = StyleClient::new(registry.gateway());
    let deleted = client.delete_styles_with_name("base").await.unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(registry.delete_attempts(), vec!["style-b"]);
    assert_eq!(registry.style_names(), vec!["rescued"]);
}

#[tokio::test]
async fn test_hard_error_on_verification_aborts() {
    let registry = MockRegistry::start().await;
    registry.add_style("style-a", "base");
    registry.add_style("style-b", "base");
    registry.override_fetch("style-a", 500);

    let client = StyleClient::new(registry.gateway());
    let result = client.delete_styles_with_name("base").await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Failed to get style (HTTP 500)");
    // Nothing was deleted: the abort happened before Phase 3.
    assert!(registry.delete_attempts().is_empty());
    assert_eq!(registry.style_ids(), vec!["style-a", "style-b"]);
}

#[tokio::test]
async fn test_missing_etag_is_a_protocol_violation() {
    let registry = MockRegistry::start().await;
    registry.add_style("style-a", "base");
    registry.drop_etag_on_fetch("style-a");

    let client = StyleClient::new(registry.gateway());
    let result = client.delete_styles_with_name("base").await;

    assert!(matches!(result, Err(RegistryError::MissingEtag(id)) if id == "style-a"));
    assert!(registry.delete_attempts().is_empty());
}

// =============================================================================
// Delete Phase Races
// =============================================================================

#[tokio::test]
async fn test_precondition_failure_does_not_abort_remaining() {
    let registry = MockRegistry::start().await;
    registry.add_style("style-a", "base");
    registry.add_style("style-b", "base");
    registry.override_delete("style-a", 412);

    let client = StyleClient::new(registry.gateway());
    let deleted = client.delete_styles_with_name("base").await.unwrap();

    // style-a lost its race; style-b still went through.
    assert_eq!(deleted, 1);
    assert_eq!(registry.delete_attempts(), vec!["style-a", "style-b"]);
    assert_eq!(registry.style_ids(), vec!["style-a"]);
}

#[tokio::test]
async fn test_not_found_on_delete_is_absorbed() {
    let registry = MockRegistry::start().await;
    registry.add_style("style-a", "base");
    registry.add_style("style-b", "base");
    registry.override_delete("style-a", 404);

    let client = StyleClient::new(registry.gateway());
    let deleted = client.delete_styles_with_name("base").await.unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(registry.delete_attempts(), vec!["style-a", "style-b"]);
}

#[tokio::test]
async fn test_hard_error_on_delete_aborts_immediately() {
    let registry = MockRegistry::start().await;
    registry.add_style("style-a", "base");
    registry.add_style("style-b", "base");
    registry.override_delete("style-a", 500);

    let client = StyleClient::new(registry.gateway());
    let result = client.delete_styles_with_name("base").await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Failed to delete style style-a (HTTP 500)");
    // style-b was never attempted.
    assert_eq!(registry.delete_attempts(), vec!["style-a"]);
    assert!(registry.style_ids().contains(&"style-b".to_string()));
}

#[tokio::test]
async fn test_stale_token_is_rejected_by_server() {
    let registry = MockRegistry::start().await;
    registry.add_style("style-a", "base");

    // Capture a token, then modify the style so the token goes stale.
    let client = StyleClient::new(registry.gateway());
    let (_, _stale) = client.fetch_style("style-a").await.unwrap().unwrap();
    client
        .update_style("style-a", &serde_json::json!({"layers": []}))
        .await
        .unwrap();

    // The orchestrator re-verifies and captures the fresh token, so its
    // delete still succeeds despite the earlier modification.
    let deleted = client.delete_styles_with_name("base").await.unwrap();
    assert_eq!(deleted, 1);
}

// =============================================================================
// Discovery Phase Failures
// =============================================================================

#[tokio::test]
async fn test_listing_failure_propagates_server_message() {
    let registry = MockRegistry::start().await;
    registry.set_list_error(503, Some("registry is down"));

    let client = StyleClient::new(registry.gateway());
    let err = client.delete_styles_with_name("base").await.unwrap_err();

    assert_eq!(err.to_string(), "Couldn't list styles: registry is down");
}
