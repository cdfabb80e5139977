//! Style registry client: list, create, update, and point-fetch of styles.
//!
//! Styles are named rendering configurations held by the remote registry.
//! Names are not unique; several styles may share one. Nothing fetched here is
//! cached beyond the call that fetched it.

use reqwest::header::ETAG;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

use super::gateway::Gateway;

/// Path template for the style collection.
pub(crate) const STYLES_TEMPLATE: &str = "/styles/v1/{user}";

/// A style resource as returned by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    #[serde(default)]
    pub version: i32,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub modified: String,
}

/// Opaque concurrency token captured from a style fetch.
///
/// Valid only against the exact resource state observed at fetch time. It is
/// threaded explicitly from the read into the one conditional write that uses
/// it and dropped afterwards, never inferred from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Etag(String);

impl Etag {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Client for style resources, built on the [`Gateway`].
#[derive(Clone)]
pub struct StyleClient {
    pub(crate) gateway: Gateway,
}

impl StyleClient {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// List all styles in the account, in server-returned order.
    ///
    /// The order is whatever the registry produced for this one call and is
    /// not guaranteed stable across calls.
    pub async fn list_styles(&self) -> Result<Vec<Style>, RegistryError> {
        let request = self.gateway.request(Method::GET, STYLES_TEMPLATE)?;
        let response = self.gateway.execute(request, "Couldn't list styles").await?;
        response
            .json::<Vec<Style>>()
            .await
            .map_err(|e| RegistryError::Decode {
                context: "style list".to_string(),
                reason: e.to_string(),
            })
    }

    /// Create a style from a full style definition document.
    pub async fn create_style(&self, definition: &serde_json::Value) -> Result<(), RegistryError> {
        let request = self
            .gateway
            .request(Method::POST, STYLES_TEMPLATE)?
            .json(definition);
        self.gateway.execute(request, "Couldn't make style").await?;
        Ok(())
    }

    /// Unconditional partial update of a style.
    ///
    /// No concurrency check is performed here; callers that must not clobber
    /// concurrent modifications use the conditional-delete pattern instead.
    pub async fn update_style(
        &self,
        id: &str,
        definition: &serde_json::Value,
    ) -> Result<(), RegistryError> {
        let template = format!("{}/{}", STYLES_TEMPLATE, id);
        let request = self
            .gateway
            .request(Method::PATCH, &template)?
            .json(definition);
        self.gateway
            .execute(request, "Couldn't update style")
            .await?;
        Ok(())
    }

    /// Fetch one style by id together with its concurrency token.
    ///
    /// Returns `Ok(None)` when the registry reports 404: the style is already
    /// gone, which the deletion protocol treats as a non-error. A 2xx response
    /// without an `ETag` header violates the protocol and is fatal.
    pub async fn fetch_style(&self, id: &str) -> Result<Option<(Style, Etag)>, RegistryError> {
        let template = format!("{}/{}", STYLES_TEMPLATE, id);
        let request = self.gateway.request(Method::GET, &template)?;
        let response = request.send().await?;

        if response.status().as_u16() == 404 {
            return Ok(None);
        }
        let response = super::gateway::classify_response(response, "Failed to get style").await?;

        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(Etag::new)
            .ok_or_else(|| RegistryError::MissingEtag(id.to_string()))?;

        let style = response
            .json::<Style>()
            .await
            .map_err(|e| RegistryError::Decode {
                context: "style".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Some((style, etag)))
    }
}

// =============================================================================
// Tests
// =============================================================================
