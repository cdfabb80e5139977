//! Tileset upload handshake: staging credentials and job registration.
//!
//! Publishing a tileset is a two-step protocol. First the registry hands out
//! short-lived, write-only AWS credentials scoped to a single staging object;
//! then, after the archive has been written there (by [`crate::storage`] or
//! any external uploader), an upload job is registered pointing at that
//! object. This client performs only the two registry calls; it never touches
//! storage itself.

use std::fmt;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

use super::gateway::Gateway;

/// Path template for the upload collection.
const UPLOADS_TEMPLATE: &str = "/uploads/v1/{user}";

/// Path template for staging credentials.
const CREDENTIALS_TEMPLATE: &str = "/uploads/v1/{user}/credentials";

/// Short-lived staging credentials returned by the registry.
///
/// Single-use and scoped to one object. They are held only for the duration
/// of the handshake and must never be persisted. `Debug` redacts the secret
/// fields so they cannot leak through log output.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub bucket: String,
    pub key: String,
    pub url: String,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("key", &self.key)
            .field("url", &self.url)
            .finish()
    }
}

/// Registration request telling the registry to ingest a staged object as a
/// named tileset. Not a stored entity; it exists only as a request body.
#[derive(Debug, Clone, Serialize)]
pub struct UploadJob {
    pub name: String,
    pub tileset: String,
    pub url: String,
}

/// Client for the upload handshake, built on the [`Gateway`].
#[derive(Clone)]
pub struct UploadClient {
    gateway: Gateway,
}

impl UploadClient {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Request short-lived staging credentials.
    pub async fn request_credentials(&self) -> Result<AwsCredentials, RegistryError> {
        let request = self.gateway.request(Method::POST, CREDENTIALS_TEMPLATE)?;
        let response = self
            .gateway
            .execute(request, "Couldn't make AWS creds")
            .await?;
        response
            .json::<AwsCredentials>()
            .await
            .map_err(|e| RegistryError::Decode {
                context: "staging credentials".to_string(),
                reason: e.to_string(),
            })
    }

    /// Register an upload job for a staged object.
    ///
    /// `storage_url` is the staging URL from the credentials the object was
    /// written with.
    pub async fn register_upload(
        &self,
        tileset_id: &str,
        tileset_name: &str,
        storage_url: &str,
    ) -> Result<(), RegistryError> {
        let job = UploadJob {
            name: tileset_name.to_string(),
            tileset: tileset_id.to_string(),
            url: storage_url.to_string(),
        };
        let request = self
            .gateway
            .request(Method::POST, UPLOADS_TEMPLATE)?
            .json(&job);
        self.gateway
            .execute(request, "Couldn't create upload")
            .await?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
