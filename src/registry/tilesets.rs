//! Tileset existence lookup.

use reqwest::Method;
use serde::Deserialize;

use crate::error::RegistryError;

use super::gateway::Gateway;

/// Path template for the tileset collection.
const TILESETS_TEMPLATE: &str = "/tilesets/v1/{user}";

/// The only field the lookup needs; the rest of the listing entry is ignored.
#[derive(Debug, Deserialize)]
struct TilesetSummary {
    id: String,
}

/// Client for tileset lookups, built on the [`Gateway`].
#[derive(Clone)]
pub struct TilesetClient {
    gateway: Gateway,
}

impl TilesetClient {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Check whether a tileset with the exact id exists in the account.
    ///
    /// The API offers no server-side point lookup, so this lists all tilesets
    /// and scans. Absence is a valid `false` result, never an error; only
    /// transport and decode failures are raised.
    pub async fn tileset_exists(&self, id: &str) -> Result<bool, RegistryError> {
        let request = self.gateway.request(Method::GET, TILESETS_TEMPLATE)?;
        let context = format!("Couldn't get tileset {}", id);
        let response = self.gateway.execute(request, &context).await?;

        let tilesets =
            response
                .json::<Vec<TilesetSummary>>()
                .await
                .map_err(|e| RegistryError::Decode {
                    context: "tileset list".to_string(),
                    reason: e.to_string(),
                })?;

        Ok(tilesets.iter().any(|ts| ts.id == id))
    }
}
