//! Conditional deletion of styles by name.
//!
//! Deleting "every style named X" is racy: another actor may rename, replace,
//! or delete a style between our listing and our delete, and the registry is
//! known to report transient 404s for resources it just created or deleted.
//! Instead of locking (the API has none), deletion runs in three strictly
//! ordered phases:
//!
//! 1. **Discovery** — list all styles and keep the exact name matches.
//! 2. **Verification** — re-fetch each candidate by id, capturing its
//!    concurrency token. Candidates that vanished or were renamed away since
//!    discovery are dropped without error.
//! 3. **Conditional delete** — delete each verified candidate with
//!    `If-Match` set to the captured token. A precondition failure means we
//!    lost a race to another actor and is absorbed, as is a 404.
//!
//! Separating "decide what to delete" from "delete it" means the precondition
//! is checked against the freshest observed state at write time, which gives
//! lost-update protection without any lock.

use reqwest::header::IF_MATCH;
use reqwest::Method;
use tracing::{debug, info};

use crate::error::RegistryError;

use super::styles::{Etag, StyleClient, STYLES_TEMPLATE};

impl StyleClient {
    /// Delete every style whose name equals `name` exactly (case-sensitive).
    ///
    /// Returns the number of styles actually deleted; zero matches is a
    /// successful outcome, not an error. Deletions are independent: if the
    /// operation aborts partway, styles already deleted stay deleted.
    pub async fn delete_styles_with_name(&self, name: &str) -> Result<usize, RegistryError> {
        // Phase 1: discovery.
        let styles = self.list_styles().await?;
        let candidates: Vec<_> = styles.into_iter().filter(|s| s.name == name).collect();

        // Phase 2: verification and token capture, in discovery order.
        let mut verified: Vec<(String, Etag)> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self.fetch_style(&candidate.id).await? {
                None => {
                    // Already gone; nothing to delete.
                    debug!(id = %candidate.id, "style vanished before verification");
                }
                Some((style, _)) if style.name != name => {
                    // Renamed away since discovery; no longer a target.
                    debug!(id = %candidate.id, new_name = %style.name, "style renamed, excluding");
                }
                Some((_, etag)) => verified.push((candidate.id, etag)),
            }
        }

        // Phase 3: conditional delete.
        let mut deleted = 0;
        for (id, etag) in verified {
            if self.delete_style_if_match(&id, &etag).await? {
                deleted += 1;
            }
        }

        info!("Deleted {} styles", deleted);
        Ok(deleted)
    }

    /// Delete one style conditioned on its concurrency token.
    ///
    /// Returns whether the style was deleted. A 412 means the token went
    /// stale (another actor changed the style after our verification fetch);
    /// a 404 is the registry's known inconsistency window for just-deleted
    /// resources. Both are expected race outcomes, not failures.
    async fn delete_style_if_match(&self, id: &str, etag: &Etag) -> Result<bool, RegistryError> {
        let template = format!("{}/{}", STYLES_TEMPLATE, id);
        let request = self
            .gateway
            .request(Method::DELETE, &template)?
            .header(IF_MATCH, etag.as_str());
        let response = request.send().await?;

        match response.status().as_u16() {
            412 => {
                debug!(id, "precondition failed, lost delete race");
                Ok(false)
            }
            404 => {
                // This sometimes happens. There's something wrong with the API...
                debug!(id, "style not found on delete");
                Ok(false)
            }
            _ => {
                let context = format!("Failed to delete style {}", id);
                super::gateway::classify_response(response, &context).await?;
                Ok(true)
            }
        }
    }
}
