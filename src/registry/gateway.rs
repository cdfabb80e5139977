//! Authenticated request gateway for the map registry API.
//!
//! The gateway owns the three concerns every registry call shares: building an
//! endpoint URL from a path template, executing exactly one HTTP exchange, and
//! classifying the response into payload-or-error. It performs no retries and
//! keeps no state between calls.

use reqwest::{Method, RequestBuilder, Response};
use url::Url;

use crate::error::RegistryError;

/// Default production API base.
pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Placeholder substituted with the account username in path templates.
const USER_PLACEHOLDER: &str = "{user}";

/// Query parameter carrying the access credential on every request.
const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Shared HTTP layer for all registry clients.
///
/// Cheap to clone; the underlying `reqwest::Client` is reference-counted.
#[derive(Clone)]
pub struct Gateway {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    access_token: String,
}

impl Gateway {
    /// Create a gateway against the production API.
    ///
    /// Fails if the access token or username is empty.
    pub fn new(access_token: &str, username: &str) -> Result<Self, RegistryError> {
        Self::with_base_url(access_token, username, DEFAULT_BASE_URL)
    }

    /// Create a gateway against a custom API base (used by tests).
    pub fn with_base_url(
        access_token: &str,
        username: &str,
        base_url: &str,
    ) -> Result<Self, RegistryError> {
        if access_token.is_empty() {
            return Err(RegistryError::Endpoint {
                template: String::new(),
                reason: "empty access token".to_string(),
            });
        }
        if username.is_empty() {
            return Err(RegistryError::Endpoint {
                template: String::new(),
                reason: "empty username".to_string(),
            });
        }
        let base_url = Url::parse(base_url).map_err(|e| RegistryError::Endpoint {
            template: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            username: username.to_string(),
            access_token: access_token.to_string(),
        })
    }

    /// Build an authenticated endpoint URL from a path template.
    ///
    /// Substitutes `{user}` with the account username and appends the access
    /// token as a query parameter. The only failure mode is a template that
    /// does not join into a valid URL, which is a programmer error.
    pub fn endpoint(&self, template: &str) -> Result<Url, RegistryError> {
        let path = template.replace(USER_PLACEHOLDER, &self.username);
        let mut url = self
            .base_url
            .join(&path)
            .map_err(|e| RegistryError::Endpoint {
                template: template.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair(ACCESS_TOKEN_PARAM, &self.access_token);
        Ok(url)
    }

    /// Start a request against a path template.
    pub fn request(&self, method: Method, template: &str) -> Result<RequestBuilder, RegistryError> {
        let url = self.endpoint(template)?;
        Ok(self.http.request(method, url))
    }

    /// Execute one exchange and classify the outcome.
    ///
    /// Connection-level failures surface as `Transport`. A 2xx response is
    /// returned as-is; anything else becomes a `RegistryError` whose message
    /// is `"<context>: <server message>"` when the body carries a decodable
    /// `{"message": …}` field, or `"<context> (HTTP <code>)"` otherwise.
    pub async fn execute(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<Response, RegistryError> {
        let response = request.send().await?;
        classify_response(response, context).await
    }
}

/// Server error payload convention: a JSON object with a `message` string.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pass a 2xx response through, turn everything else into a `RegistryError`.
pub async fn classify_response(
    response: Response,
    context: &str,
) -> Result<Response, RegistryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // Best effort: the error body may be absent or not follow the convention.
    let fallback = RegistryError::Status {
        context: context.to_string(),
        status: status.as_u16(),
    };
    let body = match response.text().await {
        Ok(body) => body,
        Err(_) => return Err(fallback),
    };
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(contents) => Err(RegistryError::Api {
            context: context.to_string(),
            message: contents.message,
        }),
        Err(_) => Err(fallback),
    }
}

// =============================================================================
// Tests
// =============================================================================
