//! Reporta backend API client.
//!
//! A thin `reqwest` wrapper shared by every data-access component.
//! Attaches the bearer credential from the [`CredentialStore`] on each
//! request, maps non-success responses through the error taxonomy, and
//! owns the login/logout session operations.
//!
//! Diagnostic `{error, debug}` fields returned by the backend are
//! surfaced as text only - never executed or interpreted.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use reporta_core::PermissionTier;

use crate::config::ConsoleConfig;
use crate::credentials::CredentialStore;
use crate::error::ApiError;

/// Reporta backend API client.
///
/// Cheap to clone; clones share the underlying HTTP client and
/// credential store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    credentials: CredentialStore,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Diagnostic body shape the backend uses for failed requests.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    debug: Option<String>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ConsoleConfig, credentials: CredentialStore) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url_trimmed(),
                credentials,
            }),
        })
    }

    /// The credential store this client reads from.
    #[must_use]
    pub fn credentials(&self) -> &CredentialStore {
        &self.inner.credentials
    }

    /// The permission tier of the currently stored credential.
    #[must_use]
    pub fn tier(&self) -> PermissionTier {
        self.inner.credentials.tier()
    }

    /// Sign in with email and password.
    ///
    /// On success the backend returns a bearer token; the console
    /// resolves its tier locally and admits only curators and admins.
    /// A non-staff account is rejected and nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::StaffOnly`] for a valid but non-staff
    /// account, or the mapped backend error for rejected credentials.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<PermissionTier, ApiError> {
        let url = format!("{}/api/login", self.inner.base_url);
        let response = self
            .inner
            .client
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let login: LoginResponse = self.handle_response(response).await?;

        let tier = reporta_core::resolve_tier(Some(&login.token));
        if tier.can_view_analytics() {
            self.inner.credentials.set(SecretString::from(login.token));
            tracing::info!(%tier, "signed in");
            Ok(tier)
        } else {
            // Regular users belong on the mobile app, not this console.
            self.inner.credentials.clear();
            Err(ApiError::StaffOnly)
        }
    }

    /// Sign out, clearing the stored credential.
    pub fn logout(&self) {
        self.inner.credentials.clear();
        tracing::info!("signed out");
    }

    /// Execute a GET request against the backend.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).send().await?;
        self.handle_response(response).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: serde::de::DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Execute a PUT request with a JSON body.
    pub(crate) async fn put<T: serde::de::DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Execute a PATCH request with a JSON body.
    pub(crate) async fn patch<T: serde::de::DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::PATCH, path).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Execute a DELETE request.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, path).send().await?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(Self::map_error(response).await)
    }

    /// Build a request with the bearer credential attached when one is
    /// stored.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.inner.base_url);
        let builder = self.inner.client.request(method, &url);
        match self.inner.credentials.get() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Parse a successful response's JSON body, or map the failure.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        if response.status().is_success() {
            return response
                .json()
                .await
                .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")));
        }
        Err(Self::map_error(response).await)
    }

    /// Map a non-success response to the error taxonomy.
    ///
    /// 403 means the caller's tier was rejected. Anything else keeps
    /// its status and, when the body carries `{error, debug}`, the
    /// `error` text as a diagnostic; `debug` is logged only.
    async fn map_error(response: reqwest::Response) -> ApiError {
        let status = response.status();

        if status == StatusCode::FORBIDDEN {
            return ApiError::Forbidden;
        }

        let url = response.url().clone();
        let detail = match response.text().await {
            Ok(body) => match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => {
                    if let Some(diagnostic) = parsed.debug {
                        tracing::debug!(%url, debug = diagnostic, "backend diagnostic");
                    }
                    parsed.error
                }
                Err(_) => None,
            },
            Err(_) => None,
        };

        ApiError::Api {
            status: status.as_u16(),
            detail,
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}
