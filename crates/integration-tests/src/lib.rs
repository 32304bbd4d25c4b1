//! Integration tests for the Reporta console data-access layer.
//!
//! Every test runs against a `wiremock` mock backend; no real server
//! or credentials are required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p reporta-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth` - Login/logout flow and bearer-credential handling
//! - `reports_collection` - Paginated reports view and local filtering
//! - `users_management` - Admin user-management endpoints
//! - `dashboard` - Partial-failure metric aggregation and export

use std::sync::Once;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use url::Url;

use reporta_console::{ApiClient, ConsoleConfig, CredentialStore};

static INIT: Once = Once::new();

/// Install a process-wide test subscriber (idempotent).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Build an unsigned bearer token carrying the given payload claims.
///
/// The console inspects the payload segment only; the signature is the
/// server's concern and a placeholder suffices here.
#[must_use]
pub fn token_with_claims(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.test-signature")
}

/// Token whose `role` claim is the given string.
#[must_use]
pub fn token_for_role(role: &str) -> String {
    token_with_claims(&serde_json::json!({ "sub": 1, "role": role }))
}

/// An API client pointed at a mock backend, with an empty credential
/// store.
#[must_use]
pub fn client_for(server_uri: &str) -> ApiClient {
    init_tracing();
    let config = ConsoleConfig::new(Url::parse(server_uri).expect("mock server uri parses"));
    ApiClient::new(&config, CredentialStore::new()).expect("client builds")
}

/// One report object as the backend's list endpoint renders it,
/// envelope extras included.
#[must_use]
pub fn report_json(id: i64, location: &str, status_id: i64, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "location": location,
        "photo": null,
        "date": "2025-03-10T09:00:00Z",
        "user_id": 1,
        "status_id": status_id,
        "created_at": "2025-03-10T09:01:00Z",
        "updated_at": "2025-03-10T09:01:00Z",
        "status": { "id": status_id, "status": status },
        "categories": [
            {
                "id": 1,
                "category": "estradas",
                "pivot": { "report_id": id, "category_id": 1 }
            }
        ]
    })
}

/// A paginated collection envelope in the backend's shape.
#[must_use]
pub fn page_json(
    data: Vec<serde_json::Value>,
    current_page: u32,
    last_page: u32,
    total: u64,
) -> serde_json::Value {
    serde_json::json!({
        "data": data,
        "current_page": current_page,
        "last_page": last_page,
        "total": total,
        "per_page": 10,
        "next_page_url": if current_page < last_page {
            serde_json::Value::from(format!("?page={}", current_page + 1))
        } else {
            serde_json::Value::Null
        }
    })
}
