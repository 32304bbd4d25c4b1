//! Permission tiers and bearer-credential inspection.
//!
//! The console trusts the credential as presented: the tier is derived
//! by decoding the token's claims segment locally, never by verifying
//! the signature (that is the server's job). Every view resolves the
//! tier through [`resolve_tier`], which is pure and synchronous so it
//! can run on any render path without caching concerns.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Authorization level derived from a bearer credential.
///
/// Ordered `None < User < Curator < Admin`. The ordinal comparison is
/// not the whole story: analytics read access and user-management
/// write access are independent capabilities, exposed as
/// [`Self::can_view_analytics`] and [`Self::can_manage_users`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionTier {
    /// No valid credential (missing, malformed, or lacking a role).
    None,
    /// Regular platform user - no console access.
    User,
    /// Curator - read access to reports and analytics.
    Curator,
    /// Administrator - full access including user management.
    Admin,
}

impl PermissionTier {
    /// Whether this tier meets a required minimum tier.
    #[must_use]
    pub fn is_authorized(self, minimum: Self) -> bool {
        self >= minimum
    }

    /// Whether this tier may read dashboard analytics.
    ///
    /// Curator and Admin are functionally equal for analytics access.
    #[must_use]
    pub const fn can_view_analytics(self) -> bool {
        matches!(self, Self::Curator | Self::Admin)
    }

    /// Whether this tier may mutate other users' roles or accounts.
    ///
    /// Strictly Admin-only.
    #[must_use]
    pub const fn can_manage_users(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for PermissionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::User => write!(f, "user"),
            Self::Curator => write!(f, "curator"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Resolve the permission tier carried by a raw bearer credential.
///
/// Splits the token into its three dot-separated segments, decodes the
/// middle (claims) segment from the URL-safe base64 alphabet, parses
/// it as JSON, and maps the `role` claim:
///
/// - `"admin"` maps to [`PermissionTier::Admin`], `"curator"` to
///   [`PermissionTier::Curator`], any other string to
///   [`PermissionTier::User`];
/// - legacy integer codes: `2` maps to Admin, `3` to Curator, any
///   other integer to User;
/// - a missing role, or any decoding failure, yields
///   [`PermissionTier::None`].
///
/// Never panics and never returns an error: a malformed credential is
/// an unauthenticated caller, not a fault to surface.
#[must_use]
pub fn resolve_tier(raw: Option<&str>) -> PermissionTier {
    raw.and_then(decode_role_claim)
        .map_or(PermissionTier::None, map_role_claim)
}

/// Extract the `role` claim from a token, if the token decodes at all.
fn decode_role_claim(token: &str) -> Option<serde_json::Value> {
    let claims_segment = token.split('.').nth(1)?;
    // Tokens in the wild are sometimes padded; the decoder is strict,
    // so strip padding before decoding with the unpadded engine.
    let bytes = URL_SAFE_NO_PAD
        .decode(claims_segment.trim_end_matches('='))
        .ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    payload.get("role").cloned()
}

/// Map a present `role` claim to a tier.
///
/// The legacy integer codes were applied inconsistently by older
/// clients; `2 -> Admin, 3 -> Curator` is the canonical mapping and is
/// used everywhere.
fn map_role_claim(role: serde_json::Value) -> PermissionTier {
    match role {
        serde_json::Value::String(s) => match s.as_str() {
            "admin" => PermissionTier::Admin,
            "curator" => PermissionTier::Curator,
            _ => PermissionTier::User,
        },
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(2) => PermissionTier::Admin,
            Some(3) => PermissionTier::Curator,
            _ => PermissionTier::User,
        },
        _ => PermissionTier::User,
    }
}
