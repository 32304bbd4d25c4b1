//! Remote access to user management.
//!
//! All user-management endpoints live under `/api/admin` and are
//! admin-gated server-side; the shell additionally hides them from
//! non-admin tiers via [`can_manage_users`].
//!
//! [`can_manage_users`]: reporta_core::PermissionTier::can_manage_users

use serde::{Deserialize, Serialize};
use tracing::instrument;

use reporta_core::{RoleId, User, UserId};

use crate::api::ApiClient;
use crate::collection::{Page, PageSource};
use crate::error::ApiError;

/// User-management endpoint group.
#[derive(Debug, Clone)]
pub struct UsersApi {
    api: ApiClient,
}

#[derive(Serialize)]
struct RoleChange {
    role_id: RoleId,
}

/// The role endpoint wraps the updated record in a `user` envelope.
#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

impl UsersApi {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Change a user's platform role.
    ///
    /// Returns the updated user as the server now sees it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the caller's tier is
    /// rejected.
    #[instrument(skip(self))]
    pub async fn update_role(&self, id: UserId, role_id: RoleId) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self
            .api
            .put(&format!("/api/admin/users/{id}/role"), &RoleChange { role_id })
            .await?;
        Ok(envelope.user)
    }

    /// Delete a user account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the caller's tier is
    /// rejected.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<(), ApiError> {
        self.api.delete(&format!("/api/admin/users/{id}")).await
    }
}

impl PageSource for UsersApi {
    type Record = User;

    async fn fetch_page(&self, page: u32) -> Result<Page<User>, ApiError> {
        self.api.get(&format!("/api/admin/users?page={page}")).await
    }
}
