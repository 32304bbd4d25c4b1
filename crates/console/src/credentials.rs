//! The injectable credential store.
//!
//! The bearer credential is created externally at login and destroyed
//! at logout; this store owns only its lifecycle inside the console
//! process. Modeling it as an explicitly passed value (rather than
//! ambient global state) keeps the credential inspector pure and every
//! consumer testable.

use std::sync::{Arc, PoisonError, RwLock};

use reporta_core::{PermissionTier, resolve_tier};
use secrecy::{ExposeSecret, SecretString};

/// Shared, cloneable handle to the current bearer credential.
///
/// Read-mostly: every authorization check reads, only login/logout
/// write. Clones share the same underlying slot.
#[derive(Clone, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<Option<SecretString>>>,
}

impl CredentialStore {
    /// Create an empty store (no credential, tier `None`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a credential (login).
    pub fn set(&self, token: SecretString) {
        *self.write_slot() = Some(token);
    }

    /// Clear the credential (logout).
    pub fn clear(&self) {
        *self.write_slot() = None;
    }

    /// Whether a credential is currently stored.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.read_slot().is_some()
    }

    /// A copy of the stored credential, if any.
    #[must_use]
    pub fn get(&self) -> Option<SecretString> {
        self.read_slot().clone()
    }

    /// Resolve the permission tier of the stored credential.
    ///
    /// A missing or malformed credential resolves to
    /// [`PermissionTier::None`]; this never fails.
    #[must_use]
    pub fn tier(&self) -> PermissionTier {
        let guard = self.read_slot();
        resolve_tier(guard.as_ref().map(ExposeSecret::expose_secret))
    }

    fn read_slot(&self) -> std::sync::RwLockReadGuard<'_, Option<SecretString>> {
        // A poisoned lock only means a panicked reader/writer; the
        // stored value is still the last coherent write.
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slot(&self) -> std::sync::RwLockWriteGuard<'_, Option<SecretString>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("credential", &self.is_set().then_some("[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_is_unauthenticated() {
        let store = CredentialStore::new();
        assert!(!store.is_set());
        assert_eq!(store.tier(), PermissionTier::None);
    }

    #[test]
    fn test_lifecycle_set_then_clear() {
        let store = CredentialStore::new();
        store.set(SecretString::from("some.opaque.token"));
        assert!(store.is_set());

        store.clear();
        assert!(!store.is_set());
        assert_eq!(store.tier(), PermissionTier::None);
    }

    #[test]
    fn test_clones_share_the_slot() {
        let store = CredentialStore::new();
        let handle = store.clone();
        store.set(SecretString::from("t"));
        assert!(handle.is_set());
        handle.clear();
        assert!(!store.is_set());
    }

    #[test]
    fn test_debug_redacts_credential() {
        let store = CredentialStore::new();
        store.set(SecretString::from("super-secret-token"));
        let rendered = format!("{store:?}");
        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("REDACTED"));
    }
}
