//! Reporta Console - data-access layer for the admin console.
//!
//! This crate is the only part of the console with non-trivial logic:
//! it resolves a permission tier from the stored bearer credential,
//! wraps the server-paginated collection endpoints (reports, users)
//! with client-side multi-facet filtering, and aggregates the five
//! dashboard analytics sources with per-source failure isolation.
//! Page layout and rendering are external collaborators that call into
//! this crate and display whatever it returns.
//!
//! # Architecture
//!
//! - [`credentials::CredentialStore`] - injectable credential lifecycle
//!   (set at login, cleared at logout, read on demand)
//! - [`api::ApiClient`] - shared `reqwest` client with bearer auth and
//!   the error taxonomy
//! - [`collection::CollectionView`] - per-view page loading state
//!   machine plus local filtering
//! - [`dashboard::Dashboard`] - partial-failure metric aggregation and
//!   export
//!
//! The credential is trusted as presented; signature verification is
//! the server's responsibility.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod collection;
pub mod config;
pub mod credentials;
pub mod dashboard;
pub mod error;
pub mod reports;
pub mod users;

pub use api::ApiClient;
pub use collection::{CollectionView, LoadState, Page, PageMeta, PageSource};
pub use config::{ConfigError, ConsoleConfig};
pub use credentials::CredentialStore;
pub use dashboard::{
    BundleOutcome, Dashboard, DashboardSnapshot, ExportArtifact, FailureKind, SourceFailure,
};
pub use error::ApiError;
pub use reports::ReportsApi;
pub use users::UsersApi;
