//! Reporta Core - Shared types library.
//!
//! This crate provides the common types used across the Reporta admin
//! console components:
//! - `console` - The data-access layer behind the admin UI
//! - `integration-tests` - End-to-end tests against a mock backend
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere, including synchronous UI render paths.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, the permission tier, records, filter
//!   criteria, and dashboard metric types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
