//! Core types for the Reporta admin console.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod filter;
pub mod id;
pub mod metrics;
pub mod record;
pub mod tier;

pub use filter::{FilterCriteria, Filterable, apply_criteria};
pub use id::*;
pub use metrics::{
    CategoryCount, CategoryMetrics, CategoryResolution, FinancialMetrics, MetricBundle,
    MetricSource, MonthlyCount, OverviewMetrics, ResolutionMetrics, UserActivity, UserMetrics,
    UserRanking,
};
pub use record::{Address, Category, Report, ReportDetail, Role, Status, User};
pub use tier::{PermissionTier, resolve_tier};
