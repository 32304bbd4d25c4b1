//! Dashboard metric types and the partial-failure metric bundle.
//!
//! The dashboard is assembled from five independent analytics sources.
//! Each occupies one slot of the [`MetricBundle`]; a slot is `None`
//! exactly when its source failed or has not completed yet. The bundle
//! never treats the five sources as one atomic request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Headline platform counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewMetrics {
    pub total_reports: i64,
    pub total_users: i64,
    pub total_categories: i64,
    /// Report counts keyed by status label.
    pub reports_by_status: BTreeMap<String, i64>,
    pub reports_last_30_days: i64,
    /// Percentage of reports resolved.
    pub resolution_rate: f64,
    pub resolved_reports: i64,
    pub pending_reports: i64,
}

/// One month's resolved-report count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: i64,
}

/// Resolution-time analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionMetrics {
    pub average_resolution_time_days: f64,
    pub resolved_by_month: Vec<MonthlyCount>,
    /// Report counts bucketed by time-to-resolution.
    pub resolution_time_distribution: BTreeMap<String, i64>,
}

/// Report count for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: i64,
}

/// Resolution performance for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResolution {
    pub name: String,
    pub total: i64,
    pub resolved: i64,
    pub resolution_rate: f64,
}

/// Per-category analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMetrics {
    pub reports_by_category: Vec<CategoryCount>,
    pub resolution_rate_by_category: Vec<CategoryResolution>,
}

/// A user's position in the reporting leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRanking {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub reports_count: i64,
    pub points: i64,
}

/// A user's recent reporting activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivity {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub recent_reports: i64,
}

/// Per-user analytics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetrics {
    pub top_users_by_reports: Vec<UserRanking>,
    pub active_users_last_30_days: Vec<UserActivity>,
    /// User counts bucketed by points range.
    pub points_distribution: BTreeMap<String, i64>,
}

/// Estimated-cost analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    pub total_estimated_cost: f64,
    pub average_cost_per_report: f64,
}

/// The fixed, ordered set of dashboard analytics sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSource {
    Overview,
    Resolution,
    Categories,
    Users,
    Financial,
}

impl MetricSource {
    /// All sources in bundle order.
    pub const ALL: [Self; 5] = [
        Self::Overview,
        Self::Resolution,
        Self::Categories,
        Self::Users,
        Self::Financial,
    ];

    /// The source's endpoint path segment.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Resolution => "resolution",
            Self::Categories => "categories",
            Self::Users => "users",
            Self::Financial => "financial",
        }
    }
}

impl std::fmt::Display for MetricSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One slot per analytics source, each independently nullable.
///
/// Serializes null slots as explicit `null`s so an exported bundle
/// records exactly what was (and was not) loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricBundle {
    pub overview: Option<OverviewMetrics>,
    pub resolution: Option<ResolutionMetrics>,
    pub categories: Option<CategoryMetrics>,
    pub users: Option<UserMetrics>,
    pub financial: Option<FinancialMetrics>,
}

impl MetricBundle {
    /// Whether a given source's slot is filled.
    #[must_use]
    pub const fn has(&self, source: MetricSource) -> bool {
        match source {
            MetricSource::Overview => self.overview.is_some(),
            MetricSource::Resolution => self.resolution.is_some(),
            MetricSource::Categories => self.categories.is_some(),
            MetricSource::Users => self.users.is_some(),
            MetricSource::Financial => self.financial.is_some(),
        }
    }

    /// Number of filled slots.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        MetricSource::ALL.iter().filter(|s| self.has(**s)).count()
    }

    /// The bundle is fully loaded only when every slot is filled.
    #[must_use]
    pub fn is_fully_loaded(&self) -> bool {
        self.loaded_count() == MetricSource::ALL.len()
    }

    /// No source produced any data at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaded_count() == 0
    }
}
