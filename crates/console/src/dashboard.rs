//! Dashboard metric aggregation with per-source failure isolation.
//!
//! Five analytics endpoints are fetched concurrently; each outcome
//! lands in its own [`MetricBundle`] slot. A failing source leaves its
//! slot `None` and contributes a [`SourceFailure`], without aborting
//! the others. The snapshot is a full replacement every time - refresh
//! is simply another [`Dashboard::load_bundle`] call.

use chrono::{NaiveDate, Utc};
use tracing::instrument;

use reporta_core::{
    CategoryMetrics, FinancialMetrics, MetricBundle, MetricSource, OverviewMetrics,
    ResolutionMetrics, UserMetrics,
};

use crate::api::ApiClient;
use crate::error::ApiError;

/// Why one analytics source failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The caller's tier was rejected for this source.
    Forbidden,
    /// The source itself faulted (transport, server error, bad body).
    SourceError,
}

/// One source's recorded failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source: MetricSource,
    pub kind: FailureKind,
    /// User-presentable text; backend `debug` diagnostics are logged,
    /// never carried here.
    pub message: String,
}

/// Aggregate outcome of one bundle load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleOutcome {
    /// Every source failed; there is nothing to display.
    Failed,
    /// Some sources failed; the loaded slots are still displayable.
    Partial,
    /// Every slot is filled.
    Loaded,
}

/// The result of one [`Dashboard::load_bundle`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub bundle: MetricBundle,
    pub failures: Vec<SourceFailure>,
}

impl DashboardSnapshot {
    /// Classify this snapshot for display.
    #[must_use]
    pub fn outcome(&self) -> BundleOutcome {
        if self.bundle.is_empty() {
            BundleOutcome::Failed
        } else if self.failures.is_empty() {
            BundleOutcome::Loaded
        } else {
            BundleOutcome::Partial
        }
    }

    /// Serialize the current bundle to an export artifact, named from
    /// today's date.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundle fails to serialize.
    pub fn export(&self) -> Result<ExportArtifact, serde_json::Error> {
        self.export_for_date(Utc::now().date_naive())
    }

    /// Serialize the current bundle as-is, null slots included, to a
    /// JSON artifact named `dashboard-report-YYYY-MM-DD.json`.
    ///
    /// Exports exactly what is in hand; no re-fetching.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundle fails to serialize.
    pub fn export_for_date(&self, date: NaiveDate) -> Result<ExportArtifact, serde_json::Error> {
        Ok(ExportArtifact {
            file_name: format!("dashboard-report-{}.json", date.format("%Y-%m-%d")),
            content: serde_json::to_string_pretty(&self.bundle)?,
        })
    }
}

/// An in-memory export; writing it anywhere is the shell's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content: String,
}

/// Dashboard analytics endpoint group.
#[derive(Debug, Clone)]
pub struct Dashboard {
    api: ApiClient,
}

impl Dashboard {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Load all five analytics sources concurrently.
    ///
    /// Never fails as a whole: each source's failure is recorded in
    /// the snapshot and leaves its slot `None`.
    #[instrument(skip(self))]
    pub async fn load_bundle(&self) -> DashboardSnapshot {
        let (overview, resolution, categories, users, financial) = tokio::join!(
            self.fetch::<OverviewMetrics>(MetricSource::Overview),
            self.fetch::<ResolutionMetrics>(MetricSource::Resolution),
            self.fetch::<CategoryMetrics>(MetricSource::Categories),
            self.fetch::<UserMetrics>(MetricSource::Users),
            self.fetch::<FinancialMetrics>(MetricSource::Financial),
        );

        let mut failures = Vec::new();
        let bundle = MetricBundle {
            overview: Self::settle(MetricSource::Overview, overview, &mut failures),
            resolution: Self::settle(MetricSource::Resolution, resolution, &mut failures),
            categories: Self::settle(MetricSource::Categories, categories, &mut failures),
            users: Self::settle(MetricSource::Users, users, &mut failures),
            financial: Self::settle(MetricSource::Financial, financial, &mut failures),
        };

        if !failures.is_empty() {
            tracing::warn!(
                failed = failures.len(),
                loaded = bundle.loaded_count(),
                "dashboard bundle degraded"
            );
        }

        DashboardSnapshot { bundle, failures }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        source: MetricSource,
    ) -> Result<T, ApiError> {
        self.api
            .get(&format!("/api/admin/dashboard/{source}"))
            .await
    }

    /// Fold one source's result into its slot, recording any failure.
    fn settle<T>(
        source: MetricSource,
        result: Result<T, ApiError>,
        failures: &mut Vec<SourceFailure>,
    ) -> Option<T> {
        match result {
            Ok(metrics) => Some(metrics),
            Err(e) => {
                let kind = if e.is_forbidden() {
                    FailureKind::Forbidden
                } else {
                    FailureKind::SourceError
                };
                tracing::warn!(%source, error = %e, "metric source failed");
                failures.push(SourceFailure {
                    source,
                    kind,
                    message: e.to_string(),
                });
                None
            }
        }
    }
}
