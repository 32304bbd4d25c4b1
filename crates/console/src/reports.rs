//! Remote access to the reports collection.
//!
//! Reports arrive paginated from `/api/reports`; technical details are
//! fetched lazily per report and are legitimately absent until a
//! curator writes them.

use serde::Serialize;
use tracing::instrument;

use reporta_core::{Report, ReportDetail, ReportId, StatusId};

use crate::api::ApiClient;
use crate::collection::{Page, PageSource};
use crate::error::ApiError;

/// Reports endpoint group.
#[derive(Debug, Clone)]
pub struct ReportsApi {
    api: ApiClient,
}

#[derive(Serialize)]
struct StatusChange {
    status_id: StatusId,
}

impl ReportsApi {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch one report by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the report does not
    /// exist.
    #[instrument(skip(self))]
    pub async fn report(&self, id: ReportId) -> Result<Report, ApiError> {
        self.api.get(&format!("/api/reports/{id}")).await
    }

    /// Fetch the technical detail attached to a report, if any.
    ///
    /// A report without detail is a normal outcome: the backend
    /// answers 404 and this resolves to `None`.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than an absent detail.
    #[instrument(skip(self))]
    pub async fn detail(&self, id: ReportId) -> Result<Option<ReportDetail>, ApiError> {
        match self.api.get(&format!("/api/reports/{id}/details")).await {
            Ok(detail) => Ok(Some(detail)),
            Err(ApiError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Move a report to a new workflow status.
    ///
    /// Returns the updated report as the server now sees it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the caller's tier is
    /// rejected.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: ReportId,
        status_id: StatusId,
    ) -> Result<Report, ApiError> {
        self.api
            .patch(&format!("/api/reports/{id}/status"), &StatusChange { status_id })
            .await
    }

    /// Attach technical detail to a report that has none yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the caller's tier is
    /// rejected.
    #[instrument(skip(self, detail))]
    pub async fn create_detail(
        &self,
        id: ReportId,
        detail: &ReportDetail,
    ) -> Result<ReportDetail, ApiError> {
        self.api
            .post(&format!("/api/reports/{id}/details"), detail)
            .await
    }

    /// Replace a report's existing technical detail.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the caller's tier is
    /// rejected.
    #[instrument(skip(self, detail))]
    pub async fn update_detail(
        &self,
        id: ReportId,
        detail: &ReportDetail,
    ) -> Result<ReportDetail, ApiError> {
        self.api
            .patch(&format!("/api/reports/{id}/details"), detail)
            .await
    }
}

impl PageSource for ReportsApi {
    type Record = Report;

    async fn fetch_page(&self, page: u32) -> Result<Page<Report>, ApiError> {
        self.api.get(&format!("/api/reports?page={page}")).await
    }
}
