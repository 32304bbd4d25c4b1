//! Server-owned record types held by the console.
//!
//! The console keeps a read-through copy of the current page only; the
//! server stays authoritative. Wire structs tolerate unknown fields
//! because the backend envelopes carry pagination URLs and other
//! extras the console never reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::filter::Filterable;
use super::id::{CategoryId, ReportId, RoleId, StatusId, UserId};

/// A report's workflow status as labeled by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: StatusId,
    /// Server-side display label (e.g., "pendente", "resolvido").
    pub status: String,
}

/// A category a report is tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Server-side display label.
    pub category: String,
}

/// Technical detail attached to a report, fetched lazily.
///
/// Absent until a curator adds it; the detail endpoint returning 404
/// is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDetail {
    pub technical_description: String,
    pub priority: String,
    pub resolution_notes: String,
    pub estimated_cost: f64,
}

/// A citizen report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub location: String,
    /// Storage path of the attached photo, if any.
    #[serde(default)]
    pub photo: Option<String>,
    /// When the reported issue was observed.
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub status: Status,
    pub categories: Vec<Category>,
    /// Lazily-fetched technical detail; never present in list responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ReportDetail>,
}

impl Filterable for Report {
    fn text_fields(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(|c| c.category.as_str())
            .chain(std::iter::once(self.location.as_str()))
            .collect()
    }

    fn status_id(&self) -> Option<StatusId> {
        Some(self.status.id)
    }

    fn category_ids(&self) -> Vec<CategoryId> {
        self.categories.iter().map(|c| c.id).collect()
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.date
    }
}

/// A platform role as labeled by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    /// Server-side display label.
    pub role: String,
}

/// A registered user's postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub cp: String,
    pub city: String,
}

/// A registered platform user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub telephone: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Filterable for User {
    fn text_fields(&self) -> Vec<&str> {
        vec![
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
        ]
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_deserializes_server_envelope_fields() {
        // List responses carry pivot tables and timestamps the console ignores.
        let json = serde_json::json!({
            "id": 12,
            "location": "Rua Augusta 5",
            "photo": "reports/12.jpg",
            "date": "2025-04-02T10:30:00Z",
            "user_id": 3,
            "status_id": 1,
            "created_at": "2025-04-02T10:31:00Z",
            "updated_at": "2025-04-03T08:00:00Z",
            "status": {"id": 1, "status": "pendente", "created_at": "2024-01-01T00:00:00Z"},
            "categories": [
                {"id": 2, "category": "estradas", "pivot": {"report_id": 12, "category_id": 2}}
            ]
        });

        let report: Report = serde_json::from_value(json).expect("deserialize report");
        assert_eq!(report.id, ReportId::new(12));
        assert_eq!(report.status.id, StatusId::new(1));
        assert_eq!(report.categories.len(), 1);
        assert!(report.detail.is_none());
    }

    #[test]
    fn test_user_optional_fields_default() {
        let json = serde_json::json!({
            "id": 4,
            "first_name": "Ana",
            "last_name": "Silva",
            "email": "ana@example.com",
            "role": {"id": 2, "role": "curador"},
            "created_at": "2025-01-15T12:00:00Z"
        });

        let user: User = serde_json::from_value(json).expect("deserialize user");
        assert!(user.telephone.is_none());
        assert!(user.address.is_none());
        assert_eq!(user.full_name(), "Ana Silva");
    }
}
