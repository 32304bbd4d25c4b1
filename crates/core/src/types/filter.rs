//! Client-side multi-facet filtering over a loaded page of records.
//!
//! Filtering is deliberately local: criteria apply to the records the
//! collection view has already fetched, never triggering additional
//! server requests. All active predicates are AND-combined.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, StatusId};

/// A record that the filter predicates know how to inspect.
pub trait Filterable {
    /// The free-text fields a search term is matched against.
    fn text_fields(&self) -> Vec<&str>;

    /// The record's status, if it has one.
    fn status_id(&self) -> Option<StatusId> {
        None
    }

    /// The record's category set, if it has one.
    fn category_ids(&self) -> Vec<CategoryId> {
        Vec::new()
    }

    /// The timestamp date-range predicates compare against.
    fn timestamp(&self) -> DateTime<Utc>;
}

/// The combination of search/status/category/date predicates.
///
/// The default value is the identity filter: it matches every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against any text field.
    pub term: Option<String>,
    /// Exact status match.
    pub status: Option<StatusId>,
    /// Matches when any of the record's categories equals this id.
    pub category: Option<CategoryId>,
    /// Inclusive start of the date range (from 00:00:00).
    pub date_from: Option<NaiveDate>,
    /// Inclusive end of the date range, normalized to 23:59:59.999 so
    /// a same-day start/end range covers the whole day.
    pub date_to: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Whether this is the identity filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.term.as_ref().is_none_or(|t| t.trim().is_empty())
            && self.status.is_none()
            && self.category.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// Whether a record satisfies every active predicate.
    #[must_use]
    pub fn matches<R: Filterable>(&self, record: &R) -> bool {
        if let Some(term) = self.term.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let needle = term.to_lowercase();
            let hit = record
                .text_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(status) = self.status
            && record.status_id() != Some(status)
        {
            return false;
        }

        if let Some(category) = self.category
            && !record.category_ids().contains(&category)
        {
            return false;
        }

        let ts = record.timestamp();
        if let Some(from) = self.date_from
            && ts < from.and_time(NaiveTime::MIN).and_utc()
        {
            return false;
        }
        if let Some(to) = self.date_to
            && ts > end_of_day(to)
        {
            return false;
        }

        true
    }
}

/// Apply criteria to a loaded record set, producing the filtered view.
///
/// The result is always a subset of `records`; applying the same
/// criteria twice yields the same subset.
#[must_use]
pub fn apply_criteria<R: Filterable + Clone>(records: &[R], criteria: &FilterCriteria) -> Vec<R> {
    records
        .iter()
        .filter(|r| criteria.matches(*r))
        .cloned()
        .collect()
}

/// Inclusive end bound for a date: 23:59:59.999 of that day.
fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last_moment = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(last_moment).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::{Category, Report, Status};

    fn report(id: i64, location: &str, status: i64, categories: &[i64], date: &str) -> Report {
        Report {
            id: id.into(),
            location: location.to_string(),
            photo: None,
            date: date.parse().expect("valid test date"),
            user_id: None,
            status: Status {
                id: status.into(),
                status: format!("status-{status}"),
            },
            categories: categories
                .iter()
                .map(|&c| Category {
                    id: c.into(),
                    category: format!("category-{c}"),
                })
                .collect(),
            detail: None,
        }
    }

    fn sample_page() -> Vec<Report> {
        vec![
            report(1, "Rua Augusta", 1, &[1, 2], "2025-03-01T09:00:00Z"),
            report(2, "Avenida da Liberdade", 2, &[2], "2025-03-05T15:30:00Z"),
            report(3, "Praça do Comércio", 1, &[3], "2025-03-10T00:00:00Z"),
            report(4, "rua do Ouro", 3, &[1], "2025-03-15T23:59:00Z"),
        ]
    }

    #[test]
    fn test_identity_filter_matches_everything() {
        let page = sample_page();
        let filtered = apply_criteria(&page, &FilterCriteria::default());
        assert_eq!(filtered, page);
    }

    #[test]
    fn test_text_term_is_case_insensitive_substring() {
        let page = sample_page();
        let criteria = FilterCriteria {
            term: Some("RUA".to_string()),
            ..FilterCriteria::default()
        };
        let filtered = apply_criteria(&page, &criteria);
        // "Rua Augusta" and "rua do Ouro" both contain "rua".
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_status_and_category_are_exact_matches() {
        let page = sample_page();

        let by_status = FilterCriteria {
            status: Some(StatusId::new(1)),
            ..FilterCriteria::default()
        };
        assert_eq!(apply_criteria(&page, &by_status).len(), 2);

        let by_category = FilterCriteria {
            category: Some(CategoryId::new(2)),
            ..FilterCriteria::default()
        };
        // Category matches when any element of the set equals the id.
        assert_eq!(apply_criteria(&page, &by_category).len(), 2);
    }

    #[test]
    fn test_date_range_is_inclusive_at_both_ends() {
        let page = sample_page();
        let criteria = FilterCriteria {
            date_from: Some("2025-03-05".parse().expect("valid date")),
            date_to: Some("2025-03-10".parse().expect("valid date")),
            ..FilterCriteria::default()
        };
        let filtered = apply_criteria(&page, &criteria);
        // Report 3 sits exactly at the end date's 00:00 and is included.
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().any(|r| r.id == crate::ReportId::new(3)));
    }

    #[test]
    fn test_same_day_range_covers_the_whole_day() {
        let page = vec![report(9, "Largo", 1, &[], "2025-03-15T23:59:00Z")];
        let day: NaiveDate = "2025-03-15".parse().expect("valid date");
        let criteria = FilterCriteria {
            date_from: Some(day),
            date_to: Some(day),
            ..FilterCriteria::default()
        };
        assert_eq!(apply_criteria(&page, &criteria).len(), 1);
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let page = sample_page();
        let criteria = FilterCriteria {
            term: Some("rua".to_string()),
            status: Some(StatusId::new(1)),
            ..FilterCriteria::default()
        };
        let filtered = apply_criteria(&page, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.first().map(|r| r.id), Some(crate::ReportId::new(1)));
    }

    #[test]
    fn test_filtered_set_is_always_a_subset() {
        let page = sample_page();
        let criteria = FilterCriteria {
            term: Some("a".to_string()),
            category: Some(CategoryId::new(1)),
            date_to: Some("2025-03-31".parse().expect("valid date")),
            ..FilterCriteria::default()
        };
        for r in apply_criteria(&page, &criteria) {
            assert!(page.contains(&r));
        }
    }

    #[test]
    fn test_applying_criteria_is_idempotent() {
        let page = sample_page();
        let criteria = FilterCriteria {
            status: Some(StatusId::new(1)),
            ..FilterCriteria::default()
        };
        let once = apply_criteria(&page, &criteria);
        let twice = apply_criteria(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_result_is_a_valid_outcome() {
        let page = sample_page();
        let criteria = FilterCriteria {
            term: Some("no such street".to_string()),
            ..FilterCriteria::default()
        };
        assert!(apply_criteria(&page, &criteria).is_empty());
    }

    #[test]
    fn test_whitespace_term_is_identity() {
        let criteria = FilterCriteria {
            term: Some("   ".to_string()),
            ..FilterCriteria::default()
        };
        assert!(criteria.is_empty());
        let page = sample_page();
        assert_eq!(apply_criteria(&page, &criteria), page);
    }

    #[test]
    fn test_start_boundary_at_midnight_is_included() {
        let page = vec![report(9, "Largo", 1, &[], "2025-03-10T00:00:00Z")];
        let criteria = FilterCriteria {
            date_from: Some("2025-03-10".parse().expect("valid date")),
            ..FilterCriteria::default()
        };
        assert_eq!(apply_criteria(&page, &criteria).len(), 1);
    }

    #[test]
    fn test_end_boundary_covers_the_last_millisecond() {
        let last_ms = vec![report(9, "Largo", 1, &[], "2025-03-15T23:59:59.999Z")];
        let next_midnight = vec![report(10, "Largo", 1, &[], "2025-03-16T00:00:00Z")];
        let criteria = FilterCriteria {
            date_to: Some("2025-03-15".parse().expect("valid date")),
            ..FilterCriteria::default()
        };
        assert_eq!(apply_criteria(&last_ms, &criteria).len(), 1);
        assert!(apply_criteria(&next_midnight, &criteria).is_empty());
    }
}
