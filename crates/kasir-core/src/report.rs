//! # Sales Reports
//!
//! Report windows and the shape of a sales report. The aggregation itself
//! runs in kasir-db; this module owns the rules about which windows are
//! valid and what an empty report looks like.
//!
//! ## Window Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  start_date = 2026-10-01, end_date = 2026-10-03  (UTC calendar days)    │
//! │                                                                         │
//! │     09-30   │ 10-01 │ 10-02 │ 10-03 │   10-04                           │
//! │   excluded  │  ◄──────── included ──────►  │  excluded                  │
//! │                                                                         │
//! │  daily report  = DateRange::single(today)                              │
//! │  start > end   → ValidationError::InvertedRange                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{parse_date, ValidationResult};
use crate::DATE_FORMAT;

// =============================================================================
// Date Range
// =============================================================================

/// An inclusive window of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a window, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> ValidationResult<Self> {
        if start > end {
            return Err(ValidationError::InvertedRange {
                start: start.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
            });
        }
        Ok(DateRange { start, end })
    }

    /// A window covering exactly one day.
    pub fn single(day: NaiveDate) -> Self {
        DateRange {
            start: day,
            end: day,
        }
    }

    /// The current UTC day.
    pub fn today() -> Self {
        Self::single(Utc::now().date_naive())
    }

    /// Builds a window from optional query strings.
    ///
    /// ## Rules
    /// - both absent → `None` (caller decides the default, usually today)
    /// - exactly one present → `None` as well; a window needs both bounds
    /// - both present → parsed, then checked for `start <= end`
    pub fn parse(start: Option<&str>, end: Option<&str>) -> ValidationResult<Option<Self>> {
        match (start, end) {
            (Some(start), Some(end)) => {
                let start = parse_date("start_date", start)?;
                let end = parse_date("end_date", end)?;
                Self::new(start, end).map(Some)
            }
            _ => Ok(None),
        }
    }

    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

}

// =============================================================================
// Report Shapes
// =============================================================================

/// The product with the highest summed quantity in a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BestSeller {
    pub product_id: i64,
    /// Snapshot name from the most recent sale in the window.
    pub name: String,
    pub quantity_sold: i64,
}

/// Aggregated sales over a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_revenue: i64,
    pub transaction_count: i64,
    pub best_seller: Option<BestSeller>,
}

impl SalesReport {
    /// A report for a window with no sales.
    pub fn empty(range: DateRange) -> Self {
        SalesReport {
            start_date: range.start(),
            end_date: range.end(),
            total_revenue: 0,
            transaction_count: 0,
            best_seller: None,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        let err = DateRange::new(day(2026, 2, 2), day(2026, 2, 1)).unwrap_err();
        assert!(matches!(err, ValidationError::InvertedRange { .. }));

        assert!(DateRange::new(day(2026, 2, 1), day(2026, 2, 1)).is_ok());
    }

    #[test]
    fn test_parse_optional_bounds() {
        assert_eq!(DateRange::parse(None, None).unwrap(), None);

        let range = DateRange::parse(Some("2026-10-01"), Some("2026-10-03"))
            .unwrap()
            .unwrap();
        assert_eq!(range.start(), day(2026, 10, 1));
        assert_eq!(range.end(), day(2026, 10, 3));

        assert_eq!(DateRange::parse(Some("2026-10-01"), None).unwrap(), None);
        assert_eq!(DateRange::parse(None, Some("not-a-date")).unwrap(), None);
        assert!(matches!(
            DateRange::parse(Some("yesterday"), Some("2026-10-03")),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            DateRange::parse(Some("2026-10-04"), Some("2026-10-03")),
            Err(ValidationError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_empty_report() {
        let report = SalesReport::empty(DateRange::single(day(2026, 10, 19)));
        assert_eq!(report.total_revenue, 0);
        assert_eq!(report.transaction_count, 0);
        assert!(report.best_seller.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["start_date"], "2026-10-19");
        assert!(json["best_seller"].is_null());
    }
}
