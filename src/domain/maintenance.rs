//! Maintenance records and free-form service dates.

use crate::domain::validation::{required, ValidationError};
use crate::domain::{Money, RecordId, TimeMs, VehicleId};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Formats tried, in order, when a service date is interpreted as a calendar date.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y", "%Y/%m/%d"];

/// Largest accepted cost for a single record (999,999,999.99).
const MAX_COST_CENTS: i64 = 99_999_999_999;

/// A service date exactly as the user entered it.
///
/// The text is never rejected for not being a real date; parsing is
/// best-effort and only used for display and comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceDate(String);

impl ServiceDate {
    pub fn new(raw: impl Into<String>) -> Self {
        ServiceDate(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the text as a calendar date, if any known format matches.
    pub fn parsed(&self) -> Option<NaiveDate> {
        let raw = self.0.trim();
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }

    /// ISO form when the date parses, the raw text otherwise.
    pub fn display(&self) -> String {
        match self.parsed() {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => self.0.clone(),
        }
    }

    /// Whether `self` should replace `current` as the latest service date.
    ///
    /// Unparseable dates on either side cannot be ordered and always replace.
    pub fn supersedes(&self, current: &ServiceDate) -> bool {
        match (self.parsed(), current.parsed()) {
            (Some(new), Some(old)) => new >= old,
            _ => true,
        }
    }

    /// Calendar order for listing.
    ///
    /// Parseable dates compare as dates and sort after unparseable ones, so a
    /// descending sort puts real dates first. Two unparseable dates compare as text.
    pub fn chronological_cmp(&self, other: &ServiceDate) -> Ordering {
        match (self.parsed(), other.parsed()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl std::fmt::Display for ServiceDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A service entry attached to one vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceRecord {
    pub id: RecordId,
    pub vehicle_id: VehicleId,
    pub service_date: ServiceDate,
    pub description: String,
    pub cost: Money,
    pub created_at: TimeMs,
}

/// A validated maintenance submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceInput {
    pub service_date: ServiceDate,
    pub description: String,
    pub cost: Money,
}

impl MaintenanceInput {
    /// Validate raw form values.
    ///
    /// # Errors
    /// Returns the first field that fails validation.
    pub fn parse(
        service_date: &str,
        description: &str,
        cost: &str,
    ) -> Result<Self, ValidationError> {
        let service_date = ServiceDate::new(required("service_date", service_date)?);
        let description = required("description", description)?;
        let cost =
            Money::parse_cents(cost).map_err(|_| ValidationError::InvalidCost(cost.to_string()))?;
        if cost.is_negative() {
            return Err(ValidationError::NegativeCost);
        }
        let max_cost = Money::from_cents(MAX_COST_CENTS);
        if cost > max_cost {
            return Err(ValidationError::CostTooLarge(max_cost.to_display_string()));
        }

        Ok(MaintenanceInput {
            service_date,
            description,
            cost,
        })
    }
}
