//! Vehicle entity and its validated input.

use crate::domain::validation::{required, ValidationError};
use crate::domain::{ServiceDate, TimeMs, VehicleId};

/// A vehicle row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub owner_name: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Denormalized date of a maintenance record, see `LastServiceMode`.
    pub last_service_date: Option<ServiceDate>,
    pub created_at: TimeMs,
}

/// A vehicle joined with the number of maintenance records attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleSummary {
    pub vehicle: Vehicle,
    pub maintenance_count: i64,
}

/// The mutable fields of a vehicle, already validated.
///
/// Used for both create and update; an update overwrites every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleInput {
    pub owner_name: String,
    pub make: String,
    pub model: String,
    pub year: i32,
}

impl VehicleInput {
    /// Validate raw form values.
    ///
    /// # Errors
    /// Returns the first field that fails validation.
    pub fn parse(
        owner_name: &str,
        make: &str,
        model: &str,
        year: &str,
    ) -> Result<Self, ValidationError> {
        let owner_name = required("owner_name", owner_name)?;
        let make = required("make", make)?;
        let model = required("model", model)?;
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidYear(year.to_string()))?;

        Ok(VehicleInput {
            owner_name,
            make,
            model,
            year,
        })
    }
}
