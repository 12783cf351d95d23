//! Domain types for the vehicle maintenance ledger.
//!
//! This module provides:
//! - Identifier newtypes: VehicleId, RecordId, TimeMs
//! - Lossless Money for maintenance costs
//! - Vehicle and MaintenanceRecord entities
//! - Validated inputs built from raw form strings

pub mod maintenance;
pub mod money;
pub mod primitives;
pub mod validation;
pub mod vehicle;

pub use maintenance::{MaintenanceInput, MaintenanceRecord, ServiceDate};
pub use money::Money;
pub use primitives::{RecordId, TimeMs, VehicleId};
pub use validation::ValidationError;
pub use vehicle::{Vehicle, VehicleInput, VehicleSummary};
