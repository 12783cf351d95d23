pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;

pub use config::{Config, LastServiceMode};
pub use db::{init_db, DeletedVehicle, Repository};
pub use domain::{
    MaintenanceInput, MaintenanceRecord, Money, RecordId, ServiceDate, TimeMs, ValidationError,
    Vehicle, VehicleId, VehicleInput, VehicleSummary,
};
pub use error::AppError;
