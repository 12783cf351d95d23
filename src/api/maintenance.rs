use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::api::vehicles::vehicle_not_found;
use crate::api::AppState;
use crate::domain::{MaintenanceInput, MaintenanceRecord, Money, VehicleId};
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MaintenanceForm {
    #[serde(alias = "date")]
    pub service_date: String,
    #[serde(alias = "service_type")]
    pub description: String,
    pub cost: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceHistoryResponse {
    pub vehicle_id: i64,
    pub record_count: i64,
    pub total_cost: String,
    pub records: Vec<MaintenanceRecordDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecordDto {
    pub id: i64,
    pub service_date: String,
    pub description: String,
    pub cost: String,
}

impl From<MaintenanceRecord> for MaintenanceRecordDto {
    fn from(r: MaintenanceRecord) -> Self {
        MaintenanceRecordDto {
            id: r.id.as_i64(),
            service_date: r.service_date.display(),
            description: r.description,
            cost: r.cost.to_display_string(),
        }
    }
}

pub async fn get_maintenance_history(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MaintenanceHistoryResponse>, AppError> {
    let vehicle_id = VehicleId::new(id);
    if state.repo.get_vehicle(vehicle_id).await?.is_none() {
        return Err(vehicle_not_found(vehicle_id));
    }

    let records = state.repo.list_maintenance_records(vehicle_id).await?;
    let total_cost = Money::checked_sum(records.iter().map(|r| r.cost)).ok_or_else(|| {
        AppError::Internal(format!("Total cost for vehicle {} overflowed", vehicle_id))
    })?;

    Ok(Json(MaintenanceHistoryResponse {
        vehicle_id: vehicle_id.as_i64(),
        record_count: records.len() as i64,
        total_cost: total_cost.to_display_string(),
        records: records.into_iter().map(Into::into).collect(),
    }))
}

pub async fn add_maintenance_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<MaintenanceForm>,
) -> Result<Redirect, AppError> {
    let vehicle_id = VehicleId::new(id);
    let input = MaintenanceInput::parse(&form.service_date, &form.description, &form.cost)?;

    state
        .repo
        .add_maintenance_record(vehicle_id, &input)
        .await?
        .ok_or_else(|| vehicle_not_found(vehicle_id))?;

    Ok(Redirect::to(&format!("/vehicle/{}/maintenance", vehicle_id)))
}
