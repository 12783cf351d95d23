use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::api::{AppState, LIST_PATH};
use crate::domain::{Vehicle, VehicleId, VehicleInput, VehicleSummary};
use crate::error::AppError;

/// Fields submitted by the add and update forms.
///
/// Missing fields read as empty and fail validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VehicleForm {
    #[serde(alias = "owner")]
    pub owner_name: String,
    pub make: String,
    pub model: String,
    pub year: String,
}

impl VehicleForm {
    fn validate(&self) -> Result<VehicleInput, AppError> {
        Ok(VehicleInput::parse(
            &self.owner_name,
            &self.make,
            &self.model,
            &self.year,
        )?)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleListResponse {
    pub vehicles: Vec<VehicleSummaryDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummaryDto {
    #[serde(flatten)]
    pub vehicle: VehicleDto,
    pub maintenance_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
    pub id: i64,
    pub owner_name: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub last_service_date: Option<String>,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        VehicleDto {
            id: v.id.as_i64(),
            owner_name: v.owner_name,
            make: v.make,
            model: v.model,
            year: v.year,
            last_service_date: v.last_service_date.map(|d| d.display()),
        }
    }
}

impl From<VehicleSummary> for VehicleSummaryDto {
    fn from(s: VehicleSummary) -> Self {
        VehicleSummaryDto {
            vehicle: s.vehicle.into(),
            maintenance_count: s.maintenance_count,
        }
    }
}

pub(crate) fn vehicle_not_found(id: VehicleId) -> AppError {
    AppError::NotFound(format!("Vehicle {} not found", id))
}

pub async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<VehicleListResponse>, AppError> {
    let vehicles = state.repo.list_vehicles().await?;
    Ok(Json(VehicleListResponse {
        vehicles: vehicles.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VehicleDto>, AppError> {
    let id = VehicleId::new(id);
    let vehicle = state
        .repo
        .get_vehicle(id)
        .await?
        .ok_or_else(|| vehicle_not_found(id))?;
    Ok(Json(vehicle.into()))
}

pub async fn create_vehicle(
    State(state): State<AppState>,
    Form(form): Form<VehicleForm>,
) -> Result<Redirect, AppError> {
    let input = form.validate()?;
    state.repo.add_vehicle(&input).await?;
    Ok(Redirect::to(LIST_PATH))
}

pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<VehicleForm>,
) -> Result<Redirect, AppError> {
    let id = VehicleId::new(id);
    let input = form.validate()?;
    state
        .repo
        .update_vehicle(id, &input)
        .await?
        .ok_or_else(|| vehicle_not_found(id))?;
    Ok(Redirect::to(LIST_PATH))
}

pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let id = VehicleId::new(id);
    state
        .repo
        .delete_vehicle(id)
        .await?
        .ok_or_else(|| vehicle_not_found(id))?;
    Ok(Redirect::to(LIST_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ServiceDate, TimeMs};

    #[test]
    fn test_form_missing_field_is_bad_request() {
        let form = VehicleForm {
            owner_name: "Alice".into(),
            make: "Toyota".into(),
            ..Default::default()
        };
        assert!(matches!(form.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_vehicle_dto_displays_iso_service_date() {
        let dto: VehicleDto = Vehicle {
            id: VehicleId::new(3),
            owner_name: "Alice".into(),
            make: "Toyota".into(),
            model: "Corolla".into(),
            year: 2020,
            last_service_date: Some(ServiceDate::new("05/01/2023")),
            created_at: TimeMs::new(0),
        }
        .into();

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["ownerName"], "Alice");
        assert_eq!(json["lastServiceDate"], "2023-05-01");
    }
}
