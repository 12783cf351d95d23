//! Maintenance record operations for the repository.

use crate::config::LastServiceMode;
use crate::domain::{
    MaintenanceInput, MaintenanceRecord, Money, RecordId, ServiceDate, TimeMs, VehicleId,
};
use sqlx::Row;
use std::str::FromStr;
use tracing::{info, warn};

use super::Repository;

impl Repository {
    /// Append a maintenance record to a vehicle and refresh its `last_service_date`.
    ///
    /// Returns `None` if the vehicle does not exist. The insert and the
    /// vehicle update commit together.
    ///
    /// # Errors
    /// Returns an error if any statement fails.
    pub async fn add_maintenance_record(
        &self,
        vehicle_id: VehicleId,
        input: &MaintenanceInput,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        // Write first so the transaction takes the write lock up front and
        // waits on busy_timeout instead of failing a read-to-write upgrade.
        let created_at = TimeMs::now();
        let result = sqlx::query(
            r#"
            INSERT INTO maintenance_records (vehicle_id, service_date, description, cost, created_at)
            SELECT ?, ?, ?, ?, ?
            WHERE EXISTS (SELECT 1 FROM vehicles WHERE vehicle_id = ?)
            "#,
        )
        .bind(vehicle_id.as_i64())
        .bind(input.service_date.as_str())
        .bind(input.description.as_str())
        .bind(input.cost.to_canonical_string())
        .bind(created_at.as_i64())
        .bind(vehicle_id.as_i64())
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }
        let record_id = RecordId::new(result.last_insert_rowid());

        let current: Option<String> =
            sqlx::query_scalar("SELECT last_service_date FROM vehicles WHERE vehicle_id = ?")
                .bind(vehicle_id.as_i64())
                .fetch_one(&mut *tx)
                .await?;

        let replace = match (self.last_service_mode, current) {
            (LastServiceMode::Entered, _) | (_, None) => true,
            (LastServiceMode::Latest, Some(current)) => {
                input.service_date.supersedes(&ServiceDate::new(current))
            }
        };
        if replace {
            sqlx::query("UPDATE vehicles SET last_service_date = ? WHERE vehicle_id = ?")
                .bind(input.service_date.as_str())
                .bind(vehicle_id.as_i64())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        info!(
            vehicle_id = %vehicle_id,
            record_id = %record_id,
            service_date = %input.service_date,
            last_service_updated = replace,
            "Maintenance record added"
        );

        Ok(Some(MaintenanceRecord {
            id: record_id,
            vehicle_id,
            service_date: input.service_date.clone(),
            description: input.description.clone(),
            cost: input.cost,
            created_at,
        }))
    }

    /// List a vehicle's maintenance records, newest service date first.
    ///
    /// Dates are ordered as calendar dates whatever format they were entered in.
    /// Unparseable dates come after all real dates. Ties keep the newest record first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_maintenance_records(
        &self,
        vehicle_id: VehicleId,
    ) -> Result<Vec<MaintenanceRecord>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT record_id, vehicle_id, service_date, description, cost, created_at
            FROM maintenance_records
            WHERE vehicle_id = ?
            ORDER BY record_id DESC
            "#,
        )
        .bind(vehicle_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        let mut records: Vec<MaintenanceRecord> = rows
            .iter()
            .map(|row| {
                let record_id = RecordId::new(row.get("record_id"));
                let cost_str: String = row.get("cost");
                let cost = Money::from_str(&cost_str).unwrap_or_else(|e| {
                    warn!(
                        record_id = %record_id,
                        cost = %cost_str,
                        error = %e,
                        "Failed to parse maintenance cost, using zero"
                    );
                    Money::zero()
                });

                MaintenanceRecord {
                    id: record_id,
                    vehicle_id: VehicleId::new(row.get("vehicle_id")),
                    service_date: ServiceDate::new(row.get::<String, _>("service_date")),
                    description: row.get("description"),
                    cost,
                    created_at: TimeMs::new(row.get("created_at")),
                }
            })
            .collect();
        records.sort_by(|a, b| b.service_date.chronological_cmp(&a.service_date));

        Ok(records)
    }
}
