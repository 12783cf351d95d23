//! Vehicle operations for the repository.

use crate::domain::{ServiceDate, TimeMs, Vehicle, VehicleId, VehicleInput, VehicleSummary};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::info;

use super::{DeletedVehicle, Repository};

fn vehicle_from_row(row: &SqliteRow) -> Vehicle {
    let last_service_date: Option<String> = row.get("last_service_date");
    Vehicle {
        id: VehicleId::new(row.get("vehicle_id")),
        owner_name: row.get("owner_name"),
        make: row.get("make"),
        model: row.get("model"),
        year: row.get("year"),
        last_service_date: last_service_date.map(ServiceDate::new),
        created_at: TimeMs::new(row.get("created_at")),
    }
}

impl Repository {
    /// Insert a vehicle and return its store-assigned identifier.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn add_vehicle(&self, input: &VehicleInput) -> Result<VehicleId, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO vehicles (owner_name, make, model, year, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.owner_name.as_str())
        .bind(input.make.as_str())
        .bind(input.model.as_str())
        .bind(input.year)
        .bind(TimeMs::now().as_i64())
        .execute(&self.pool)
        .await?;

        let id = VehicleId::new(result.last_insert_rowid());
        info!(vehicle_id = %id, make = %input.make, model = %input.model, "Vehicle added");
        Ok(id)
    }

    /// List every vehicle in insertion order with its maintenance record count.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_vehicles(&self) -> Result<Vec<VehicleSummary>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT v.vehicle_id, v.owner_name, v.make, v.model, v.year,
                   v.last_service_date, v.created_at,
                   COUNT(m.record_id) AS maintenance_count
            FROM vehicles v
            LEFT JOIN maintenance_records m ON m.vehicle_id = v.vehicle_id
            GROUP BY v.vehicle_id
            ORDER BY v.vehicle_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| VehicleSummary {
                vehicle: vehicle_from_row(row),
                maintenance_count: row.get("maintenance_count"),
            })
            .collect())
    }

    /// Get a single vehicle.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_vehicle(&self, id: VehicleId) -> Result<Option<Vehicle>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT vehicle_id, owner_name, make, model, year, last_service_date, created_at
            FROM vehicles
            WHERE vehicle_id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(vehicle_from_row))
    }

    /// Overwrite every mutable field of a vehicle and return the stored row.
    ///
    /// Last writer wins; there is no partial update.
    ///
    /// # Errors
    /// Returns an error if the update fails.
    pub async fn update_vehicle(
        &self,
        id: VehicleId,
        input: &VehicleInput,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            UPDATE vehicles
            SET owner_name = ?, make = ?, model = ?, year = ?
            WHERE vehicle_id = ?
            RETURNING vehicle_id, owner_name, make, model, year, last_service_date, created_at
            "#,
        )
        .bind(input.owner_name.as_str())
        .bind(input.make.as_str())
        .bind(input.model.as_str())
        .bind(input.year)
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        if row.is_some() {
            info!(vehicle_id = %id, "Vehicle updated");
        }
        Ok(row.as_ref().map(vehicle_from_row))
    }

    /// Delete a vehicle and its maintenance records in one transaction.
    ///
    /// # Errors
    /// Returns an error if either delete fails; nothing is removed in that case.
    pub async fn delete_vehicle(&self, id: VehicleId) -> Result<Option<DeletedVehicle>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let records = sqlx::query("DELETE FROM maintenance_records WHERE vehicle_id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        let vehicle = sqlx::query("DELETE FROM vehicles WHERE vehicle_id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        if vehicle.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;

        let deleted = DeletedVehicle {
            vehicle_id: id,
            records_removed: records.rows_affected(),
        };
        info!(
            vehicle_id = %id,
            records_removed = deleted.records_removed,
            "Vehicle deleted"
        );
        Ok(Some(deleted))
    }

    /// Total number of vehicles.
    pub async fn count_vehicles(&self) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::repo::test_support::*;
    use crate::domain::VehicleId;

    #[tokio::test]
    async fn test_add_then_list_includes_submitted_fields() {
        let (repo, _temp) = setup_test_db().await;

        let id = repo
            .add_vehicle(&vehicle("Alice", "Toyota", "Corolla", 2020))
            .await
            .unwrap();
        assert_eq!(id, VehicleId::new(1));

        let vehicles = repo.list_vehicles().await.unwrap();
        assert_eq!(vehicles.len(), 1);
        let summary = &vehicles[0];
        assert_eq!(summary.vehicle.id, id);
        assert_eq!(summary.vehicle.owner_name, "Alice");
        assert_eq!(summary.vehicle.make, "Toyota");
        assert_eq!(summary.vehicle.model, "Corolla");
        assert_eq!(summary.vehicle.year, 2020);
        assert_eq!(summary.vehicle.last_service_date, None);
        assert_eq!(summary.maintenance_count, 0);
    }

    #[tokio::test]
    async fn test_list_is_in_insertion_order_with_counts() {
        let (repo, _temp) = setup_test_db().await;

        let first = repo
            .add_vehicle(&vehicle("Zed", "Ford", "Focus", 2015))
            .await
            .unwrap();
        let second = repo
            .add_vehicle(&vehicle("Amy", "Audi", "A4", 2021))
            .await
            .unwrap();
        repo.add_maintenance_record(second, &service("2023-01-01", "Wash", "10"))
            .await
            .unwrap();
        repo.add_maintenance_record(second, &service("2023-02-01", "Wash", "10"))
            .await
            .unwrap();

        let vehicles = repo.list_vehicles().await.unwrap();
        let ids: Vec<VehicleId> = vehicles.iter().map(|s| s.vehicle.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(vehicles[0].maintenance_count, 0);
        assert_eq!(vehicles[1].maintenance_count, 2);
    }

    #[tokio::test]
    async fn test_get_missing_vehicle_is_none() {
        let (repo, _temp) = setup_test_db().await;
        assert!(repo.get_vehicle(VehicleId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let (repo, _temp) = setup_test_db().await;

        let id = repo
            .add_vehicle(&vehicle("Alice", "Toyota", "Corolla", 2020))
            .await
            .unwrap();
        let changed = vehicle("Alice Smith", "Toyota", "Camry", 2021);

        let updated = repo.update_vehicle(id, &changed).await.unwrap().unwrap();
        assert_eq!(updated.owner_name, "Alice Smith");
        assert_eq!(updated.model, "Camry");
        assert_eq!(updated.year, 2021);

        let fetched = repo.get_vehicle(id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_keeps_last_service_date() {
        let (repo, _temp) = setup_test_db().await;

        let id = repo
            .add_vehicle(&vehicle("Alice", "Toyota", "Corolla", 2020))
            .await
            .unwrap();
        repo.add_maintenance_record(id, &service("2023-05-01", "Oil change", "39.99"))
            .await
            .unwrap();

        let updated = repo
            .update_vehicle(id, &vehicle("Alice", "Toyota", "Corolla", 2019))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            updated.last_service_date.as_ref().map(|d| d.as_str()),
            Some("2023-05-01")
        );
    }

    #[tokio::test]
    async fn test_update_missing_vehicle_is_none() {
        let (repo, _temp) = setup_test_db().await;

        let result = repo
            .update_vehicle(VehicleId::new(42), &vehicle("Nobody", "None", "None", 2000))
            .await
            .unwrap();
        assert!(result.is_none());
        assert_eq!(repo.count_vehicles().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_vehicle_is_none() {
        let (repo, _temp) = setup_test_db().await;
        assert!(repo.delete_vehicle(VehicleId::new(5)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let (repo, _temp) = setup_test_db().await;

        let first = repo
            .add_vehicle(&vehicle("Alice", "Toyota", "Corolla", 2020))
            .await
            .unwrap();
        repo.delete_vehicle(first).await.unwrap();
        let second = repo
            .add_vehicle(&vehicle("Bob", "Honda", "Civic", 2018))
            .await
            .unwrap();

        assert!(second > first);
        assert_eq!(repo.count_vehicles().await.unwrap(), 1);
    }
}
