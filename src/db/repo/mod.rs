//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by entity:
//! - `vehicles.rs` - Vehicle CRUD
//! - `maintenance.rs` - Maintenance record append and listing
//!
//! Lookups that can miss return `Option`; `None` is the only not-found signal.

mod maintenance;
mod vehicles;

use crate::config::LastServiceMode;
use crate::domain::VehicleId;
use sqlx::sqlite::SqlitePool;

/// Outcome of deleting a vehicle together with its maintenance history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletedVehicle {
    pub vehicle_id: VehicleId,
    pub records_removed: u64,
}

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
    last_service_mode: LastServiceMode,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository {
            pool,
            last_service_mode: LastServiceMode::default(),
        }
    }

    /// Choose how maintenance inserts update `last_service_date`.
    pub fn with_last_service_mode(mut self, mode: LastServiceMode) -> Self {
        self.last_service_mode = mode;
        self
    }

    pub fn last_service_mode(&self) -> LastServiceMode {
        self.last_service_mode
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn test_default_last_service_mode_is_entered() {
        let (repo, _temp) = setup_test_db().await;
        assert_eq!(repo.last_service_mode(), LastServiceMode::Entered);

        let repo = repo.with_last_service_mode(LastServiceMode::Latest);
        assert_eq!(repo.last_service_mode(), LastServiceMode::Latest);
    }

    #[tokio::test]
    async fn test_delete_cascades_only_own_records() {
        let (repo, _temp) = setup_test_db().await;

        let alice = repo
            .add_vehicle(&vehicle("Alice", "Toyota", "Corolla", 2020))
            .await
            .unwrap();
        let bob = repo
            .add_vehicle(&vehicle("Bob", "Honda", "Civic", 2018))
            .await
            .unwrap();

        repo.add_maintenance_record(alice, &service("2023-05-01", "Oil change", "39.99"))
            .await
            .unwrap();
        repo.add_maintenance_record(alice, &service("2023-06-01", "Tires", "400"))
            .await
            .unwrap();
        repo.add_maintenance_record(bob, &service("2023-07-01", "Brakes", "250"))
            .await
            .unwrap();

        let deleted = repo.delete_vehicle(alice).await.unwrap();
        assert_eq!(
            deleted,
            Some(DeletedVehicle {
                vehicle_id: alice,
                records_removed: 2,
            })
        );

        assert!(repo.get_vehicle(alice).await.unwrap().is_none());
        assert!(repo.list_maintenance_records(alice).await.unwrap().is_empty());
        assert_eq!(repo.list_maintenance_records(bob).await.unwrap().len(), 1);

        let orphans: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM maintenance_records WHERE vehicle_id NOT IN (SELECT vehicle_id FROM vehicles)",
        )
        .fetch_one(&repo.pool)
        .await
        .unwrap();
        assert_eq!(orphans.0, 0);
    }
}
