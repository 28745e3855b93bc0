//! Almacén PostgreSQL sobre un pool de sqlx
//!
//! El esquema vive en `migrations/`. Además de las claves foráneas, la tabla
//! `reservation` tiene una restricción de exclusión que impide dos reservas
//! solapadas de la misma mesa aunque lleguen a la vez.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};

use super::{
    NewReservation, NewTable, Repository, Reservation, ReservationRepository, Table,
    TableRepository,
};
use crate::api::{AppError, AppResult, ResultExt};
use crate::config::DatabaseSettings;
use crate::telemetry::ErrorLogExt;

const TABLE_COLUMNS: &str = "id, name, seats, location";
const RESERVATION_COLUMNS: &str =
    "id, customer_name, reservation_time, duration_minutes, table_id";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Abre el pool de conexiones y valida que la base de datos responde
    pub async fn connect(settings: &DatabaseSettings) -> AppResult<PgStore> {
        let mut options = PgConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .database(&settings.database)
            .username(&settings.user)
            .password(&settings.password);

        if !settings.echo {
            options = options.disable_statement_logging();
        }

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .test_before_acquire(settings.pool_pre_ping)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database("connect", e))?;

        tracing::info!(
            host = %settings.host,
            port = settings.port,
            database = %settings.database,
            "PostgreSQL connection pool established"
        );

        Ok(PgStore { pool })
    }

    /// Aplica las migraciones pendientes de `migrations/`
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err_internal("Error applying migrations")?;

        tracing::info!("Database migrations applied");
        Ok(())
    }

    async fn insert_table(&self, table: &NewTable) -> Result<Table, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Table>(&format!(
            "INSERT INTO restaurant_table (name, seats, location) VALUES ($1, $2, $3) RETURNING {}",
            TABLE_COLUMNS
        ))
        .bind(&table.name)
        .bind(table.seats)
        .bind(&table.location)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn insert_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<Reservation, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Reservation>(&format!(
            "INSERT INTO reservation (customer_name, reservation_time, duration_minutes, table_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            RESERVATION_COLUMNS
        ))
        .bind(&reservation.customer_name)
        .bind(reservation.reservation_time)
        .bind(reservation.duration_minutes)
        .bind(reservation.table_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }
}

fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .map(|db| db.is_foreign_key_violation())
        .unwrap_or(false)
}

#[async_trait]
impl TableRepository for PgStore {
    async fn create_table(&self, table: NewTable) -> Option<Table> {
        // Una transacción que no llega a commit se deshace al soltarse
        self.insert_table(&table)
            .await
            .log_error_context("Error creating table")
            .ok()
    }

    async fn list_tables(&self) -> AppResult<Vec<Table>> {
        sqlx::query_as::<_, Table>(&format!(
            "SELECT {} FROM restaurant_table ORDER BY id",
            TABLE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database("list tables", e))
    }

    async fn get_table(&self, id: i32) -> AppResult<Option<Table>> {
        sqlx::query_as::<_, Table>(&format!(
            "SELECT {} FROM restaurant_table WHERE id = $1",
            TABLE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database("get table", e))
    }

    async fn delete_table(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM restaurant_table WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() > 0),
            Err(e) if is_foreign_key_violation(&e) => Err(AppError::Conflict(format!(
                "Table with id {} still has reservations, delete them first",
                id
            ))),
            Err(e) => Err(AppError::database("delete table", e)),
        }
    }
}

#[async_trait]
impl ReservationRepository for PgStore {
    async fn create_reservation(&self, reservation: NewReservation) -> Option<Reservation> {
        self.insert_reservation(&reservation)
            .await
            .log_error_context("Error creating reservation")
            .ok()
    }

    async fn list_reservations(&self) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {} FROM reservation ORDER BY id",
            RESERVATION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database("list reservations", e))
    }

    async fn get_reservation(&self, id: i32) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {} FROM reservation WHERE id = $1",
            RESERVATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database("get reservation", e))
    }

    async fn delete_reservation(&self, id: i32) -> AppResult<bool> {
        let done = sqlx::query("DELETE FROM reservation WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database("delete reservation", e))?;

        Ok(done.rows_affected() > 0)
    }

    async fn find_overlapping(
        &self,
        table_id: i32,
        start: NaiveDateTime,
        duration_minutes: i32,
    ) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {}
             FROM reservation
             WHERE table_id = $1
               AND $2 <= reservation_time + make_interval(mins => duration_minutes)
               AND reservation_time <= $2 + make_interval(mins => $3)
             ORDER BY reservation_time",
            RESERVATION_COLUMNS
        ))
        .bind(table_id)
        .bind(start)
        .bind(duration_minutes)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database("find overlapping reservations", e))
    }
}

#[async_trait]
impl Repository for PgStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database("ping", e))?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL connection pool closed");
    }
}
