//! # Capa de datos
//!
//! Los handlers y servicios sólo conocen los traits [`TableRepository`] y
//! [`ReservationRepository`]; el almacén concreto se construye al arrancar y se
//! inyecta en la aplicación como `web::Data<dyn Repository>`.
//!
//! - [`postgres::PgStore`] - PostgreSQL vía sqlx (producción)
//! - [`memory::MemoryStore`] - almacén en memoria (tests y desarrollo local)

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::Arc;

use crate::api::AppResult;
use crate::config::{DbDriver, Settings};

pub use memory::MemoryStore;
pub use models::{NewReservation, NewTable, Reservation, Table};
pub use postgres::PgStore;

/// Operaciones CRUD sobre mesas
#[async_trait]
pub trait TableRepository: Send + Sync {
    /// Persiste una mesa nueva
    ///
    /// Cualquier fallo del almacén se registra, se deshace la transacción y se
    /// devuelve `None`.
    async fn create_table(&self, table: NewTable) -> Option<Table>;

    async fn list_tables(&self) -> AppResult<Vec<Table>>;

    async fn get_table(&self, id: i32) -> AppResult<Option<Table>>;

    /// Borra una mesa; `false` si no existía
    ///
    /// Falla con `AppError::Conflict` si la mesa aún tiene reservas.
    async fn delete_table(&self, id: i32) -> AppResult<bool>;
}

/// Operaciones CRUD sobre reservas más la consulta de solapes
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persiste una reserva nueva
    ///
    /// Cualquier fallo del almacén (mesa inexistente, solape detectado por el
    /// propio almacén, error transitorio) se registra, se deshace y devuelve `None`.
    async fn create_reservation(&self, reservation: NewReservation) -> Option<Reservation>;

    async fn list_reservations(&self) -> AppResult<Vec<Reservation>>;

    async fn get_reservation(&self, id: i32) -> AppResult<Option<Reservation>>;

    /// Borra una reserva; `false` si no existía
    async fn delete_reservation(&self, id: i32) -> AppResult<bool>;

    /// Reservas de `table_id` cuyo intervalo choca con `[start, start + duration]`
    ///
    /// Los extremos cuentan como choque.
    async fn find_overlapping(
        &self,
        table_id: i32,
        start: NaiveDateTime,
        duration_minutes: i32,
    ) -> AppResult<Vec<Reservation>>;
}

/// Almacén completo con su ciclo de vida
#[async_trait]
pub trait Repository: TableRepository + ReservationRepository {
    /// Comprueba que el almacén responde
    async fn ping(&self) -> AppResult<()>;

    /// Libera las conexiones; se llama al parar el servidor
    async fn close(&self);
}

/// Construye el almacén indicado por `DB_DRIVER`
pub async fn connect(settings: &Settings) -> AppResult<Arc<dyn Repository>> {
    match settings.database.driver {
        DbDriver::Postgres => {
            let store = PgStore::connect(&settings.database).await?;
            store.migrate().await?;
            Ok(Arc::new(store))
        }
        DbDriver::Memory => {
            tracing::warn!("Using in-memory store, data will be lost on shutdown");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
