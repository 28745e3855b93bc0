//! # Servicios
//!
//! Reglas de negocio entre los handlers HTTP y los repositorios.
//!
//! - [`table`] - alta, consulta y baja de mesas
//! - [`reservation`] - orquestación del alta de reservas con detección de solapes

pub mod reservation;
pub mod table;

/// Almacén que encuentra la mesa pero nunca consigue persistir nada
#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use chrono::NaiveDateTime;

    use crate::api::AppResult;
    use crate::db::{
        NewReservation, NewTable, Repository, Reservation, ReservationRepository, Table,
        TableRepository,
    };

    pub struct RefusingStore;

    #[async_trait]
    impl TableRepository for RefusingStore {
        async fn create_table(&self, _table: NewTable) -> Option<Table> {
            None
        }

        async fn list_tables(&self) -> AppResult<Vec<Table>> {
            Ok(Vec::new())
        }

        async fn get_table(&self, id: i32) -> AppResult<Option<Table>> {
            Ok(Some(Table {
                id,
                name: "T1".to_string(),
                seats: 4,
                location: "Main Hall".to_string(),
            }))
        }

        async fn delete_table(&self, _id: i32) -> AppResult<bool> {
            Ok(false)
        }
    }

    #[async_trait]
    impl ReservationRepository for RefusingStore {
        async fn create_reservation(&self, _reservation: NewReservation) -> Option<Reservation> {
            None
        }

        async fn list_reservations(&self) -> AppResult<Vec<Reservation>> {
            Ok(Vec::new())
        }

        async fn get_reservation(&self, _id: i32) -> AppResult<Option<Reservation>> {
            Ok(None)
        }

        async fn delete_reservation(&self, _id: i32) -> AppResult<bool> {
            Ok(false)
        }

        async fn find_overlapping(
            &self,
            _table_id: i32,
            _start: NaiveDateTime,
            _duration_minutes: i32,
        ) -> AppResult<Vec<Reservation>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl Repository for RefusingStore {
        async fn ping(&self) -> AppResult<()> {
            Ok(())
        }

        async fn close(&self) {}
    }
}
