//! Almacén en memoria
//!
//! Reproduce las restricciones del esquema PostgreSQL (clave foránea, borrado
//! restringido y exclusión de solapes) comprobándolas bajo un único lock.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{
    NewReservation, NewTable, Repository, Reservation, ReservationRepository, Table,
    TableRepository,
};
use crate::api::{AppError, AppResult};
use crate::overlap::{conflicts_with, intervals_conflict, Interval};

#[derive(Debug, Default)]
struct State {
    tables: BTreeMap<i32, Table>,
    reservations: BTreeMap<i32, Reservation>,
    next_table_id: i32,
    next_reservation_id: i32,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl TableRepository for MemoryStore {
    async fn create_table(&self, table: NewTable) -> Option<Table> {
        let mut state = match self.lock() {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(error = %e, "Error creating table");
                return None;
            }
        };

        state.next_table_id += 1;
        let created = table.into_table(state.next_table_id);
        state.tables.insert(created.id, created.clone());
        Some(created)
    }

    async fn list_tables(&self) -> AppResult<Vec<Table>> {
        Ok(self.lock()?.tables.values().cloned().collect())
    }

    async fn get_table(&self, id: i32) -> AppResult<Option<Table>> {
        Ok(self.lock()?.tables.get(&id).cloned())
    }

    async fn delete_table(&self, id: i32) -> AppResult<bool> {
        let mut state = self.lock()?;

        if state.reservations.values().any(|r| r.table_id == id) {
            return Err(AppError::Conflict(format!(
                "Table with id {} still has reservations, delete them first",
                id
            )));
        }

        Ok(state.tables.remove(&id).is_some())
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn create_reservation(&self, reservation: NewReservation) -> Option<Reservation> {
        let mut state = match self.lock() {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(error = %e, "Error creating reservation");
                return None;
            }
        };

        if !state.tables.contains_key(&reservation.table_id) {
            tracing::error!(
                table_id = reservation.table_id,
                "Error creating reservation: referenced table does not exist"
            );
            return None;
        }

        let candidate = Interval::new(reservation.reservation_time, reservation.duration_minutes);
        if conflicts_with(reservation.table_id, &candidate, state.reservations.values()) {
            tracing::error!(
                table_id = reservation.table_id,
                "Error creating reservation: overlaps an existing reservation"
            );
            return None;
        }

        state.next_reservation_id += 1;
        let created = reservation.into_reservation(state.next_reservation_id);
        state.reservations.insert(created.id, created.clone());
        Some(created)
    }

    async fn list_reservations(&self) -> AppResult<Vec<Reservation>> {
        Ok(self.lock()?.reservations.values().cloned().collect())
    }

    async fn get_reservation(&self, id: i32) -> AppResult<Option<Reservation>> {
        Ok(self.lock()?.reservations.get(&id).cloned())
    }

    async fn delete_reservation(&self, id: i32) -> AppResult<bool> {
        Ok(self.lock()?.reservations.remove(&id).is_some())
    }

    async fn find_overlapping(
        &self,
        table_id: i32,
        start: NaiveDateTime,
        duration_minutes: i32,
    ) -> AppResult<Vec<Reservation>> {
        let candidate = Interval::new(start, duration_minutes);
        let mut found: Vec<Reservation> = self
            .lock()?
            .reservations
            .values()
            .filter(|r| r.table_id == table_id)
            .filter(|r| intervals_conflict(&candidate, &Interval::from(*r)))
            .cloned()
            .collect();

        found.sort_by_key(|r| r.reservation_time);
        Ok(found)
    }
}

#[async_trait]
impl Repository for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        self.lock().map(|_| ())
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 12)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn table(name: &str) -> NewTable {
        NewTable {
            name: name.to_string(),
            seats: 4,
            location: "Main Hall".to_string(),
        }
    }

    fn booking(table_id: i32, start: NaiveDateTime, minutes: i32) -> NewReservation {
        NewReservation {
            customer_name: "A".to_string(),
            reservation_time: start,
            duration_minutes: minutes,
            table_id,
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_sequentially() {
        let store = MemoryStore::new();

        assert_eq!(store.create_table(table("T1")).await.unwrap().id, 1);
        assert_eq!(store.create_table(table("T2")).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn reservation_requires_existing_table() {
        let store = MemoryStore::new();
        assert!(store.create_reservation(booking(1, at(12, 0), 60)).await.is_none());
    }

    #[tokio::test]
    async fn overlapping_insert_is_refused() {
        let store = MemoryStore::new();
        let t = store.create_table(table("T1")).await.unwrap();

        assert!(store.create_reservation(booking(t.id, at(12, 0), 60)).await.is_some());
        assert!(store.create_reservation(booking(t.id, at(13, 0), 30)).await.is_none());
        assert!(store.create_reservation(booking(t.id, at(13, 1), 30)).await.is_some());
    }

    #[tokio::test]
    async fn find_overlapping_is_scoped_to_the_table() {
        let store = MemoryStore::new();
        let t1 = store.create_table(table("T1")).await.unwrap();
        let t2 = store.create_table(table("T2")).await.unwrap();
        store.create_reservation(booking(t1.id, at(12, 0), 60)).await.unwrap();

        assert_eq!(store.find_overlapping(t1.id, at(12, 30), 30).await.unwrap().len(), 1);
        assert!(store.find_overlapping(t2.id, at(12, 30), 30).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_a_booked_table_is_restricted() {
        let store = MemoryStore::new();
        let t = store.create_table(table("T1")).await.unwrap();
        let r = store.create_reservation(booking(t.id, at(12, 0), 60)).await.unwrap();

        assert!(matches!(store.delete_table(t.id).await, Err(AppError::Conflict(_))));
        assert!(store.delete_reservation(r.id).await.unwrap());
        assert!(store.delete_table(t.id).await.unwrap());
        assert!(!store.delete_table(t.id).await.unwrap());
    }
}
