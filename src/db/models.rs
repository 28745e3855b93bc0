use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Mesa física del restaurante
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Table {
    pub id: i32,
    pub name: String,
    pub seats: i32,
    pub location: String,
}

/// Atributos de una mesa ya validados, pendiente de persistir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTable {
    pub name: String,
    pub seats: i32,
    pub location: String,
}

/// Reserva de una mesa durante un intervalo
///
/// `reservation_time` está siempre en UTC sin offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: i32,
    pub customer_name: String,
    pub reservation_time: NaiveDateTime,
    pub duration_minutes: i32,
    pub table_id: i32,
}

/// Atributos de una reserva ya validados, pendiente de persistir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub customer_name: String,
    pub reservation_time: NaiveDateTime,
    pub duration_minutes: i32,
    pub table_id: i32,
}

impl NewReservation {
    pub fn into_reservation(self, id: i32) -> Reservation {
        Reservation {
            id,
            customer_name: self.customer_name,
            reservation_time: self.reservation_time,
            duration_minutes: self.duration_minutes,
            table_id: self.table_id,
        }
    }
}

impl NewTable {
    pub fn into_table(self, id: i32) -> Table {
        Table {
            id,
            name: self.name,
            seats: self.seats,
            location: self.location,
        }
    }
}
