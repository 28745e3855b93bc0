//! # Detección de solapes
//!
//! Dos reservas de la misma mesa entran en conflicto cuando sus intervalos
//! `[inicio, inicio + duración)` se cortan **o se tocan**: una reserva que
//! termina a las 13:00 choca con otra que empieza a las 13:00. Así no se
//! encadenan reservas sin margen entre ellas.
//!
//! La condición, para un candidato `[S, S+D)` y una reserva existente `R`:
//!
//! ```text
//! S <= R.start + R.duration  AND  R.start <= S + D
//! ```

use chrono::{Duration, NaiveDateTime};

use crate::api::AppResult;
use crate::db::{Reservation, ReservationRepository};

/// Intervalo reservado de una mesa
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub duration_minutes: i32,
}

impl Interval {
    pub fn new(start: NaiveDateTime, duration_minutes: i32) -> Self {
        Self {
            start,
            duration_minutes,
        }
    }

    /// Fin del intervalo; satura en `NaiveDateTime::MAX`
    pub fn end(&self) -> NaiveDateTime {
        self.start
            .checked_add_signed(Duration::minutes(i64::from(self.duration_minutes)))
            .unwrap_or(NaiveDateTime::MAX)
    }
}

impl From<&Reservation> for Interval {
    fn from(reservation: &Reservation) -> Self {
        Interval::new(reservation.reservation_time, reservation.duration_minutes)
    }
}

/// Indica si dos intervalos se solapan, con los extremos incluidos
pub fn intervals_conflict(a: &Interval, b: &Interval) -> bool {
    a.start <= b.end() && b.start <= a.end()
}

/// Indica si `candidate` choca con alguna reserva de `table_id`
///
/// Las reservas de otras mesas se ignoran.
pub fn conflicts_with<'a, I>(table_id: i32, candidate: &Interval, existing: I) -> bool
where
    I: IntoIterator<Item = &'a Reservation>,
{
    existing
        .into_iter()
        .filter(|r| r.table_id == table_id)
        .any(|r| intervals_conflict(candidate, &Interval::from(r)))
}

/// Consulta al repositorio si el intervalo candidato choca con alguna reserva de la mesa
///
/// No modifica nada; puede llamarse las veces que haga falta. Por sí sola no
/// protege frente a otra petición que inserte entre esta lectura y la escritura:
/// esa garantía la da el almacén al insertar.
pub async fn has_conflict<R>(
    repo: &R,
    table_id: i32,
    start: NaiveDateTime,
    duration_minutes: i32,
) -> AppResult<bool>
where
    R: ReservationRepository + ?Sized,
{
    let overlapping = repo
        .find_overlapping(table_id, start, duration_minutes)
        .await?;

    if !overlapping.is_empty() {
        tracing::debug!(
            table_id,
            %start,
            duration_minutes,
            conflicting = overlapping.len(),
            "Reservation interval overlaps existing bookings"
        );
    }

    Ok(!overlapping.is_empty())
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

    fn booking(id: i32, table_id: i32, start: NaiveDateTime, minutes: i32) -> Reservation {
        Reservation {
            id,
            customer_name: format!("customer {}", id),
            reservation_time: start,
            duration_minutes: minutes,
            table_id,
        }
    }

    #[test]
    fn candidate_inside_existing_conflicts() {
        let existing = Interval::new(at(12, 0), 60);
        assert!(intervals_conflict(&Interval::new(at(12, 30), 30), &existing));
    }

    #[test]
    fn touching_boundary_conflicts() {
        let existing = Interval::new(at(12, 0), 60);
        assert!(intervals_conflict(&Interval::new(at(13, 0), 30), &existing));
        assert!(intervals_conflict(&Interval::new(at(11, 0), 60), &existing));
    }

    #[test]
    fn one_minute_gap_does_not_conflict() {
        let existing = Interval::new(at(12, 0), 60);
        assert!(!intervals_conflict(&Interval::new(at(13, 1), 30), &existing));
        assert!(!intervals_conflict(&Interval::new(at(10, 0), 119), &existing));
    }

    #[test]
    fn candidate_enclosing_existing_conflicts() {
        let existing = Interval::new(at(12, 0), 15);
        assert!(intervals_conflict(&Interval::new(at(11, 0), 180), &existing));
    }

    #[test]
    fn predicate_is_symmetric() {
        let starts = [at(10, 0), at(11, 59), at(12, 0), at(12, 45), at(13, 0), at(14, 30)];
        let durations = [1, 15, 60, 90];

        for &s1 in &starts {
            for &d1 in &durations {
                for &s2 in &starts {
                    for &d2 in &durations {
                        let a = Interval::new(s1, d1);
                        let b = Interval::new(s2, d2);
                        assert_eq!(intervals_conflict(&a, &b), intervals_conflict(&b, &a));
                        assert_eq!(
                            intervals_conflict(&a, &b),
                            s1 <= b.end() && s2 <= a.end()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn other_tables_never_conflict() {
        let existing = vec![booking(1, 2, at(12, 0), 60)];
        let candidate = Interval::new(at(12, 0), 60);

        assert!(!conflicts_with(1, &candidate, &existing));
        assert!(conflicts_with(2, &candidate, &existing));
    }

    #[test]
    fn empty_table_has_no_conflicts() {
        let candidate = Interval::new(at(12, 0), 60);
        assert!(!conflicts_with(1, &candidate, &Vec::<Reservation>::new()));
    }
}
