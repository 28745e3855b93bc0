//! Orquestación de reservas
//!
//! El alta sigue siempre el mismo orden dentro de la petición:
//! comprobar la mesa, comprobar solapes y persistir.

use crate::api::{AppError, AppResult};
use crate::db::{NewReservation, Repository, Reservation, ReservationRepository};
use crate::overlap::has_conflict;

/// Crea una reserva si la mesa existe y el intervalo está libre
///
/// # Errores
/// - `TableNotFound`: la mesa referenciada no existe
/// - `ReservationConflict`: el intervalo choca con otra reserva de la mesa
/// - `ReservationNotCreated`: el almacén no pudo guardarla (incluye una
///   reserva concurrente que ganó la carrera y fue rechazada por el almacén)
pub async fn create_reservation<R>(repo: &R, request: NewReservation) -> AppResult<Reservation>
where
    R: Repository + ?Sized,
{
    if repo.get_table(request.table_id).await?.is_none() {
        return Err(AppError::TableNotFound(request.table_id));
    }

    if has_conflict(
        repo,
        request.table_id,
        request.reservation_time,
        request.duration_minutes,
    )
    .await?
    {
        return Err(AppError::ReservationConflict);
    }

    let created = repo
        .create_reservation(request)
        .await
        .ok_or(AppError::ReservationNotCreated)?;

    tracing::info!(
        reservation_id = created.id,
        table_id = created.table_id,
        start = %created.reservation_time,
        duration_minutes = created.duration_minutes,
        "Reservation created"
    );
    Ok(created)
}

/// Lista todas las reservas
///
/// Una lista vacía se trata como "no encontrado".
pub async fn list_reservations<R>(repo: &R) -> AppResult<Vec<Reservation>>
where
    R: ReservationRepository + ?Sized,
{
    let reservations = repo.list_reservations().await?;
    if reservations.is_empty() {
        return Err(AppError::NotFound("Reservations not found".to_string()));
    }
    Ok(reservations)
}

pub async fn get_reservation<R>(repo: &R, id: i32) -> AppResult<Reservation>
where
    R: ReservationRepository + ?Sized,
{
    repo.get_reservation(id)
        .await?
        .ok_or_else(|| AppError::not_found_id("Reservation", id))
}

pub async fn delete_reservation<R>(repo: &R, id: i32) -> AppResult<()>
where
    R: ReservationRepository + ?Sized,
{
    if !repo.delete_reservation(id).await? {
        return Err(AppError::not_found_id("Reservation", id));
    }
    tracing::info!(reservation_id = id, "Reservation deleted");
    Ok(())
}
