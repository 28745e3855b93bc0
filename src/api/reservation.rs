//! # API de Reservas
//!
//! Este módulo maneja todas las operaciones relacionadas con reservas:
//! - Crear nuevas reservas (rechazando solapes en la misma mesa)
//! - Listar reservas y consultar una por id
//! - Eliminar reservas

use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde::Deserialize;

use super::validation::{now_utc, parse_reservation_time, validate_positive, validate_text};
use super::AppResult;
use crate::db::{NewReservation, Repository};
use crate::services;

/// Cuerpo para crear una reserva
#[derive(Debug, Deserialize)]
pub struct ReservationCreate {
    /// Nombre del cliente (1..100 caracteres)
    pub customer_name: String,
    /// Inicio de la reserva en ISO-8601; si falta se usa la hora actual (UTC)
    #[serde(default)]
    pub reservation_time: Option<String>,
    /// Duración en minutos (>= 1)
    pub duration_minutes: i32,
    /// Mesa reservada
    pub table_id: i32,
}

impl ReservationCreate {
    pub fn validate(self) -> AppResult<NewReservation> {
        validate_text("customer_name", &self.customer_name, 100)?;
        validate_positive("duration_minutes", self.duration_minutes)?;

        let reservation_time = match self.reservation_time.as_deref() {
            Some(value) => parse_reservation_time(value)?,
            None => now_utc(),
        };

        Ok(NewReservation {
            customer_name: self.customer_name,
            reservation_time,
            duration_minutes: self.duration_minutes,
            table_id: self.table_id,
        })
    }
}

/// Lista todas las reservas
///
/// # Errores
/// - `404 Not Found`: no hay ninguna reserva
#[get("/reservations")]
async fn get_reservations(repo: web::Data<dyn Repository>) -> AppResult<impl Responder> {
    let reservations = services::reservation::list_reservations(repo.get_ref()).await?;
    Ok(HttpResponse::Ok().json(reservations))
}

#[get("/reservations/{id}")]
async fn get_reservation(
    repo: web::Data<dyn Repository>,
    path: web::Path<i32>,
) -> AppResult<impl Responder> {
    let reservation =
        services::reservation::get_reservation(repo.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(reservation))
}

/// Crea una nueva reserva
///
/// # Validaciones
/// - Nombre del cliente no vacío, máximo 100 caracteres
/// - Duración de al menos 1 minuto
/// - Hora de inicio en ISO-8601 (opcional)
/// - La mesa debe existir
/// - El intervalo no puede solaparse ni tocarse con otra reserva de la mesa
///
/// # Respuesta
/// ```json
/// {
///   "id": 1,
///   "customer_name": "John Doe",
///   "reservation_time": "2025-04-12T12:00:00",
///   "duration_minutes": 60,
///   "table_id": 1
/// }
/// ```
///
/// # Errores
/// - `400 Bad Request`: mesa inexistente, conflicto de horario o reserva no creada
/// - `422 Unprocessable Entity`: datos inválidos
/// - `500 Internal Server Error`: error de base de datos
#[post("/reservations")]
async fn make_reservation(
    repo: web::Data<dyn Repository>,
    data: web::Json<ReservationCreate>,
) -> AppResult<impl Responder> {
    let request = data.into_inner().validate()?;
    let reservation = services::reservation::create_reservation(repo.get_ref(), request).await?;
    Ok(HttpResponse::Ok().json(reservation))
}

/// Elimina una reserva
///
/// # Errores
/// - `404 Not Found`: la reserva no existe o ya se eliminó
#[delete("/reservations/{id}")]
async fn delete_reservation(
    repo: web::Data<dyn Repository>,
    path: web::Path<i32>,
) -> AppResult<impl Responder> {
    services::reservation::delete_reservation(repo.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Reservation deleted" })))
}

/// Configura las rutas relacionadas con reservas
///
/// # Rutas disponibles
/// - `GET /reservations` - Listar reservas
/// - `GET /reservations/{id}` - Consultar una reserva
/// - `POST /reservations` - Crear reserva
/// - `DELETE /reservations/{id}` - Eliminar reserva
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_reservations);
    cfg.service(get_reservation);
    cfg.service(make_reservation);
    cfg.service(delete_reservation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AppError;
    use chrono::NaiveDate;

    fn body(time: Option<&str>, minutes: i32) -> ReservationCreate {
        ReservationCreate {
            customer_name: "John Doe".to_string(),
            reservation_time: time.map(str::to_string),
            duration_minutes: minutes,
            table_id: 1,
        }
    }

    #[test]
    fn explicit_time_is_parsed() {
        let request = body(Some("2025-04-12T12:00:00"), 60).validate().unwrap();
        let expected = NaiveDate::from_ymd_opt(2025, 4, 12)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        assert_eq!(request.reservation_time, expected);
        assert_eq!(request.duration_minutes, 60);
    }

    #[test]
    fn missing_time_defaults_to_now() {
        let before = now_utc();
        let request = body(None, 30).validate().unwrap();
        let after = now_utc();

        assert!(before <= request.reservation_time && request.reservation_time <= after);
    }

    #[test]
    fn zero_duration_is_rejected() {
        let err = body(Some("2025-04-12T12:00:00"), 0).validate().unwrap_err();
        assert!(matches!(
            err,
            AppError::ValidationWithField { ref field, .. } if field == "duration_minutes"
        ));
    }

    #[test]
    fn deserializes_without_reservation_time() {
        let parsed: ReservationCreate = serde_json::from_str(
            r#"{"customer_name":"A","duration_minutes":60,"table_id":1}"#,
        )
        .unwrap();

        assert!(parsed.reservation_time.is_none());
    }
}
