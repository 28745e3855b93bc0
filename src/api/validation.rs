//! Validaciones de los cuerpos de petición
//!
//! Todo lo que llega a los servicios ya ha pasado por aquí.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

use super::{AppError, AppResult};

/// Valida un texto obligatorio con longitud máxima en caracteres
///
/// El valor no se recorta: se guarda tal cual llega, espacios incluidos.
pub fn validate_text(field: &str, value: &str, max_chars: usize) -> AppResult<()> {
    if value.is_empty() {
        return Err(AppError::validation_field(field, "must not be empty"));
    }

    if value.chars().count() > max_chars {
        return Err(AppError::validation_field(
            field,
            &format!("must be at most {} characters", max_chars),
        ));
    }

    Ok(())
}

/// Valida un entero mayor o igual que 1
pub fn validate_positive(field: &str, value: i32) -> AppResult<()> {
    if value < 1 {
        return Err(AppError::validation_field(field, "must be greater than or equal to 1"));
    }
    Ok(())
}

/// Parsea la hora de inicio de una reserva y la normaliza a UTC
///
/// Acepta RFC 3339 con offset (`2025-04-12T14:00:00+02:00`, se convierte a UTC)
/// o un timestamp ISO-8601 sin zona (`2025-04-12T12:00:00`, se toma como UTC).
/// La precisión se recorta a microsegundos, la misma que guarda PostgreSQL.
pub fn parse_reservation_time(value: &str) -> AppResult<NaiveDateTime> {
    let value = value.trim();

    let parsed = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|_| {
            AppError::validation_field(
                "reservation_time",
                "expected an ISO-8601 timestamp, e.g. 2025-04-12T12:00:00",
            )
        })?;

    Ok(parsed.trunc_subsecs(6))
}

/// Hora actual en UTC, con la misma precisión que [`parse_reservation_time`]
pub fn now_utc() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 12)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn text_limits_count_characters() {
        assert!(validate_text("name", "T1", 100).is_ok());
        assert!(validate_text("name", &"a".repeat(100), 100).is_ok());
        assert!(validate_text("name", &"a".repeat(101), 100).is_err());
        assert!(validate_text("location", &"é".repeat(200), 200).is_ok());
    }

    #[test]
    fn only_empty_text_is_rejected() {
        assert!(validate_text("name", "", 100).is_err());
        assert!(validate_text("name", "   ", 100).is_ok());
    }

    #[test]
    fn zero_and_negative_are_rejected() {
        assert!(validate_positive("seats", 0).is_err());
        assert!(validate_positive("seats", -3).is_err());
        assert!(validate_positive("seats", 1).is_ok());
    }

    #[test]
    fn naive_timestamp_is_taken_as_utc() {
        assert_eq!(parse_reservation_time("2025-04-12T12:00:00").unwrap(), noon());
        assert_eq!(parse_reservation_time("2025-04-12 12:00:00").unwrap(), noon());
        assert_eq!(parse_reservation_time("2025-04-12T12:00").unwrap(), noon());
    }

    #[test]
    fn offsets_are_converted_to_utc() {
        assert_eq!(parse_reservation_time("2025-04-12T14:00:00+02:00").unwrap(), noon());
        assert_eq!(parse_reservation_time("2025-04-12T12:00:00Z").unwrap(), noon());
    }

    #[test]
    fn sub_microsecond_precision_is_dropped() {
        let parsed = parse_reservation_time("2025-04-12T12:00:00.123456789").unwrap();
        assert_eq!(parsed, parse_reservation_time("2025-04-12T12:00:00.123456").unwrap());
    }

    #[test]
    fn garbage_is_a_validation_error() {
        let err = parse_reservation_time("invalid-date").unwrap_err();
        assert!(matches!(
            err,
            AppError::ValidationWithField { ref field, .. } if field == "reservation_time"
        ));
    }
}
