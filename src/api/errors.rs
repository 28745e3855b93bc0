//! # Manejo de errores
//!
//! Jerarquía de errores de la aplicación con thiserror. Cada variante sabe
//! qué código HTTP devolver y cómo registrarse en los logs; el detalle interno
//! (SQL, cadenas de error) nunca llega al cliente.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::error::Error;
use thiserror::Error;

/// Tipos de error de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Error de base de datos con la operación que lo produjo
    #[error("Database error during '{operation}': {source}")]
    Database {
        operation: String,
        #[source]
        source: sqlx::Error,
    },

    /// Error de validación con campo específico
    #[error("Validation error in field '{field}': {message}")]
    ValidationWithField { field: String, message: String },

    /// Error de validación general (p. ej. JSON mal formado)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Recurso no encontrado por id
    #[error("{resource_type} with id {id} not found")]
    NotFoundWithId { resource_type: String, id: String },

    /// Recurso (o colección) no encontrado
    #[error("{0}")]
    NotFound(String),

    /// La mesa referenciada por una reserva no existe
    #[error("Table with id {0} not found")]
    TableNotFound(i32),

    /// El intervalo solicitado se solapa con otra reserva de la misma mesa
    #[error("Time conflicts. This table is already reserved at this time")]
    ReservationConflict,

    #[error("Reservation not created")]
    ReservationNotCreated,

    #[error("Table not created")]
    TableNotCreated,

    /// Conflicto de estado, p. ej. borrar una mesa con reservas
    #[error("{0}")]
    Conflict(String),

    /// Error interno con código de rastreo
    #[error("Internal error (trace: {trace_id}): {message}")]
    InternalWithTrace { trace_id: String, message: String },

    /// Error interno simple
    #[error("Internal error: {0}")]
    Internal(String),
}

// Métodos helper para crear errores con contexto
impl AppError {
    /// Crea un error de base de datos con contexto de operación
    pub fn database(operation: &str, source: sqlx::Error) -> Self {
        Self::Database {
            operation: operation.to_string(),
            source,
        }
    }

    /// Crea un error de validación con campo específico
    pub fn validation_field(field: &str, message: &str) -> Self {
        Self::ValidationWithField {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Crea un error de no encontrado con ID
    pub fn not_found_id(resource_type: &str, id: impl ToString) -> Self {
        Self::NotFoundWithId {
            resource_type: resource_type.to_string(),
            id: id.to_string(),
        }
    }

    /// Crea un error interno con trace ID
    pub fn internal_trace(message: &str, trace_id: Option<String>) -> Self {
        Self::InternalWithTrace {
            trace_id: trace_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            message: message.to_string(),
        }
    }

    /// Categoría corta que acompaña al mensaje en la respuesta
    fn category(&self) -> &'static str {
        match self {
            Self::Database { .. } => "database_error",
            Self::ValidationWithField { .. } | Self::Validation(_) => "validation_error",
            Self::NotFoundWithId { .. } | Self::NotFound(_) => "not_found",
            Self::TableNotFound(_)
            | Self::ReservationConflict
            | Self::ReservationNotCreated
            | Self::TableNotCreated => "bad_request",
            Self::Conflict(_) => "conflict",
            Self::InternalWithTrace { .. } | Self::Internal(_) => "internal_error",
        }
    }

    /// Mensaje visible para el cliente
    fn public_message(&self) -> String {
        match self {
            Self::Database { .. } | Self::Internal(_) => "Internal server error".to_string(),
            Self::InternalWithTrace { trace_id, .. } => {
                format!("Internal server error (trace: {})", trace_id)
            }
            Self::ValidationWithField { field, message } => {
                format!("Field '{}': {}", field, message)
            }
            Self::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }

    fn log(&self) {
        match self {
            Self::Database { operation, source } => {
                tracing::error!(
                    operation = %operation,
                    error = %source,
                    error_chain = ?source.source(),
                    "Database error occurred"
                );
            }
            Self::ValidationWithField { field, message } => {
                tracing::warn!(field = %field, message = %message, "Validation error");
            }
            Self::Validation(message) => {
                tracing::warn!(message = %message, "Validation error");
            }
            Self::NotFoundWithId { resource_type, id } => {
                tracing::info!(resource_type = %resource_type, id = %id, "Resource not found");
            }
            Self::InternalWithTrace { trace_id, message } => {
                tracing::error!(trace_id = %trace_id, message = %message, "Internal error with trace");
            }
            Self::Internal(message) => {
                tracing::error!(message = %message, "Internal error");
            }
            other => {
                tracing::info!(error = %other, "Request rejected");
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationWithField { .. } | Self::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::NotFoundWithId { .. } | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::TableNotFound(_)
            | Self::ReservationConflict
            | Self::ReservationNotCreated
            | Self::TableNotCreated => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database { .. } | Self::InternalWithTrace { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.log();
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.category().to_string(),
            message: self.public_message(),
        })
    }
}

/// Cuerpo JSON de toda respuesta de error
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

pub type AppResult<T> = Result<T, AppError>;

/// Convierte errores ajenos en un error interno con trace ID
pub trait ResultExt<T> {
    fn map_err_internal(self, message: &str) -> AppResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + 'static,
{
    fn map_err_internal(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::internal_trace(&format!("{}: {}", message, e), None))
    }
}
