//! # Módulo API
//!
//! Este módulo contiene todas las rutas y controladores de la API REST.
//!
//! ## Módulos principales
//!
//! - [`table`] - Gestión de mesas (crear, listar, eliminar)
//! - [`reservation`] - Gestión de reservas (crear, listar, eliminar)
//! - [`health`] - Estado del servidor y del almacén
//! - [`errors`] - Manejo de errores de la aplicación
//! - [`validation`] - Validación de los cuerpos de petición

pub mod errors;
pub mod health;
pub mod reservation;
pub mod table;
pub mod validation;

// Re-exportar tipos comunes para facilitar su uso
pub use errors::{AppError, AppResult, ErrorResponse, ResultExt};

use actix_cors::Cors;
use actix_web::web;

/// CORS abierto: cualquier origen, método y cabecera, con credenciales
pub fn cors() -> Cors {
    Cors::permissive()
}

/// Cuerpos JSON ilegibles se responden como error de validación (422)
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation(format!("Invalid request body: {}", err)).into()
    })
}

/// Ids de ruta no numéricos se responden como no encontrado (404)
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::NotFound(format!("Not found: {}", err)).into())
}

/// Configura todas las rutas de la API bajo `/api`
///
/// ## Rutas configuradas
///
/// - `/api/tables/*` - Ver [`table::routes`]
/// - `/api/reservations/*` - Ver [`reservation::routes`]
/// - `/api/health` - Ver [`health::routes`]
///
/// # Ejemplo
///
/// ```no_run
/// use actix_web::{web, App};
/// use std::sync::Arc;
/// use table_reservation::{api, db};
///
/// let repo: Arc<dyn db::Repository> = Arc::new(db::MemoryStore::new());
/// let app = App::new()
///     .app_data(web::Data::from(repo))
///     .configure(api::init_routes);
/// ```
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .app_data(path_config())
            .configure(table::routes)
            .configure(reservation::routes)
            .configure(health::routes),
    );
}
