//! # API de Mesas
//!
//! - Listar mesas
//! - Consultar una mesa por id
//! - Crear mesas
//! - Eliminar mesas (sólo si no tienen reservas)

use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde::Deserialize;

use super::validation::{validate_positive, validate_text};
use super::AppResult;
use crate::db::{NewTable, Repository};
use crate::services;

/// Cuerpo para crear una mesa
#[derive(Debug, Deserialize)]
pub struct TableCreate {
    /// Nombre visible de la mesa (1..100 caracteres)
    pub name: String,
    /// Número de comensales (>= 1)
    pub seats: i32,
    /// Zona del local (1..200 caracteres)
    pub location: String,
}

impl TableCreate {
    pub fn validate(self) -> AppResult<NewTable> {
        validate_text("name", &self.name, 100)?;
        validate_positive("seats", self.seats)?;
        validate_text("location", &self.location, 200)?;

        Ok(NewTable {
            name: self.name,
            seats: self.seats,
            location: self.location,
        })
    }
}

/// Lista todas las mesas
///
/// # Errores
/// - `404 Not Found`: no hay ninguna mesa
#[get("/tables")]
async fn get_tables(repo: web::Data<dyn Repository>) -> AppResult<impl Responder> {
    let tables = services::table::list_tables(repo.get_ref()).await?;
    Ok(HttpResponse::Ok().json(tables))
}

#[get("/tables/{id}")]
async fn get_table(
    repo: web::Data<dyn Repository>,
    path: web::Path<i32>,
) -> AppResult<impl Responder> {
    let table = services::table::get_table(repo.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(table))
}

/// Crea una mesa
///
/// # Respuesta
/// ```json
/// { "id": 1, "name": "T1", "seats": 4, "location": "Main Hall" }
/// ```
///
/// # Errores
/// - `400 Bad Request`: el almacén no pudo crearla
/// - `422 Unprocessable Entity`: datos inválidos
#[post("/tables")]
async fn create_table(
    repo: web::Data<dyn Repository>,
    data: web::Json<TableCreate>,
) -> AppResult<impl Responder> {
    let new_table = data.into_inner().validate()?;
    let table = services::table::create_table(repo.get_ref(), new_table).await?;
    Ok(HttpResponse::Ok().json(table))
}

/// Elimina una mesa
///
/// # Errores
/// - `404 Not Found`: la mesa no existe
/// - `409 Conflict`: la mesa todavía tiene reservas
#[delete("/tables/{id}")]
async fn delete_table(
    repo: web::Data<dyn Repository>,
    path: web::Path<i32>,
) -> AppResult<impl Responder> {
    services::table::delete_table(repo.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Table deleted" })))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_tables);
    cfg.service(get_table);
    cfg.service(create_table);
    cfg.service(delete_table);
}
