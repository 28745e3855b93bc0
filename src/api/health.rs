use actix_web::{get, web, HttpResponse, Responder};

use super::AppResult;
use crate::db::Repository;

/// Comprueba que el servidor y el almacén responden
#[get("/health")]
async fn health(repo: web::Data<dyn Repository>) -> AppResult<impl Responder> {
    repo.ping().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
}
