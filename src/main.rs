//! # Table Reservation Server
//!
//! Servidor web para la gestión de mesas y reservas de un restaurante,
//! construido con Rust, Actix Web y PostgreSQL.
//!
//! ## Configuración
//!
//! El servidor se configura mediante variables de entorno (archivo `.env`),
//! ver [`table_reservation::config`]:
//!
//! ```env
//! APP_PORT=8000
//! DB_HOST=localhost
//! DB_DATABASE=postgres
//! DB_USER=postgres
//! DB_PASSWORD=password
//! RUST_LOG=debug,sqlx=warn
//! ```
//!
//! ## Ejecución
//!
//! ```bash
//! # 1. PostgreSQL
//! # Docker: docker run -d --name pg -p 5432:5432 -e POSTGRES_PASSWORD=password postgres:16
//!
//! # 2. Compilar y ejecutar (las migraciones se aplican al arrancar)
//! DB_HOST=localhost cargo run
//!
//! # Sin base de datos
//! DB_DRIVER=memory cargo run
//! ```
//!
//! ## Arquitectura
//!
//! ```text
//! Cliente HTTP/JSON
//!     ↓
//! API REST (Actix Web)
//!     ↓
//! Servicios (validación de mesa, detección de solapes)
//!     ↓ Repository
//! PostgreSQL (sqlx) | memoria
//! ```

use actix_web::{middleware, web, App, HttpServer};
use table_reservation::{api, config::Settings, db, telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env().map_err(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    telemetry::init(settings.debug, settings.database.echo);

    tracing::info!(
        driver = %settings.database.driver,
        debug = settings.debug,
        "Starting table reservation server"
    );

    let repo = match db::connect(&settings).await {
        Ok(repo) => repo,
        Err(e) => {
            tracing::error!("Error connecting to the database: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Database error: {}", e),
            ));
        }
    };

    let bind_address = settings.bind_address();
    tracing::info!("Server listening on {}", bind_address);

    let app_repo = repo.clone();
    let result = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(app_repo.clone()))
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .wrap(api::cors())
            .configure(api::init_routes)
    })
    .bind(&bind_address)?
    .run()
    .await;

    repo.close().await;
    tracing::info!("Server stopped");
    result
}
