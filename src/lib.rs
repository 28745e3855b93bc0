//! # Table Reservation
//!
//! Backend de gestión de mesas y reservas de un restaurante, construido con
//! Actix Web y PostgreSQL (sqlx).
//!
//! La única regla de negocio: una reserva no puede solaparse (ni tocarse) con
//! otra reserva de la misma mesa. Ver [`overlap`] y [`services::reservation`].

pub mod api;
pub mod config;
pub mod db;
pub mod overlap;
pub mod services;
pub mod telemetry;
