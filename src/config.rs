//! # Configuración
//!
//! Toda la configuración del servidor viene de variables de entorno
//! (cargadas opcionalmente desde `.env` con `dotenvy`).
//!
//! ```env
//! DEBUG=false
//! APP_HOST=0.0.0.0
//! APP_PORT=8000
//!
//! DB_DRIVER=postgres
//! DB_HOST=db
//! DB_PORT=5432
//! DB_DATABASE=postgres
//! DB_USER=postgres
//! DB_PASSWORD=password
//! DB_ECHO=false
//! DB_POOL_PRE_PING=true
//! DB_MAX_CONNECTIONS=5
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error al leer la configuración desde el entorno
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("unknown database driver '{0}', expected postgres or memory")]
    UnknownDriver(String),
}

/// Backend de almacenamiento seleccionado con `DB_DRIVER`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbDriver {
    /// PostgreSQL vía sqlx
    Postgres,
    /// Almacén en memoria del proceso (desarrollo local y tests)
    Memory,
}

impl FromStr for DbDriver {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "postgresql+asyncpg" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::UnknownDriver(other.to_string())),
        }
    }
}

impl fmt::Display for DbDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => f.write_str("postgres"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Parámetros de conexión a la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub driver: DbDriver,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    /// Registra cada sentencia SQL ejecutada
    pub echo: bool,
    /// Comprueba la conexión antes de entregarla desde el pool
    pub pool_pre_ping: bool,
    pub max_connections: u32,
}

/// Configuración completa del proceso
#[derive(Debug, Clone)]
pub struct Settings {
    pub debug: bool,
    pub host: String,
    pub port: u16,
    pub database: DatabaseSettings,
}

impl Settings {
    /// Lee la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Lee la configuración desde una función de búsqueda arbitraria
    ///
    /// Las variables ausentes o vacías toman su valor por defecto.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = DatabaseSettings {
            driver: parse_or(&get, "DB_DRIVER", DbDriver::Postgres)?,
            host: get("DB_HOST").unwrap_or_else(|| "db".to_string()),
            port: parse_or(&get, "DB_PORT", 5432)?,
            database: get("DB_DATABASE").unwrap_or_else(|| "postgres".to_string()),
            user: get("DB_USER").unwrap_or_else(|| "postgres".to_string()),
            password: get("DB_PASSWORD").unwrap_or_else(|| "password".to_string()),
            echo: flag_or(&get, "DB_ECHO", false)?,
            pool_pre_ping: flag_or(&get, "DB_POOL_PRE_PING", true)?,
            max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 5)?,
        };

        Ok(Settings {
            debug: flag_or(&get, "DEBUG", false)?,
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&get, "APP_PORT", 8000)?,
            database,
        })
    }

    /// Dirección `host:puerto` donde escucha el servidor HTTP
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, F>(get: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

fn flag_or<F>(get: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(value) => parse_flag(&value).ok_or_else(|| ConfigError::InvalidValue {
            key,
            value,
            reason: "expected a boolean".to_string(),
        }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
