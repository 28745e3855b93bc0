//! # Logging
//!
//! Inicialización de `tracing` y utilidades para registrar cadenas de errores.

use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

/// Configura el subscriber global de tracing
///
/// `RUST_LOG` tiene prioridad; las directivas por defecto dependen de `debug`.
/// Con `echo` se muestran además las sentencias SQL que registra sqlx.
pub fn init(debug: bool, echo: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(debug, echo)),
        )
        .init();
}

fn default_filter(debug: bool, echo: bool) -> EnvFilter {
    let app_level = if debug { "debug" } else { "info" };
    let sqlx_level = if debug { "info" } else { "warn" };

    let mut directives = format!(
        "table_reservation={},sqlx={},actix_web=info",
        app_level, sqlx_level
    );
    if echo {
        directives.push_str(",sqlx::query=debug");
    }

    EnvFilter::new(directives)
}

/// Recorre `source()` y devuelve los mensajes de toda la cadena de errores
pub fn error_chain<E>(error: &E) -> Vec<String>
where
    E: StdError + 'static,
{
    let mut chain = Vec::new();
    let mut current: Option<&dyn StdError> = Some(error);

    while let Some(err) = current {
        chain.push(err.to_string());
        current = err.source();
    }

    chain
}

/// Registra la cadena completa de errores
///
/// # Ejemplo
/// ```rust
/// use table_reservation::telemetry::log_error_chain;
///
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
/// log_error_chain(&err, Some("while reading config"));
/// ```
pub fn log_error_chain<E>(error: &E, context: Option<&str>)
where
    E: StdError + 'static,
{
    let chain = error_chain(error);

    match context {
        Some(ctx) => tracing::error!(
            context = %ctx,
            error_chain = ?chain,
            "Error with full chain (with context)"
        ),
        None => tracing::error!(error_chain = ?chain, "Error with full chain"),
    }
}

/// Extension trait para `Result` que registra la cadena de errores sin consumirla
pub trait ErrorLogExt<T, E> {
    /// Registra la cadena de errores con contexto adicional
    fn log_error_context(self, context: &str) -> Result<T, E>;
}

impl<T, E> ErrorLogExt<T, E> for Result<T, E>
where
    E: StdError + 'static,
{
    fn log_error_context(self, context: &str) -> Result<T, E> {
        if let Err(ref error) = self {
            log_error_chain(error, Some(context));
        }
        self
    }
}
