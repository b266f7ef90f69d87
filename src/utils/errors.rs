//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del ledger de neumáticos
//! y su conversión a respuestas serializables para la capa de presentación.
//! Ningún error es fatal: toda operación rechazada deja el estado previo intacto.

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Errores principales del ledger
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Stale state for tyre '{tyre_id}': caller expected store '{supplied}', current store is '{current}'")]
    StaleState {
        tyre_id: String,
        supplied: String,
        current: String,
    },

    #[error("No-op move: tyre is already in store '{store_id}'")]
    NoOpMove { store_id: String },

    #[error("Unknown store: {0}")]
    UnknownStore(String),

    #[error("Invalid odometer reading: {0}")]
    InvalidOdometer(f64),

    #[error("Tyre '{tyre_id}' is scrapped and cannot be moved")]
    TerminalStatus { tyre_id: String },

    #[error("Invalid snapshot for tyre '{tyre_id}': {reason}")]
    InvalidSnapshot { tyre_id: String, reason: String },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid tyre position: {0}")]
    InvalidPosition(String),

    #[error("Invalid tyre size: {0}")]
    InvalidTyreSize(String),

    #[error("Duplicate tyre: {0}")]
    DuplicateTyre(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    /// Código estable para la capa de presentación
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::StaleState { .. } => "STALE_STATE",
            LedgerError::NoOpMove { .. } => "NO_OP_MOVE",
            LedgerError::UnknownStore(_) => "UNKNOWN_STORE",
            LedgerError::InvalidOdometer(_) => "INVALID_ODOMETER",
            LedgerError::TerminalStatus { .. } => "TERMINAL_STATUS",
            LedgerError::InvalidSnapshot { .. } => "INVALID_SNAPSHOT",
            LedgerError::Validation(_) => "VALIDATION_ERROR",
            LedgerError::InvalidPosition(_) => "INVALID_POSITION",
            LedgerError::InvalidTyreSize(_) => "INVALID_TYRE_SIZE",
            LedgerError::DuplicateTyre(_) => "DUPLICATE_TYRE",
            LedgerError::NotFound(_) => "NOT_FOUND",
            LedgerError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Indica si reintentar tras refrescar el snapshot puede tener éxito
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::StaleState { .. })
    }
}

/// Error de `TyreLedger::replay`: cuántos movimientos se aplicaron antes del fallo
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Replay stopped after {applied} move(s): {source}")]
pub struct ReplayError {
    pub applied: usize,
    #[source]
    pub source: LedgerError,
}

/// Respuesta de error para la capa de presentación
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub code: String,
}

impl From<&LedgerError> for ErrorResponse {
    fn from(err: &LedgerError) -> Self {
        let (error, message, details) = match err {
            LedgerError::StaleState { tyre_id, supplied, current } => (
                "Stale State",
                "The tyre has moved since it was loaded. Refresh and try again".to_string(),
                Some(json!({ "tyre_id": tyre_id, "supplied_store": supplied, "current_store": current })),
            ),
            LedgerError::NoOpMove { store_id } => (
                "No-op Move",
                "Source and destination store are the same".to_string(),
                Some(json!({ "store_id": store_id })),
            ),
            LedgerError::UnknownStore(store_id) => (
                "Unknown Store",
                format!("Store '{}' does not exist", store_id),
                None,
            ),
            LedgerError::InvalidOdometer(value) => (
                "Invalid Odometer",
                "The odometer reading must be a finite, non-negative number of kilometers".to_string(),
                Some(json!({ "odometer": value.to_string() })),
            ),
            LedgerError::TerminalStatus { tyre_id } => (
                "Terminal Status",
                format!("Tyre '{}' has been scrapped and can no longer be moved", tyre_id),
                None,
            ),
            LedgerError::InvalidSnapshot { tyre_id, reason } => (
                "Invalid Snapshot",
                "The stored tyre record is inconsistent and cannot be moved".to_string(),
                Some(json!({ "tyre_id": tyre_id, "reason": reason })),
            ),
            LedgerError::Validation(e) => (
                "Validation Error",
                "The provided data is invalid".to_string(),
                Some(json!(e)),
            ),
            LedgerError::InvalidPosition(msg) => ("Invalid Position", msg.clone(), None),
            LedgerError::InvalidTyreSize(msg) => ("Invalid Tyre Size", msg.clone(), None),
            LedgerError::DuplicateTyre(tyre_id) => (
                "Duplicate Tyre",
                format!("Tyre '{}' is already in stock", tyre_id),
                None,
            ),
            LedgerError::NotFound(msg) => ("Not Found", msg.clone(), None),
            LedgerError::Config(msg) => ("Configuration Error", msg.clone(), None),
        };

        Self {
            error: error.to_string(),
            message,
            details,
            code: err.code().to_string(),
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, error: validator::ValidationError) -> LedgerError {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    LedgerError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> LedgerError {
    LedgerError::NotFound(format!("{} with id '{}' not found", resource, id))
}
