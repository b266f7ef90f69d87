//! Ledger de inventario de neumáticos para flotas
//!
//! Registra movimientos de neumáticos entre almacenes lógicos, lleva la
//! contabilidad de km recorridos y clasifica neumáticos por coste por km.

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use config::environment::{LedgerConfig, StoreIds, WearPolicy};
pub use models::*;
pub use services::*;
pub use utils::errors::{ErrorResponse, LedgerError, LedgerResult, ReplayError};
