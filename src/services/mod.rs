//! Services module
//!
//! Este módulo contiene la lógica de negocio del inventario de neumáticos:
//! el ledger de movimientos, el inventario en memoria, el ranking de coste
//! por km y los cálculos de desgaste.

pub mod inventory_service;
pub mod ranking;
pub mod tyre_ledger;
pub mod wear_service;

pub use inventory_service::*;
pub use ranking::*;
pub use tyre_ledger::*;
pub use wear_service::*;
