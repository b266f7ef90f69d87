//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del inventario de neumáticos:
//! entradas de stock, almacenes, datos de referencia y analytics.

pub mod analytics;
pub mod stock_entry;
pub mod tyre;
pub mod tyre_position;
pub mod tyre_size;
pub mod tyre_store;

pub use analytics::*;
pub use stock_entry::*;
pub use tyre::*;
pub use tyre_position::*;
pub use tyre_size::*;
pub use tyre_store::*;
