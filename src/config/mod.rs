//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de almacenes y la política de desgaste.

pub mod environment;

pub use environment::*;
