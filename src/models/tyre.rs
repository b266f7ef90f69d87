//! Modelo de Tyre
//!
//! El activo neumático con sus datos de compra, reparaciones y estado de banda.
//! Alimenta los cálculos de desgaste y coste total de propiedad.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::tyre_size::TyreSize;

/// Reparación registrada sobre un neumático
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TyreRepair {
    pub date: NaiveDate,
    pub kind: String,
    pub description: String,
    pub cost: Decimal,
    pub technician: String,
}

/// Neumático con historial de costes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tyre {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub size: TyreSize,
    pub purchase_cost: Decimal,
    #[serde(default)]
    pub repairs: Vec<TyreRepair>,
    pub tread_depth_mm: f64,
    pub km_run: f64,
    pub mounted: bool,
}

impl Tyre {
    /// Suma de costes de reparación
    pub fn repair_cost(&self) -> Decimal {
        self.repairs.iter().map(|repair| repair.cost).sum()
    }
}
