//! Inventario de neumáticos en memoria
//!
//! Colección autoritativa de `TyreStockEntry` indexada por id. Cada movimiento
//! pasa por el `TyreLedger` y el snapshot solo se reemplaza si tiene éxito.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::stock_entry::{StockIntake, TyreStockEntry};
use crate::services::tyre_ledger::{MoveTyreRequest, TyreLedger};
use crate::utils::errors::{not_found_error, LedgerError, LedgerResult};

/// Resumen de almacenes y neumáticos
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_stores: usize,
    pub total_tyres: usize,
    pub store_type_counts: BTreeMap<String, usize>,
    pub tyres_by_status: BTreeMap<String, usize>,
}

#[derive(Debug, Clone)]
pub struct TyreInventory {
    ledger: TyreLedger,
    entries: BTreeMap<String, TyreStockEntry>,
}

impl TyreInventory {
    pub fn new(ledger: TyreLedger) -> Self {
        Self {
            ledger,
            entries: BTreeMap::new(),
        }
    }

    pub fn ledger(&self) -> &TyreLedger {
        &self.ledger
    }

    /// Dar de alta un neumático nuevo en su almacén de recepción
    pub fn receive(&mut self, intake: StockIntake) -> LedgerResult<&TyreStockEntry> {
        if self.entries.contains_key(&intake.tyre_id) {
            return Err(LedgerError::DuplicateTyre(intake.tyre_id));
        }

        let entry = TyreStockEntry::intake(intake, self.ledger.catalog())?;
        debug!("📥 Neumático {} recibido en {}", entry.tyre_id(), entry.current_store_id());

        let tyre_id = entry.tyre_id().to_string();
        Ok(&*self.entries.entry(tyre_id).or_insert(entry))
    }

    pub fn get(&self, tyre_id: &str) -> Option<&TyreStockEntry> {
        self.entries.get(tyre_id)
    }

    pub fn entries_in_store<'a>(&'a self, store_id: &'a str) -> impl Iterator<Item = &'a TyreStockEntry> + 'a {
        self.entries
            .values()
            .filter(move |entry| entry.current_store_id() == store_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mover un neumático del inventario; ante error el snapshot no cambia
    pub fn move_tyre(&mut self, tyre_id: &str, request: MoveTyreRequest) -> LedgerResult<&TyreStockEntry> {
        let current = self
            .entries
            .get_mut(tyre_id)
            .ok_or_else(|| not_found_error("Tyre", tyre_id))?;

        *current = self.ledger.move_tyre(current, request)?;
        Ok(&*current)
    }

    pub fn store_stats(&self) -> StoreStats {
        let mut stats = StoreStats {
            total_stores: self.ledger.catalog().len(),
            total_tyres: self.entries.len(),
            ..StoreStats::default()
        };

        for store in self.ledger.catalog().iter() {
            *stats.store_type_counts.entry(store.name.clone()).or_insert(0) += 1;
        }
        for entry in self.entries.values() {
            *stats.tyres_by_status.entry(entry.status().as_str().to_string()).or_insert(0) += 1;
        }

        stats
    }
}
