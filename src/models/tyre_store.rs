//! Modelo de TyreStore
//!
//! Almacenes lógicos de neumáticos (montaje en vehículo, bahía de espera,
//! cola de recauchutado, desecho) y el catálogo que los agrupa. Los almacenes
//! son datos de referencia: ningún neumático es dueño de un almacén.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::environment::LedgerConfig;
use crate::models::stock_entry::TyreStatus;

/// Tipo de almacén
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    VehicleMount,
    HoldingBay,
    RetreadQueue,
    Scrap,
    Other,
}

impl StoreKind {
    /// Estado resultante de mover un neumático a un almacén de este tipo
    pub fn status(&self) -> TyreStatus {
        match self {
            StoreKind::VehicleMount => TyreStatus::Active,
            StoreKind::HoldingBay => TyreStatus::Holding,
            StoreKind::RetreadQueue => TyreStatus::Retread,
            StoreKind::Scrap | StoreKind::Other => TyreStatus::Scrapped,
        }
    }

    pub fn is_mount(&self) -> bool {
        matches!(self, StoreKind::VehicleMount)
    }
}

/// Almacén lógico de neumáticos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TyreStore {
    pub id: String,
    pub name: String,
    pub kind: StoreKind,
}

impl TyreStore {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: StoreKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }
}

/// Catálogo de almacenes indexado por id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreCatalog {
    stores: BTreeMap<String, TyreStore>,
}

impl StoreCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catálogo con los cuatro almacenes conocidos de la configuración
    pub fn from_config(config: &LedgerConfig) -> Self {
        let ids = &config.stores;
        let mut catalog = Self::new();
        catalog.register(TyreStore::new(&ids.vehicle_mount, "Vehicle Tyre Store", StoreKind::VehicleMount));
        catalog.register(TyreStore::new(&ids.holding_bay, "Holding Bay", StoreKind::HoldingBay));
        catalog.register(TyreStore::new(&ids.retread, "Retread Bay", StoreKind::RetreadQueue));
        catalog.register(TyreStore::new(&ids.scrap, "Scrap Store", StoreKind::Scrap));
        catalog
    }

    /// Registrar un almacén; devuelve el anterior si el id ya existía
    pub fn register(&mut self, store: TyreStore) -> Option<TyreStore> {
        self.stores.insert(store.id.clone(), store)
    }

    pub fn get(&self, store_id: &str) -> Option<&TyreStore> {
        self.stores.get(store_id)
    }

    pub fn contains(&self, store_id: &str) -> bool {
        self.stores.contains_key(store_id)
    }

    pub fn kind_of(&self, store_id: &str) -> Option<StoreKind> {
        self.get(store_id).map(|store| store.kind)
    }

    /// Estado que tendría un neumático en `store_id`, si el almacén existe
    pub fn status_for(&self, store_id: &str) -> Option<TyreStatus> {
        self.kind_of(store_id).map(|kind| kind.status())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TyreStore> {
        self.stores.values()
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
