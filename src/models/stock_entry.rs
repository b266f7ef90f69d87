//! Modelo de TyreStockEntry
//!
//! Una unidad física de neumático en inventario, su estado derivado del
//! almacén actual, la contabilidad de kilómetros y el historial de movimientos.
//! Los campos solo se modifican a través de `TyreLedger::move_tyre`.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::tyre_position::TyrePosition;
use crate::models::tyre_size::TyreSize;
use crate::models::tyre_store::StoreCatalog;
use crate::utils::errors::{validation_error, LedgerError, LedgerResult};
use crate::utils::validation::{validate_not_empty, validate_odometer, validate_tread_depth, validate_vehicle_reg};

/// Estado del neumático - derivado del tipo de almacén
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TyreStatus {
    Active,
    Holding,
    Retread,
    Scrapped,
}

impl TyreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TyreStatus::Active => "active",
            TyreStatus::Holding => "holding",
            TyreStatus::Retread => "retread",
            TyreStatus::Scrapped => "scrapped",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TyreStatus::Scrapped)
    }
}

/// Tipo de neumático según su uso
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TyreType {
    Steer,
    Drive,
    Trailer,
    Spare,
}

/// Tipo de evento del historial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementEvent {
    Mounted,
    Removed,
    Moved,
    Retreaded,
    Scrapped,
}

/// Datos de montaje en vehículo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountDetails {
    pub vehicle_reg: String,
    pub position: TyrePosition,
}

impl MountDetails {
    pub fn new(vehicle_reg: impl Into<String>, position: TyrePosition) -> Self {
        Self {
            vehicle_reg: vehicle_reg.into(),
            position,
        }
    }
}

/// Registro inmutable de un movimiento
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRecord {
    pub event: MovementEvent,
    pub from_store: String,
    pub to_store: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_reg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<TyrePosition>,
    pub odometer: f64,
    pub timestamp: DateTime<Utc>,
    pub user: String,
}

/// Request de ingreso de stock (primera entrada del neumático)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StockIntake {
    #[validate(length(min = 1, max = 64))]
    pub tyre_id: String,

    #[validate(length(min = 1, max = 100))]
    pub store_id: String,

    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(max = 100))]
    pub pattern: String,

    pub size: String,

    pub tyre_type: TyreType,

    pub current_tread_depth: f64,

    pub odometer: f64,

    #[serde(default)]
    pub mount: Option<MountDetails>,
}

/// Neumático en inventario
///
/// Al deserializar un snapshot almacenado se rechazan contadores negativos o
/// no finitos; la coherencia estado/almacén la comprueba `TyreLedger`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TyreStockEntry {
    pub(crate) tyre_id: String,
    pub(crate) brand: String,
    pub(crate) pattern: String,
    pub(crate) size: TyreSize,
    #[serde(rename = "type")]
    pub(crate) tyre_type: TyreType,
    pub(crate) current_store_id: String,
    pub(crate) status: TyreStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) vehicle_reg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) position: Option<TyrePosition>,
    pub(crate) current_tread_depth: f64,
    pub(crate) current_odometer: f64,
    pub(crate) last_mount_odometer: Option<f64>,
    pub(crate) km_covered: f64,
    pub(crate) history: Vec<MovementRecord>,
}

/// Forma almacenada de `TyreStockEntry`, antes de validar
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredStockEntry {
    tyre_id: String,
    brand: String,
    pattern: String,
    size: TyreSize,
    #[serde(rename = "type")]
    tyre_type: TyreType,
    current_store_id: String,
    status: TyreStatus,
    #[serde(default)]
    vehicle_reg: Option<String>,
    #[serde(default)]
    position: Option<TyrePosition>,
    current_tread_depth: f64,
    current_odometer: f64,
    #[serde(default)]
    last_mount_odometer: Option<f64>,
    km_covered: f64,
    #[serde(default)]
    history: Vec<MovementRecord>,
}

impl<'de> Deserialize<'de> for TyreStockEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let stored = StoredStockEntry::deserialize(deserializer)?;
        let entry = TyreStockEntry {
            tyre_id: stored.tyre_id,
            brand: stored.brand,
            pattern: stored.pattern,
            size: stored.size,
            tyre_type: stored.tyre_type,
            current_store_id: stored.current_store_id,
            status: stored.status,
            vehicle_reg: stored.vehicle_reg,
            position: stored.position,
            current_tread_depth: stored.current_tread_depth,
            current_odometer: stored.current_odometer,
            last_mount_odometer: stored.last_mount_odometer,
            km_covered: stored.km_covered,
            history: stored.history,
        };
        entry.validate_snapshot().map_err(de::Error::custom)?;
        Ok(entry)
    }
}

impl TyreStockEntry {
    /// Crear la entrada inicial de un neumático recibido en `intake.store_id`
    pub fn intake(intake: StockIntake, catalog: &StoreCatalog) -> LedgerResult<Self> {
        intake.validate()?;
        validate_not_empty(&intake.tyre_id).map_err(|e| validation_error("tyre_id", e))?;
        validate_not_empty(&intake.store_id).map_err(|e| validation_error("store_id", e))?;
        validate_odometer(intake.odometer).map_err(|e| validation_error("odometer", e))?;
        validate_tread_depth(intake.current_tread_depth)
            .map_err(|e| validation_error("current_tread_depth", e))?;
        if let Some(mount) = &intake.mount {
            validate_vehicle_reg(&mount.vehicle_reg).map_err(|e| validation_error("vehicle_reg", e))?;
        }

        let size: TyreSize = intake.size.parse()?;
        let kind = catalog
            .kind_of(&intake.store_id)
            .ok_or_else(|| LedgerError::UnknownStore(intake.store_id.clone()))?;

        let (vehicle_reg, position) = match (kind.is_mount(), intake.mount) {
            (true, Some(mount)) => (Some(mount.vehicle_reg), Some(mount.position)),
            _ => (None, None),
        };

        Ok(Self {
            tyre_id: intake.tyre_id,
            brand: intake.brand,
            pattern: intake.pattern,
            size,
            tyre_type: intake.tyre_type,
            current_store_id: intake.store_id,
            status: kind.status(),
            vehicle_reg,
            position,
            current_tread_depth: intake.current_tread_depth,
            current_odometer: intake.odometer,
            last_mount_odometer: None,
            km_covered: 0.0,
            history: Vec::new(),
        })
    }

    /// Comprobar contadores de un snapshot: ids no vacíos, km y odómetros finitos y no negativos
    pub fn validate_snapshot(&self) -> LedgerResult<()> {
        let invalid = |reason: &str| LedgerError::InvalidSnapshot {
            tyre_id: self.tyre_id.clone(),
            reason: reason.to_string(),
        };

        validate_not_empty(&self.tyre_id).map_err(|_| invalid("tyreId must not be empty"))?;
        validate_not_empty(&self.current_store_id).map_err(|_| invalid("currentStoreId must not be empty"))?;
        validate_odometer(self.km_covered).map_err(|_| invalid("kmCovered must be a finite, non-negative number"))?;
        validate_odometer(self.current_odometer)
            .map_err(|_| invalid("currentOdometer must be a finite, non-negative number"))?;
        if let Some(odometer) = self.last_mount_odometer {
            validate_odometer(odometer)
                .map_err(|_| invalid("lastMountOdometer must be a finite, non-negative number"))?;
        }
        validate_tread_depth(self.current_tread_depth)
            .map_err(|_| invalid("currentTreadDepth must be a finite, non-negative number"))?;
        Ok(())
    }

    pub fn tyre_id(&self) -> &str {
        &self.tyre_id
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn size(&self) -> TyreSize {
        self.size
    }

    pub fn tyre_type(&self) -> TyreType {
        self.tyre_type
    }

    pub fn current_store_id(&self) -> &str {
        &self.current_store_id
    }

    pub fn status(&self) -> TyreStatus {
        self.status
    }

    pub fn vehicle_reg(&self) -> Option<&str> {
        self.vehicle_reg.as_deref()
    }

    pub fn position(&self) -> Option<TyrePosition> {
        self.position
    }

    pub fn current_tread_depth(&self) -> f64 {
        self.current_tread_depth
    }

    pub fn current_odometer(&self) -> f64 {
        self.current_odometer
    }

    pub fn last_mount_odometer(&self) -> Option<f64> {
        self.last_mount_odometer
    }

    pub fn km_covered(&self) -> f64 {
        self.km_covered
    }

    /// Historial en orden de inserción
    pub fn history(&self) -> &[MovementRecord] {
        &self.history
    }

    pub fn last_movement(&self) -> Option<&MovementRecord> {
        self.history.last()
    }

    pub fn is_mounted(&self) -> bool {
        self.status == TyreStatus::Active
    }
}
