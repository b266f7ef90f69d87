//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del ledger: identificadores de los
//! almacenes conocidos y la política de desgaste usada por `WearService`.

use std::env;
use std::str::FromStr;

use crate::utils::errors::{LedgerError, LedgerResult};

pub const DEFAULT_VEHICLE_STORE_ID: &str = "VehicleTyreStore";
pub const DEFAULT_HOLDING_STORE_ID: &str = "HoldingBay";
pub const DEFAULT_RETREAD_STORE_ID: &str = "RetreadBay";
pub const DEFAULT_SCRAP_STORE_ID: &str = "ScrapStore";

/// Identificadores de los cuatro almacenes conocidos
#[derive(Debug, Clone, PartialEq)]
pub struct StoreIds {
    pub vehicle_mount: String,
    pub holding_bay: String,
    pub retread: String,
    pub scrap: String,
}

impl Default for StoreIds {
    fn default() -> Self {
        Self {
            vehicle_mount: DEFAULT_VEHICLE_STORE_ID.to_string(),
            holding_bay: DEFAULT_HOLDING_STORE_ID.to_string(),
            retread: DEFAULT_RETREAD_STORE_ID.to_string(),
            scrap: DEFAULT_SCRAP_STORE_ID.to_string(),
        }
    }
}

/// Política de desgaste (mm y km)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WearPolicy {
    pub new_tread_depth_mm: f64,
    pub legal_min_tread_mm: f64,
    pub min_safe_tread_mm: f64,
    pub average_daily_km: f64,
}

impl Default for WearPolicy {
    fn default() -> Self {
        Self {
            new_tread_depth_mm: 20.0,
            legal_min_tread_mm: 3.0,
            min_safe_tread_mm: 1.6,
            average_daily_km: 150.0,
        }
    }
}

impl WearPolicy {
    /// Verificar que la política sea coherente
    pub fn validate(&self) -> LedgerResult<()> {
        let values = [
            ("new_tread_depth_mm", self.new_tread_depth_mm),
            ("legal_min_tread_mm", self.legal_min_tread_mm),
            ("min_safe_tread_mm", self.min_safe_tread_mm),
            ("average_daily_km", self.average_daily_km),
        ];
        if let Some((name, _)) = values.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(LedgerError::Config(format!("{} must be a finite, non-negative number", name)));
        }
        if self.new_tread_depth_mm <= self.legal_min_tread_mm {
            return Err(LedgerError::Config(
                "new_tread_depth_mm must be greater than legal_min_tread_mm".to_string(),
            ));
        }
        if self.average_daily_km <= 0.0 {
            return Err(LedgerError::Config("average_daily_km must be positive".to_string()));
        }
        Ok(())
    }
}

/// Configuración del ledger
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerConfig {
    pub stores: StoreIds,
    pub wear: WearPolicy,
}

impl LedgerConfig {
    /// Cargar desde el entorno (lee `.env` si existe)
    pub fn from_env() -> LedgerResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar desde una función de búsqueda arbitraria; las claves ausentes usan el valor por defecto
    pub fn from_lookup<F>(lookup: F) -> LedgerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let stores = StoreIds {
            vehicle_mount: text("TYRE_VEHICLE_STORE_ID", &defaults.stores.vehicle_mount),
            holding_bay: text("TYRE_HOLDING_STORE_ID", &defaults.stores.holding_bay),
            retread: text("TYRE_RETREAD_STORE_ID", &defaults.stores.retread),
            scrap: text("TYRE_SCRAP_STORE_ID", &defaults.stores.scrap),
        };

        let wear = WearPolicy {
            new_tread_depth_mm: parse_var(&lookup, "TYRE_NEW_TREAD_DEPTH_MM", defaults.wear.new_tread_depth_mm)?,
            legal_min_tread_mm: parse_var(&lookup, "TYRE_LEGAL_MIN_TREAD_MM", defaults.wear.legal_min_tread_mm)?,
            min_safe_tread_mm: parse_var(&lookup, "TYRE_MIN_SAFE_TREAD_MM", defaults.wear.min_safe_tread_mm)?,
            average_daily_km: parse_var(&lookup, "TYRE_AVG_DAILY_KM", defaults.wear.average_daily_km)?,
        };
        wear.validate()?;

        let ids = [&stores.vehicle_mount, &stores.holding_bay, &stores.retread, &stores.scrap];
        for (i, id) in ids.iter().enumerate() {
            if ids[i + 1..].contains(id) {
                return Err(LedgerError::Config(format!("store id '{}' is configured twice", id)));
            }
        }

        Ok(Self { stores, wear })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> LedgerResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| LedgerError::Config(format!("{} must be a valid number, got '{}'", key, raw))),
        _ => Ok(default),
    }
}
