//! Ledger de movimientos de neumáticos
//!
//! Valida y aplica un movimiento de un `TyreStockEntry` entre almacenes,
//! recalculando la contabilidad de odómetro/distancia y añadiendo el registro
//! al historial. La operación es pura: recibe un snapshot y devuelve uno nuevo;
//! la persistencia y la notificación son responsabilidad del llamador.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::stock_entry::{MountDetails, MovementEvent, MovementRecord, TyreStatus, TyreStockEntry};
use crate::models::tyre_store::StoreCatalog;
use crate::utils::errors::{LedgerError, LedgerResult, ReplayError};

/// Request de movimiento entre almacenes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTyreRequest {
    pub from_store_id: String,
    pub to_store_id: String,
    pub new_odometer: f64,
    pub actor: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub mount: Option<MountDetails>,
}

impl MoveTyreRequest {
    pub fn new(
        from_store_id: impl Into<String>,
        to_store_id: impl Into<String>,
        new_odometer: f64,
        actor: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            from_store_id: from_store_id.into(),
            to_store_id: to_store_id.into(),
            new_odometer,
            actor: actor.into(),
            timestamp,
            mount: None,
        }
    }

    /// Adjuntar datos de montaje (solo se conservan si el destino es un vehículo)
    pub fn with_mount(mut self, mount: MountDetails) -> Self {
        self.mount = Some(mount);
        self
    }
}

/// Ledger de neumáticos sobre un catálogo de almacenes
#[derive(Debug, Clone)]
pub struct TyreLedger {
    catalog: StoreCatalog,
}

impl TyreLedger {
    pub fn new(catalog: StoreCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &StoreCatalog {
        &self.catalog
    }

    /// Mover un neumático de `from_store_id` a `to_store_id`
    ///
    /// Falla en la primera validación que no se cumpla y nunca modifica `entry`:
    /// el llamador conserva el snapshot original ante cualquier error.
    pub fn move_tyre(&self, entry: &TyreStockEntry, request: MoveTyreRequest) -> LedgerResult<TyreStockEntry> {
        if request.from_store_id != entry.current_store_id {
            return Err(LedgerError::StaleState {
                tyre_id: entry.tyre_id.clone(),
                supplied: request.from_store_id,
                current: entry.current_store_id.clone(),
            });
        }

        if request.to_store_id == request.from_store_id {
            return Err(LedgerError::NoOpMove {
                store_id: request.to_store_id,
            });
        }

        let current_status = self.check_snapshot(entry)?;
        if current_status.is_terminal() {
            warn!("⚠️ Neumático {} desechado, movimiento a {} rechazado", entry.tyre_id, request.to_store_id);
            return Err(LedgerError::TerminalStatus {
                tyre_id: entry.tyre_id.clone(),
            });
        }

        let target_kind = self
            .catalog
            .kind_of(&request.to_store_id)
            .ok_or_else(|| LedgerError::UnknownStore(request.to_store_id.clone()))?;

        if !request.new_odometer.is_finite() || request.new_odometer < 0.0 {
            return Err(LedgerError::InvalidOdometer(request.new_odometer));
        }

        let baseline = entry.last_mount_odometer.unwrap_or(entry.current_odometer);
        let delta = request.new_odometer - baseline;
        if delta < 0.0 {
            warn!(
                "⚠️ Odómetro retrocedió para {}: base {} km, lectura {} km; no suma distancia",
                entry.tyre_id, baseline, request.new_odometer
            );
        }
        let contribution = delta.max(0.0);

        let (vehicle_reg, position) = match (target_kind.is_mount(), request.mount) {
            (true, Some(mount)) => (Some(mount.vehicle_reg), Some(mount.position)),
            _ => (None, None),
        };

        let mut history = Vec::with_capacity(entry.history.len() + 1);
        history.extend_from_slice(&entry.history);
        history.push(MovementRecord {
            event: MovementEvent::Moved,
            from_store: request.from_store_id,
            to_store: request.to_store_id.clone(),
            vehicle_reg: vehicle_reg.clone(),
            position,
            odometer: request.new_odometer,
            timestamp: request.timestamp,
            user: request.actor,
        });

        let updated = TyreStockEntry {
            current_store_id: request.to_store_id,
            status: target_kind.status(),
            vehicle_reg,
            position,
            current_odometer: request.new_odometer,
            last_mount_odometer: Some(entry.current_odometer),
            km_covered: entry.km_covered + contribution,
            history,
            ..entry.clone()
        };

        debug!(
            "🔄 Neumático {} movido a {} ({}), +{} km, total {} km",
            updated.tyre_id,
            updated.current_store_id,
            updated.status.as_str(),
            contribution,
            updated.km_covered
        );

        Ok(updated)
    }

    /// Validar el snapshot y devolver el estado que corresponde a su almacén actual
    fn check_snapshot(&self, entry: &TyreStockEntry) -> LedgerResult<TyreStatus> {
        entry.validate_snapshot()?;

        let expected = self.catalog.status_for(&entry.current_store_id).ok_or_else(|| {
            LedgerError::InvalidSnapshot {
                tyre_id: entry.tyre_id.clone(),
                reason: format!("current store '{}' is not in the catalog", entry.current_store_id),
            }
        })?;
        if expected != entry.status {
            warn!(
                "⚠️ Snapshot incoherente para {}: estado {} en almacén {}",
                entry.tyre_id,
                entry.status.as_str(),
                entry.current_store_id
            );
            return Err(LedgerError::InvalidSnapshot {
                tyre_id: entry.tyre_id.clone(),
                reason: format!(
                    "status '{}' does not match store '{}' (expected '{}')",
                    entry.status.as_str(),
                    entry.current_store_id,
                    expected.as_str()
                ),
            });
        }
        Ok(expected)
    }

    /// Aplicar una secuencia de movimientos, deteniéndose en el primer fallo
    pub fn replay<I>(&self, entry: &TyreStockEntry, requests: I) -> Result<TyreStockEntry, ReplayError>
    where
        I: IntoIterator<Item = MoveTyreRequest>,
    {
        let mut current = entry.clone();
        for (applied, request) in requests.into_iter().enumerate() {
            current = self
                .move_tyre(&current, request)
                .map_err(|source| ReplayError { applied, source })?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::LedgerConfig;
    use crate::models::stock_entry::tests::sample_intake;
    use crate::models::tyre_store::{StoreKind, TyreStore};
    use chrono::TimeZone;

    fn ledger() -> TyreLedger {
        TyreLedger::new(StoreCatalog::from_config(&LedgerConfig::default()))
    }

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn mounted_entry() -> TyreStockEntry {
        let ledger = ledger();
        let mut entry = TyreStockEntry::intake(sample_intake("VehicleTyreStore"), ledger.catalog()).unwrap();
        entry.current_odometer = 10_000.0;
        entry.last_mount_odometer = Some(8_000.0);
        entry.km_covered = 2_000.0;
        entry
    }

    #[test]
    fn test_end_to_end_scenario() {
        let entry = mounted_entry();
        let updated = ledger()
            .move_tyre(&entry, MoveTyreRequest::new("VehicleTyreStore", "HoldingBay", 10_500.0, "system", t(0)))
            .unwrap();

        assert_eq!(updated.km_covered(), 4_500.0);
        assert_eq!(updated.last_mount_odometer(), Some(10_000.0));
        assert_eq!(updated.current_odometer(), 10_500.0);
        assert_eq!(updated.status(), TyreStatus::Holding);
        assert_eq!(updated.current_store_id(), "HoldingBay");
        assert_eq!(updated.history().len(), 1);

        let record = &updated.history()[0];
        assert_eq!(record.event, MovementEvent::Moved);
        assert_eq!(record.from_store, "VehicleTyreStore");
        assert_eq!(record.to_store, "HoldingBay");
        assert_eq!(record.odometer, 10_500.0);
        assert_eq!(record.user, "system");
        assert_eq!(record.timestamp, t(0));

        // El snapshot original queda intacto
        assert_eq!(entry.km_covered(), 2_000.0);
        assert!(entry.history().is_empty());
    }

    #[test]
    fn test_baseline_falls_back_to_current_odometer() {
        let entry = TyreStockEntry::intake(sample_intake("HoldingBay"), ledger().catalog()).unwrap();
        let updated = ledger()
            .move_tyre(&entry, MoveTyreRequest::new("HoldingBay", "RetreadBay", 10_750.0, "ops", t(0)))
            .unwrap();
        assert_eq!(updated.km_covered(), 750.0);
        assert_eq!(updated.status(), TyreStatus::Retread);
    }

    #[test]
    fn test_negative_delta_contributes_zero() {
        let entry = mounted_entry();
        let updated = ledger()
            .move_tyre(&entry, MoveTyreRequest::new("VehicleTyreStore", "HoldingBay", 500.0, "ops", t(0)))
            .unwrap();
        assert_eq!(updated.km_covered(), 2_000.0);
        assert_eq!(updated.current_odometer(), 500.0);
        assert_eq!(updated.last_mount_odometer(), Some(10_000.0));
    }

    #[test]
    fn test_mount_details_kept_only_on_vehicle() {
        let ledger = ledger();
        let entry = TyreStockEntry::intake(sample_intake("HoldingBay"), ledger.catalog()).unwrap();
        let mount = MountDetails::new("AAX2987", "V2".parse().unwrap());

        let mounted = ledger
            .move_tyre(
                &entry,
                MoveTyreRequest::new("HoldingBay", "VehicleTyreStore", 10_000.0, "ops", t(0)).with_mount(mount.clone()),
            )
            .unwrap();
        assert_eq!(mounted.status(), TyreStatus::Active);
        assert_eq!(mounted.vehicle_reg(), Some("AAX2987"));
        assert_eq!(mounted.history()[0].position.unwrap().to_string(), "V2");

        let removed = ledger
            .move_tyre(
                &mounted,
                MoveTyreRequest::new("VehicleTyreStore", "HoldingBay", 12_000.0, "ops", t(60)).with_mount(mount),
            )
            .unwrap();
        assert_eq!(removed.vehicle_reg(), None);
        assert_eq!(removed.position(), None);
        assert_eq!(removed.history()[1].vehicle_reg, None);
    }

    #[test]
    fn test_validation_order() {
        let ledger = ledger();
        let entry = mounted_entry();

        // Estado obsoleto gana sobre cualquier otro fallo
        let err = ledger
            .move_tyre(&entry, MoveTyreRequest::new("HoldingBay", "HoldingBay", f64::NAN, "ops", t(0)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::StaleState { .. }));

        let err = ledger
            .move_tyre(&entry, MoveTyreRequest::new("VehicleTyreStore", "VehicleTyreStore", -1.0, "ops", t(0)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::NoOpMove { .. }));

        let err = ledger
            .move_tyre(&entry, MoveTyreRequest::new("VehicleTyreStore", "Nowhere", -1.0, "ops", t(0)))
            .unwrap_err();
        assert_eq!(err, LedgerError::UnknownStore("Nowhere".to_string()));

        for bad in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = ledger
                .move_tyre(&entry, MoveTyreRequest::new("VehicleTyreStore", "HoldingBay", bad, "ops", t(0)))
                .unwrap_err();
            assert!(matches!(err, LedgerError::InvalidOdometer(_)));
        }
    }

    #[test]
    fn test_scrapped_is_terminal() {
        let ledger = ledger();
        let entry = mounted_entry();
        let scrapped = ledger
            .move_tyre(&entry, MoveTyreRequest::new("VehicleTyreStore", "ScrapStore", 11_000.0, "ops", t(0)))
            .unwrap();
        assert_eq!(scrapped.status(), TyreStatus::Scrapped);

        let err = ledger
            .move_tyre(&scrapped, MoveTyreRequest::new("ScrapStore", "HoldingBay", 11_000.0, "ops", t(1)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::TerminalStatus { .. }));

        let err = ledger
            .move_tyre(&scrapped, MoveTyreRequest::new("ScrapStore", "ScrapStore", 11_000.0, "ops", t(1)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::NoOpMove { .. }));
    }

    #[test]
    fn test_replay_reports_applied_count() {
        let ledger = ledger();
        let entry = mounted_entry();
        let requests = vec![
            MoveTyreRequest::new("VehicleTyreStore", "HoldingBay", 10_500.0, "ops", t(0)),
            MoveTyreRequest::new("HoldingBay", "RetreadBay", 10_500.0, "ops", t(1)),
            MoveTyreRequest::new("HoldingBay", "VehicleTyreStore", 10_600.0, "ops", t(2)),
        ];

        let err = ledger.replay(&entry, requests.clone()).unwrap_err();
        assert_eq!(err.applied, 2);
        assert!(matches!(err.source, LedgerError::StaleState { .. }));

        let done = ledger.replay(&entry, requests.into_iter().take(2)).unwrap();
        assert_eq!(done.history().len(), 2);
        assert_eq!(done.status(), TyreStatus::Retread);
    }

    #[test]
    fn test_status_must_match_current_store() {
        let ledger = ledger();
        let mut entry = mounted_entry();
        entry.current_store_id = "ScrapStore".to_string();
        entry.status = TyreStatus::Holding;

        let err = ledger
            .move_tyre(&entry, MoveTyreRequest::new("ScrapStore", "VehicleTyreStore", 10_200.0, "ops", t(0)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidSnapshot { .. }));

        // Un snapshot coherente en el almacén de desecho sigue siendo terminal
        entry.status = TyreStatus::Scrapped;
        let err = ledger
            .move_tyre(&entry, MoveTyreRequest::new("ScrapStore", "VehicleTyreStore", 10_200.0, "ops", t(0)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::TerminalStatus { .. }));
    }

    #[test]
    fn test_corrupt_counters_rejected_before_move() {
        let ledger = ledger();
        let mut entry = mounted_entry();
        entry.km_covered = -50.0;
        let err = ledger
            .move_tyre(&entry, MoveTyreRequest::new("VehicleTyreStore", "HoldingBay", 10_200.0, "ops", t(0)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidSnapshot { .. }));

        let mut entry = mounted_entry();
        entry.current_store_id = "Vichels Store".to_string();
        let err = ledger
            .move_tyre(&entry, MoveTyreRequest::new("Vichels Store", "HoldingBay", 10_200.0, "ops", t(0)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidSnapshot { .. }));
    }

    #[test]
    fn test_unclassified_store_scraps_and_is_terminal() {
        let mut catalog = StoreCatalog::from_config(&LedgerConfig::default());
        catalog.register(TyreStore::new("Vichels Store", "Vichels Store", StoreKind::Other));
        let ledger = TyreLedger::new(catalog);
        let entry = TyreStockEntry::intake(sample_intake("HoldingBay"), ledger.catalog()).unwrap();

        let moved = ledger
            .move_tyre(&entry, MoveTyreRequest::new("HoldingBay", "Vichels Store", 10_400.0, "ops", t(0)))
            .unwrap();
        assert_eq!(moved.status(), TyreStatus::Scrapped);
        assert_eq!(moved.current_store_id(), "Vichels Store");
        assert_eq!(moved.km_covered(), 400.0);

        let err = ledger
            .move_tyre(&moved, MoveTyreRequest::new("Vichels Store", "HoldingBay", 10_400.0, "ops", t(1)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::TerminalStatus { .. }));
    }
}
