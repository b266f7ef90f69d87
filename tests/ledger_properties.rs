use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use tyre_ledger::{LedgerConfig, LedgerError, MoveTyreRequest, StoreCatalog, TyreLedger, TyreStatus, TyreStockEntry};

const STORES: [&str; 3] = ["VehicleTyreStore", "HoldingBay", "RetreadBay"];

fn ledger() -> TyreLedger {
    TyreLedger::new(StoreCatalog::from_config(&LedgerConfig::default()))
}

fn fresh_entry(odometer: f64) -> TyreStockEntry {
    serde_json::from_value(serde_json::json!({
        "tyreId": "MAT0171",
        "brand": "Firemax",
        "pattern": "FM188",
        "size": "315/80R22.5",
        "type": "drive",
        "currentStoreId": "HoldingBay",
        "status": "holding",
        "currentTreadDepth": 18.0,
        "currentOdometer": odometer,
        "kmCovered": 0.0
    }))
    .unwrap()
}

/// Secuencia de (índice de almacén destino, lectura de odómetro)
fn moves() -> impl Strategy<Value = Vec<(usize, f64)>> {
    prop::collection::vec((0..STORES.len(), 0.0..500_000.0f64), 1..20)
}

/// Aplica solo los movimientos válidos (destino distinto del actual)
fn apply(ledger: &TyreLedger, start: &TyreStockEntry, steps: &[(usize, f64)]) -> Vec<TyreStockEntry> {
    let mut snapshots = vec![start.clone()];
    for (index, (store, odometer)) in steps.iter().enumerate() {
        let current = snapshots.last().unwrap();
        let target = STORES[*store];
        if target == current.current_store_id() {
            continue;
        }
        let request = MoveTyreRequest::new(
            current.current_store_id(),
            target,
            *odometer,
            "prop",
            Utc.timestamp_opt(1_700_000_000 + index as i64, 0).unwrap(),
        );
        let next = ledger.move_tyre(current, request).unwrap();
        snapshots.push(next);
    }
    snapshots
}

proptest! {
    #[test]
    fn km_covered_never_decreases(start in 0.0..500_000.0f64, steps in moves()) {
        let snapshots = apply(&ledger(), &fresh_entry(start), &steps);
        for pair in snapshots.windows(2) {
            prop_assert!(pair[1].km_covered() >= pair[0].km_covered());
        }
    }

    #[test]
    fn status_depends_only_on_target(start in 0.0..500_000.0f64, steps in moves()) {
        let ledger = ledger();
        let snapshots = apply(&ledger, &fresh_entry(start), &steps);
        for snapshot in snapshots.iter().skip(1) {
            let expected = ledger.catalog().status_for(snapshot.current_store_id()).unwrap();
            prop_assert_eq!(snapshot.status(), expected);
        }
    }

    #[test]
    fn history_is_append_only(start in 0.0..500_000.0f64, steps in moves()) {
        let snapshots = apply(&ledger(), &fresh_entry(start), &steps);
        for (count, pair) in snapshots.windows(2).enumerate() {
            let (before, after) = (&pair[0], &pair[1]);
            prop_assert_eq!(after.history().len(), count + 1);
            prop_assert_eq!(&after.history()[..before.history().len()], before.history());
        }
    }

    #[test]
    fn stale_source_is_rejected(start in 0.0..500_000.0f64, odometer in 0.0..500_000.0f64, source in 0..STORES.len(), target in 0..STORES.len()) {
        let entry = fresh_entry(start);
        prop_assume!(STORES[source] != entry.current_store_id());

        let request = MoveTyreRequest::new(STORES[source], STORES[target], odometer, "prop", Utc::now());
        let err = ledger().move_tyre(&entry, request).unwrap_err();
        let is_stale = matches!(err, LedgerError::StaleState { .. });
        prop_assert!(is_stale);
        prop_assert_eq!(entry.status(), TyreStatus::Holding);
        prop_assert!(entry.history().is_empty());
    }
}
