//! Servicio de desgaste y coste de propiedad
//!
//! Cálculos sobre `Tyre`: tasa de desgaste, vida restante estimada,
//! coste total de propiedad y conversión a `TyreStat` para el ranking.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::environment::WearPolicy;
use crate::models::analytics::{PerformanceAnalysis, PerformanceTier, TyreStat};
use crate::models::tyre::Tyre;
use crate::services::ranking::TyreRankingEngine;

/// Vida restante estimada
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemainingLife {
    pub kilometers: f64,
    pub days: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WearService {
    policy: WearPolicy,
}

impl WearService {
    pub fn new(policy: WearPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &WearPolicy {
        &self.policy
    }

    /// mm de banda perdidos por cada 1000 km; `None` si no está montado o sin km
    pub fn wear_rate(&self, tyre: &Tyre) -> Option<f64> {
        if !tyre.mounted || tyre.km_run <= 0.0 {
            return None;
        }
        let worn_depth = self.policy.new_tread_depth_mm - tyre.tread_depth_mm;
        Some(worn_depth / tyre.km_run * 1000.0)
    }

    pub fn cost_per_km(&self, tyre: &Tyre) -> f64 {
        if tyre.km_run <= 0.0 {
            return 0.0;
        }
        decimal_to_f64(tyre.purchase_cost) / tyre.km_run
    }

    /// Km restantes hasta el mínimo legal, extrapolando el desgaste lineal
    pub fn remaining_life_km(&self, tyre: &Tyre) -> f64 {
        let used_tread = self.policy.new_tread_depth_mm - tyre.tread_depth_mm;
        let wear_per_km = if tyre.km_run > 0.0 { used_tread / tyre.km_run } else { 0.0 };
        let remaining_tread = tyre.tread_depth_mm - self.policy.legal_min_tread_mm;
        let remaining_km = if wear_per_km > 0.0 { remaining_tread / wear_per_km } else { 0.0 };
        remaining_km.max(0.0)
    }

    /// Km y días restantes hasta la profundidad mínima segura
    pub fn estimate_remaining_life(&self, tyre: &Tyre) -> Option<RemainingLife> {
        let wear_rate = self.wear_rate(tyre).filter(|rate| *rate > 0.0)?;

        let usable_depth = tyre.tread_depth_mm - self.policy.min_safe_tread_mm;
        if usable_depth <= 0.0 {
            return Some(RemainingLife {
                kilometers: 0.0,
                days: 0.0,
            });
        }

        let remaining_km = usable_depth / wear_rate * 1000.0;
        Some(RemainingLife {
            kilometers: remaining_km.round(),
            days: (remaining_km / self.policy.average_daily_km).round(),
        })
    }

    pub fn total_cost_of_ownership(&self, tyre: &Tyre, include_repairs: bool) -> Decimal {
        if include_repairs {
            tyre.purchase_cost + tyre.repair_cost()
        } else {
            tyre.purchase_cost
        }
    }

    /// Coste agregado / distancia agregada de la flota
    pub fn fleet_average_cost_per_km(&self, tyres: &[Tyre]) -> f64 {
        let total_cost: Decimal = tyres.iter().map(|tyre| self.total_cost_of_ownership(tyre, true)).sum();
        let total_distance: f64 = tyres.iter().map(|tyre| tyre.km_run).sum();
        if total_distance > 0.0 {
            decimal_to_f64(total_cost) / total_distance
        } else {
            0.0
        }
    }

    pub fn to_tyre_stats(&self, tyres: &[Tyre]) -> Vec<TyreStat> {
        tyres
            .iter()
            .map(|tyre| TyreStat {
                brand: tyre.brand.clone(),
                model: tyre.model.clone(),
                total_distance: tyre.km_run,
                total_cost: decimal_to_f64(self.total_cost_of_ownership(tyre, true)),
            })
            .collect()
    }

    pub fn performance_analysis(&self, tyres: &[Tyre]) -> PerformanceAnalysis {
        let stats = self.to_tyre_stats(tyres);
        PerformanceAnalysis {
            performance_stats: TyreRankingEngine::tyre_performance_stats(&stats),
            brand_performance: TyreRankingEngine::brand_performance(&stats),
            excellent_performers: TyreRankingEngine::filter_by_tier(&stats, PerformanceTier::Excellent),
            poor_performers: TyreRankingEngine::filter_by_tier(&stats, PerformanceTier::Poor),
        }
    }
}

fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
