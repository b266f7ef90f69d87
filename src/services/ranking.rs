//! Motor de ranking de neumáticos
//!
//! Clasifica neumáticos por coste por km y los agrupa en cuartiles de rendimiento.
//! Los neumáticos sin distancia cuestan infinito por km y quedan al final.

use std::collections::HashMap;

use crate::models::analytics::{BrandStat, PerformanceStats, PerformanceTier, RankedTyre, TyreStat};

/// Motor de ranking (sin estado)
pub struct TyreRankingEngine;

impl TyreRankingEngine {
    /// Ordenar por coste por km ascendente y asignar rango y cuartil
    pub fn rank_tyres(stats: &[TyreStat]) -> Vec<RankedTyre> {
        let mut scored: Vec<(&TyreStat, f64)> = stats.iter().map(|stat| (stat, stat.cost_per_km())).collect();
        // Sin distancia siempre al final; sort_by es estable y los empates conservan el orden de entrada
        scored.sort_by(|a, b| {
            (!a.0.has_distance())
                .cmp(&!b.0.has_distance())
                .then(a.1.total_cmp(&b.1))
        });

        let total = scored.len();
        scored
            .into_iter()
            .enumerate()
            .map(|(index, (stat, cost_per_km))| {
                let percentile = (index + 1) as f64 / total as f64;
                RankedTyre {
                    brand: stat.brand.clone(),
                    model: stat.model.clone(),
                    total_distance: stat.total_distance,
                    total_cost: stat.total_cost,
                    cost_per_km,
                    rank: index + 1,
                    performance: PerformanceTier::from_percentile(percentile),
                }
            })
            .collect()
    }

    /// Estadísticas de rendimiento sobre los neumáticos medibles
    pub fn tyre_performance_stats(stats: &[TyreStat]) -> PerformanceStats {
        let valid: Vec<TyreStat> = stats.iter().filter(|stat| stat.is_measurable()).cloned().collect();
        if valid.is_empty() {
            return PerformanceStats::empty(stats.len());
        }

        let ranked = Self::rank_tyres(&valid);
        // Media de los ratios individuales, no coste agregado / distancia agregada
        let average_cost_per_km = ranked.iter().map(|tyre| tyre.cost_per_km).sum::<f64>() / ranked.len() as f64;

        PerformanceStats {
            average_cost_per_km,
            best_performer: ranked.first().cloned(),
            worst_performer: ranked.last().cloned(),
            total_tyres: stats.len(),
            valid_tyres: valid.len(),
            ranked_tyres: ranked,
        }
    }

    /// Agregado por marca: coste total / distancia total, ordenado ascendente
    pub fn brand_performance(stats: &[TyreStat]) -> Vec<BrandStat> {
        let mut index_by_brand: HashMap<&str, usize> = HashMap::new();
        let mut brands: Vec<BrandStat> = Vec::new();

        for stat in stats.iter().filter(|stat| stat.is_measurable()) {
            let index = *index_by_brand.entry(stat.brand.as_str()).or_insert_with(|| {
                brands.push(BrandStat {
                    brand: stat.brand.clone(),
                    total_cost: 0.0,
                    total_distance: 0.0,
                    tyre_count: 0,
                    average_cost_per_km: 0.0,
                });
                brands.len() - 1
            });
            let brand = &mut brands[index];
            brand.total_cost += stat.total_cost;
            brand.total_distance += stat.total_distance;
            brand.tyre_count += 1;
        }

        for brand in &mut brands {
            brand.average_cost_per_km = brand.total_cost / brand.total_distance;
        }
        brands.sort_by(|a, b| a.average_cost_per_km.total_cmp(&b.average_cost_per_km));
        brands
    }

    /// Los `limit` mejores neumáticos con distancia recorrida
    pub fn best_tyres(stats: &[TyreStat], limit: usize) -> Vec<RankedTyre> {
        let mut ranked = Self::tyre_performance_stats(stats).ranked_tyres;
        ranked.truncate(limit);
        ranked
    }

    /// Neumáticos clasificados en un cuartil concreto
    pub fn filter_by_tier(stats: &[TyreStat], tier: PerformanceTier) -> Vec<RankedTyre> {
        Self::rank_tyres(stats)
            .into_iter()
            .filter(|tyre| tyre.performance == tier)
            .collect()
    }
}
