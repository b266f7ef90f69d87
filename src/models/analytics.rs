//! Modelos de Analytics
//!
//! Este módulo contiene los modelos de rendimiento de neumáticos:
//! observaciones de coste/distancia, ranking por coste por km y agregados por marca.

use serde::{Deserialize, Serialize};

/// Observación de rendimiento de un neumático
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TyreStat {
    pub brand: String,
    pub model: String,
    pub total_distance: f64,
    pub total_cost: f64,
}

impl TyreStat {
    pub fn new(brand: impl Into<String>, model: impl Into<String>, total_distance: f64, total_cost: f64) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            total_distance,
            total_cost,
        }
    }

    /// Coste por km; infinito sin distancia recorrida o con un coste no finito
    pub fn cost_per_km(&self) -> f64 {
        if !self.has_distance() {
            return f64::INFINITY;
        }
        let ratio = self.total_cost / self.total_distance;
        if ratio.is_finite() {
            ratio
        } else {
            f64::INFINITY
        }
    }

    pub fn has_distance(&self) -> bool {
        self.total_distance > 0.0
    }

    /// Entra en estadísticas: distancia > 0 y coste por km finito
    pub fn is_measurable(&self) -> bool {
        self.has_distance() && self.cost_per_km().is_finite()
    }
}

/// Nivel de rendimiento por cuartil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Excellent,
    Good,
    Average,
    Poor,
}

impl PerformanceTier {
    /// Clasificar por percentil `(index + 1) / total`
    pub fn from_percentile(percentile: f64) -> Self {
        if percentile <= 0.25 {
            PerformanceTier::Excellent
        } else if percentile <= 0.5 {
            PerformanceTier::Good
        } else if percentile <= 0.75 {
            PerformanceTier::Average
        } else {
            PerformanceTier::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "excellent",
            PerformanceTier::Good => "good",
            PerformanceTier::Average => "average",
            PerformanceTier::Poor => "poor",
        }
    }
}

/// Neumático clasificado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTyre {
    pub brand: String,
    pub model: String,
    pub total_distance: f64,
    pub total_cost: f64,
    pub cost_per_km: f64,
    pub rank: usize,
    pub performance: PerformanceTier,
}

/// Resumen de rendimiento de la flota
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStats {
    pub average_cost_per_km: f64,
    pub best_performer: Option<RankedTyre>,
    pub worst_performer: Option<RankedTyre>,
    pub total_tyres: usize,
    pub valid_tyres: usize,
    pub ranked_tyres: Vec<RankedTyre>,
}

impl PerformanceStats {
    pub fn empty(total_tyres: usize) -> Self {
        Self {
            average_cost_per_km: 0.0,
            best_performer: None,
            worst_performer: None,
            total_tyres,
            valid_tyres: 0,
            ranked_tyres: Vec::new(),
        }
    }
}

/// Agregado por marca
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandStat {
    pub brand: String,
    pub total_cost: f64,
    pub total_distance: f64,
    pub tyre_count: usize,
    pub average_cost_per_km: f64,
}

/// Análisis completo de rendimiento
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalysis {
    pub performance_stats: PerformanceStats,
    pub brand_performance: Vec<BrandStat>,
    pub excellent_performers: Vec<RankedTyre>,
    pub poor_performers: Vec<RankedTyre>,
}
