//! Modelo de TyreSize
//!
//! Medida de neumático en notación "ancho/perfil R llanta", p. ej. `315/80R22.5`.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::errors::LedgerError;

lazy_static! {
    static ref TYRE_SIZE_REGEX: Regex =
        Regex::new(r"^(\d+)/(\d+)R(\d+\.?\d*)$").expect("tyre size regex is valid");
}

/// Medida de neumático
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TyreSize {
    pub width: u32,
    pub aspect_ratio: u32,
    pub rim_diameter: f64,
}

impl fmt::Display for TyreSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}R{}", self.width, self.aspect_ratio, self.rim_diameter)
    }
}

impl FromStr for TyreSize {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(' ', "");
        let invalid = || LedgerError::InvalidTyreSize(format!("'{}' does not match WIDTH/ASPECTRrim", s));

        let caps = TYRE_SIZE_REGEX.captures(&normalized).ok_or_else(invalid)?;
        let width = caps[1].parse().map_err(|_| invalid())?;
        let aspect_ratio = caps[2].parse().map_err(|_| invalid())?;
        let rim_diameter = caps[3].parse().map_err(|_| invalid())?;

        Ok(Self {
            width,
            aspect_ratio,
            rim_diameter,
        })
    }
}

impl TryFrom<String> for TyreSize {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TyreSize> for String {
    fn from(size: TyreSize) -> Self {
        size.to_string()
    }
}
