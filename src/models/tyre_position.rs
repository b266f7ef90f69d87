//! Modelo de TyrePosition
//!
//! Códigos de posición estandarizados: V1-V10 (vehículo), T1-T16 (remolque /
//! interlink), P1-P6, Q1-Q10 y SP (repuesto).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::errors::LedgerError;

/// Grupo de posiciones dentro de la configuración de ejes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PositionGroup {
    Vehicle,
    Trailer,
    Pony,
    Quad,
    Spare,
}

impl PositionGroup {
    pub fn prefix(&self) -> &'static str {
        match self {
            PositionGroup::Vehicle => "V",
            PositionGroup::Trailer => "T",
            PositionGroup::Pony => "P",
            PositionGroup::Quad => "Q",
            PositionGroup::Spare => "SP",
        }
    }

    /// Número máximo de ranuras del grupo (0 para el repuesto)
    pub fn max_slot(&self) -> u8 {
        match self {
            PositionGroup::Vehicle => 10,
            PositionGroup::Trailer => 16,
            PositionGroup::Pony => 6,
            PositionGroup::Quad => 10,
            PositionGroup::Spare => 0,
        }
    }
}

/// Posición de un neumático montado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TyrePosition {
    group: PositionGroup,
    slot: u8,
}

impl TyrePosition {
    pub const SPARE: TyrePosition = TyrePosition {
        group: PositionGroup::Spare,
        slot: 0,
    };

    pub fn new(group: PositionGroup, slot: u8) -> Result<Self, LedgerError> {
        let valid = match group {
            PositionGroup::Spare => slot == 0,
            _ => (1..=group.max_slot()).contains(&slot),
        };
        if !valid {
            return Err(LedgerError::InvalidPosition(format!(
                "slot {} is out of range for group {}",
                slot,
                group.prefix()
            )));
        }
        Ok(Self { group, slot })
    }

    pub fn group(&self) -> PositionGroup {
        self.group
    }

    pub fn slot(&self) -> u8 {
        self.slot
    }

    pub fn is_spare(&self) -> bool {
        self.group == PositionGroup::Spare
    }

    /// Todas las posiciones válidas de un grupo, en orden
    pub fn all_in(group: PositionGroup) -> Vec<TyrePosition> {
        match group {
            PositionGroup::Spare => vec![Self::SPARE],
            _ => (1..=group.max_slot()).map(|slot| TyrePosition { group, slot }).collect(),
        }
    }
}

impl fmt::Display for TyrePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.group {
            PositionGroup::Spare => f.write_str("SP"),
            group => write!(f, "{}{}", group.prefix(), self.slot),
        }
    }
}

impl FromStr for TyrePosition {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        if code == "SP" {
            return Ok(Self::SPARE);
        }

        let invalid = || LedgerError::InvalidPosition(format!("'{}' is not a tyre position code", s));
        let mut chars = code.chars();
        let group = match chars.next() {
            Some('V') => PositionGroup::Vehicle,
            Some('T') => PositionGroup::Trailer,
            Some('P') => PositionGroup::Pony,
            Some('Q') => PositionGroup::Quad,
            _ => return Err(invalid()),
        };
        let digits = chars.as_str();
        if digits.is_empty() || digits.starts_with('0') || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let slot: u8 = digits.parse().map_err(|_| invalid())?;
        Self::new(group, slot)
    }
}

impl TryFrom<String> for TyrePosition {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TyrePosition> for String {
    fn from(position: TyrePosition) -> Self {
        position.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("V1".parse::<TyrePosition>().unwrap().to_string(), "V1");
        assert_eq!(" t16 ".parse::<TyrePosition>().unwrap().to_string(), "T16");
        assert_eq!("sp".parse::<TyrePosition>().unwrap(), TyrePosition::SPARE);
        assert_eq!("Q10".parse::<TyrePosition>().unwrap().group(), PositionGroup::Quad);
    }

    #[test]
    fn test_reject_out_of_range() {
        assert!("V11".parse::<TyrePosition>().is_err());
        assert!("P7".parse::<TyrePosition>().is_err());
        assert!("T0".parse::<TyrePosition>().is_err());
        assert!("T01".parse::<TyrePosition>().is_err());
        assert!("X1".parse::<TyrePosition>().is_err());
        assert!("V".parse::<TyrePosition>().is_err());
        assert!("".parse::<TyrePosition>().is_err());
        assert!(TyrePosition::new(PositionGroup::Spare, 1).is_err());
    }

    #[test]
    fn test_all_in_group() {
        assert_eq!(TyrePosition::all_in(PositionGroup::Trailer).len(), 16);
        assert_eq!(TyrePosition::all_in(PositionGroup::Pony).last().unwrap().to_string(), "P6");
        assert_eq!(TyrePosition::all_in(PositionGroup::Spare), vec![TyrePosition::SPARE]);
    }

    #[test]
    fn test_serde_as_code() {
        let position: TyrePosition = "V3".parse().unwrap();
        assert_eq!(serde_json::to_string(&position).unwrap(), "\"V3\"");
        let parsed: TyrePosition = serde_json::from_str("\"T12\"").unwrap();
        assert_eq!(parsed.slot(), 12);
        assert!(serde_json::from_str::<TyrePosition>("\"V99\"").is_err());
    }
}
