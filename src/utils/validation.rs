//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validar lecturas de odómetro,
//! profundidades de banda y datos de montaje antes de tocar el ledger.

use serde::Serialize;
use validator::ValidationError;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar una lectura de odómetro: finita y no negativa (km)
pub fn validate_odometer(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        let mut error = ValidationError::new("odometer");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    validate_non_negative(value)
}

/// Validar profundidad de banda en mm
pub fn validate_tread_depth(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        let mut error = ValidationError::new("tread_depth");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    validate_non_negative(value)
}

/// Validar formato de matrícula de vehículo
///
/// Las combinaciones tractor/remolque llegan como "ABB1578/ABB1577".
pub fn validate_vehicle_reg(value: &str) -> Result<(), ValidationError> {
    let clean_reg = value.replace([' ', '-', '_'], "");
    let valid = clean_reg
        .split('/')
        .all(|part| (4..=10).contains(&part.len()) && part.chars().all(|c| c.is_ascii_alphanumeric()));
    if !valid {
        let mut error = ValidationError::new("vehicle_reg");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("MAT0171").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_odometer() {
        assert!(validate_odometer(0.0).is_ok());
        assert!(validate_odometer(10_500.0).is_ok());
        assert!(validate_odometer(-0.5).is_err());
        assert!(validate_odometer(f64::NAN).is_err());
        assert!(validate_odometer(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_tread_depth() {
        assert!(validate_tread_depth(12.5).is_ok());
        assert!(validate_tread_depth(-1.0).is_err());
        assert!(validate_tread_depth(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_vehicle_reg() {
        assert!(validate_vehicle_reg("AAX2987").is_ok());
        assert!(validate_vehicle_reg("ABB1578/ABB1577").is_ok());
        assert!(validate_vehicle_reg("AB").is_err());
        assert!(validate_vehicle_reg("ABB1578/").is_err());
        assert!(validate_vehicle_reg("ABCDEFGHIJK").is_err());
    }
}
