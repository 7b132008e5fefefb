use crate::error::{Result, SmartFarmError};

const WATER_LITERS_PER_ACRE: f64 = 1000.0;
const FERTILIZER_KG_PER_ACRE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceEstimate {
    pub area_acres: f64,
    pub water_liters: f64,
    pub fertilizer_kg: f64,
}

impl ResourceEstimate {
    pub fn for_area(area_acres: f64) -> Result<Self> {
        if !area_acres.is_finite() || area_acres < 0.0 {
            return Err(SmartFarmError::InvalidData(format!(
                "field area must be a non-negative number, got {}",
                area_acres
            )));
        }

        Ok(Self {
            area_acres,
            water_liters: area_acres * WATER_LITERS_PER_ACRE,
            fertilizer_kg: area_acres * FERTILIZER_KG_PER_ACRE,
        })
    }

    /// Parses the area typed into the calculator form.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SmartFarmError::InvalidData("enter a field area".into()));
        }
        let area: f64 = trimmed.parse().map_err(|_| {
            SmartFarmError::InvalidData(format!("'{}' is not a number", trimmed))
        })?;
        Self::for_area(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_scales_with_area() {
        let est = ResourceEstimate::for_area(2.5).unwrap();
        assert!((est.water_liters - 2500.0).abs() < 1e-9);
        assert!((est.fertilizer_kg - 125.0).abs() < 1e-9);
    }

    #[test]
    fn zero_area_is_allowed() {
        let est = ResourceEstimate::for_area(0.0).unwrap();
        assert_eq!(est.water_liters, 0.0);
        assert_eq!(est.fertilizer_kg, 0.0);
    }

    #[test]
    fn invalid_areas_rejected() {
        assert!(ResourceEstimate::for_area(-1.0).is_err());
        assert!(ResourceEstimate::for_area(f64::NAN).is_err());
        assert!(ResourceEstimate::for_area(f64::INFINITY).is_err());
    }

    #[test]
    fn parse_input() {
        assert_eq!(ResourceEstimate::parse(" 4 ").unwrap().water_liters, 4000.0);
        assert!(ResourceEstimate::parse("").is_err());
        assert!(ResourceEstimate::parse("four").is_err());
        assert!(ResourceEstimate::parse("-3").is_err());
    }
}
