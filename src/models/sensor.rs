use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Headline field readings shown on the dashboard stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub timestamp: DateTime<Utc>,
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub soil_moisture_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilReadings {
    pub moisture_percent: f64,
    pub ph: f64,
    pub temperature_c: f64,
}

impl SoilReadings {
    pub fn ph_label(&self) -> &'static str {
        if self.ph < 5.5 {
            "Acidic"
        } else if self.ph <= 7.5 {
            "Neutral"
        } else {
            "Alkaline"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrigationStatus {
    pub active: bool,
    pub flow_liters_per_hour: f64,
    pub last_active: DateTime<Utc>,
}

impl IrrigationStatus {
    pub fn status_str(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReadings {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub wind_kph: f64,
}

/// Everything on the real-time monitoring panels, captured at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonitoringSnapshot {
    pub timestamp: DateTime<Utc>,
    pub soil: SoilReadings,
    pub irrigation: IrrigationStatus,
    pub weather: WeatherReadings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ph_label_bands() {
        let soil = |ph| SoilReadings {
            moisture_percent: 50.0,
            ph,
            temperature_c: 22.0,
        };
        assert_eq!(soil(5.0).ph_label(), "Acidic");
        assert_eq!(soil(6.5).ph_label(), "Neutral");
        assert_eq!(soil(7.5).ph_label(), "Neutral");
        assert_eq!(soil(8.1).ph_label(), "Alkaline");
    }

    #[test]
    fn irrigation_status_str() {
        let mut status = IrrigationStatus {
            active: true,
            flow_liters_per_hour: 120.0,
            last_active: Utc::now(),
        };
        assert_eq!(status.status_str(), "Active");
        status.active = false;
        assert_eq!(status.status_str(), "Inactive");
    }
}
