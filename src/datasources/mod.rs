pub mod catalog;
pub mod simulated;

pub use catalog::Catalog;
pub use simulated::SimulatedSource;

use crate::models::{MonitoringSnapshot, SensorReading, WeatherDay};

/// Where field readings come from. The dashboard only sees this trait, so a
/// real sensor backend can replace the simulated one without touching the UI.
pub trait SensorSource: Send {
    /// Human-readable source name shown in the status bar
    fn name(&self) -> &'static str;

    /// Temperature, humidity and soil moisture for the stat cards
    fn sensor_reading(&mut self) -> SensorReading;

    /// Soil, irrigation and weather panels
    fn monitoring_snapshot(&mut self) -> MonitoringSnapshot;

    /// One entry per day starting today
    fn forecast(&mut self, days: usize) -> Vec<WeatherDay>;
}
