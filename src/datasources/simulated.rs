use super::SensorSource;
use crate::models::{
    IrrigationStatus, MonitoringSnapshot, SensorReading, SoilReadings, WeatherDay,
    WeatherReadings,
};
use chrono::{Duration, Local, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Stand-in for field instrumentation: every call returns fresh random
/// values in plausible ranges.
pub struct SimulatedSource {
    rng: StdRng,
}

impl SimulatedSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Whole number in `[low, high)`.
    fn whole(&mut self, low: u32, high: u32) -> f64 {
        f64::from(self.rng.random_range(low..high))
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSource for SimulatedSource {
    fn name(&self) -> &'static str {
        "Simulated"
    }

    fn sensor_reading(&mut self) -> SensorReading {
        SensorReading {
            timestamp: Utc::now(),
            temperature_c: self.whole(20, 30),
            humidity_percent: self.whole(60, 80),
            soil_moisture_percent: self.whole(40, 60),
        }
    }

    fn monitoring_snapshot(&mut self) -> MonitoringSnapshot {
        let now = Utc::now();
        let ph_tenths = self.rng.random_range(50..=70);
        let active = self.rng.random_bool(0.5);

        MonitoringSnapshot {
            timestamp: now,
            soil: SoilReadings {
                moisture_percent: self.whole(40, 70),
                ph: f64::from(ph_tenths) / 10.0,
                temperature_c: self.whole(20, 30),
            },
            irrigation: IrrigationStatus {
                active,
                flow_liters_per_hour: self.whole(100, 150),
                last_active: now,
            },
            weather: WeatherReadings {
                temperature_c: self.whole(20, 30),
                humidity_percent: self.whole(40, 70),
                wind_kph: self.whole(5, 25),
            },
        }
    }

    fn forecast(&mut self, days: usize) -> Vec<WeatherDay> {
        let today = Local::now().date_naive();
        (0..days)
            .map(|i| {
                let date = today + Duration::days(i as i64);
                WeatherDay::new(date, self.whole(20, 30))
            })
            .collect()
    }
}
