use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One day of the dashboard weather strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDay {
    pub date: NaiveDate,
    pub temperature_c: f64,
}

impl WeatherDay {
    pub fn new(date: NaiveDate, temperature_c: f64) -> Self {
        Self {
            date,
            temperature_c,
        }
    }

    pub fn weekday_name(&self) -> &'static str {
        use chrono::Weekday;
        match self.date.weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}

/// Highest forecast temperature, if any days are present.
pub fn max_temperature(days: &[WeatherDay]) -> Option<f64> {
    days.iter()
        .map(|d| d.temperature_c)
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_name_from_date() {
        // 2024-04-15 was a Monday
        let day = WeatherDay::new(NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(), 24.0);
        assert_eq!(day.weekday_name(), "Monday");
        let day = WeatherDay::new(NaiveDate::from_ymd_opt(2024, 4, 21).unwrap(), 24.0);
        assert_eq!(day.weekday_name(), "Sunday");
    }

    #[test]
    fn max_temperature_picks_highest() {
        let start = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let days: Vec<WeatherDay> = [21.0, 27.0, 23.0]
            .iter()
            .enumerate()
            .map(|(i, t)| WeatherDay::new(start + chrono::Duration::days(i as i64), *t))
            .collect();
        assert_eq!(max_temperature(&days), Some(27.0));
        assert_eq!(max_temperature(&[]), None);
    }
}
