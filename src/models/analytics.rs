use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Line,
    Bar,
}

/// A labelled monthly series for the analytics tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub unit: String,
    pub kind: ChartKind,
    pub points: Vec<(String, f64)>,
}

impl ChartSeries {
    pub fn new(title: impl Into<String>, unit: impl Into<String>, kind: ChartKind) -> Self {
        Self {
            title: title.into(),
            unit: unit.into(),
            kind,
            points: Vec::new(),
        }
    }

    pub fn with_points<'a, I>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        self.points
            .extend(points.into_iter().map(|(l, v)| (l.to_string(), v)));
        self
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|(l, _)| l.as_str()).collect()
    }

    pub fn min(&self) -> Option<f64> {
        self.points.iter().map(|(_, v)| *v).reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.points.iter().map(|(_, v)| *v).reduce(f64::max)
    }

    pub fn average(&self) -> Option<f64> {
        if self.points.is_empty() {
            None
        } else {
            Some(self.points.iter().map(|(_, v)| v).sum::<f64>() / self.points.len() as f64)
        }
    }

    /// Change from the first to the last point.
    pub fn net_change(&self) -> Option<f64> {
        let first = self.points.first()?.1;
        let last = self.points.last()?.1;
        Some(last - first)
    }

    /// Points as (index, value) pairs for plotting.
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, (_, v))| (i as f64, *v))
            .collect()
    }
}

const MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

pub fn soil_health_series() -> ChartSeries {
    ChartSeries::new("Soil Health Index", "", ChartKind::Line)
        .with_points(MONTHS.into_iter().zip([65.0, 70.0, 68.0, 74.0, 72.0, 75.0]))
}

pub fn water_usage_series() -> ChartSeries {
    ChartSeries::new("Water Usage (Liters)", "L", ChartKind::Bar).with_points(
        MONTHS
            .into_iter()
            .zip([1200.0, 1100.0, 1300.0, 1150.0, 1250.0, 1180.0]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soil_health_stats() {
        let series = soil_health_series();
        assert_eq!(series.labels(), MONTHS.to_vec());
        assert_eq!(series.min(), Some(65.0));
        assert_eq!(series.max(), Some(75.0));
        assert_eq!(series.net_change(), Some(10.0));
        assert!((series.average().unwrap() - 70.666_666).abs() < 0.001);
    }

    #[test]
    fn water_usage_stats() {
        let series = water_usage_series();
        assert_eq!(series.kind, ChartKind::Bar);
        assert_eq!(series.max(), Some(1300.0));
        assert_eq!(series.min(), Some(1100.0));
        assert_eq!(series.xy()[2], (2.0, 1300.0));
    }

    #[test]
    fn empty_series_has_no_stats() {
        let series = ChartSeries::new("Empty", "", ChartKind::Line);
        assert_eq!(series.min(), None);
        assert_eq!(series.average(), None);
        assert_eq!(series.net_change(), None);
    }
}
