use crate::models::ChartSeries;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
        Widget,
    },
};

pub struct AnalyticsScreen<'a> {
    pub soil_health: &'a ChartSeries,
    pub water_usage: &'a ChartSeries,
}

impl<'a> AnalyticsScreen<'a> {
    pub fn new(soil_health: &'a ChartSeries, water_usage: &'a ChartSeries) -> Self {
        Self {
            soil_health,
            water_usage,
        }
    }
}

impl Widget for AnalyticsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(50),
                Constraint::Percentage(50),
            ])
            .split(area);

        self.render_line(self.soil_health, chunks[0], buf);
        self.render_bars(self.water_usage, chunks[1], buf);
    }
}

impl AnalyticsScreen<'_> {
    fn render_line(&self, series: &ChartSeries, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(1)])
            .split(area);

        let points = series.xy();
        let (lo, hi) = padded_bounds(series);

        let dataset = Dataset::default()
            .name(series.title.as_str())
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Theme::ACCENT))
            .data(&points);

        let x_labels: Vec<Span> = series
            .labels()
            .into_iter()
            .map(|l| Span::styled(l, Theme::dim()))
            .collect();
        let y_labels = vec![
            Span::styled(format!("{:.0}", lo), Theme::dim()),
            Span::styled(format!("{:.0}", hi), Theme::dim()),
        ];

        let chart = Chart::new(vec![dataset])
            .block(chart_block(series))
            .x_axis(
                Axis::default()
                    .bounds([0.0, points.len().saturating_sub(1) as f64])
                    .labels(x_labels),
            )
            .y_axis(Axis::default().bounds([lo, hi]).labels(y_labels));
        chart.render(rows[0], buf);

        summary(series).render(rows[1], buf);
    }

    fn render_bars(&self, series: &ChartSeries, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(1)])
            .split(area);

        let bars: Vec<Bar> = series
            .points
            .iter()
            .map(|(label, value)| {
                Bar::default()
                    .value(value.round() as u64)
                    .label(Line::from(label.as_str()))
                    .style(Style::default().fg(Theme::HIGHLIGHT))
            })
            .collect();

        BarChart::default()
            .block(chart_block(series))
            .data(BarGroup::default().bars(&bars))
            .bar_width(6)
            .bar_gap(2)
            .render(rows[0], buf);

        summary(series).render(rows[1], buf);
    }
}

fn chart_block(series: &ChartSeries) -> Block<'_> {
    Block::default()
        .title(Span::styled(series.title.as_str(), Theme::header()))
        .borders(Borders::ALL)
        .border_style(Theme::border())
}

/// Y-axis bounds with a little headroom above and below the data.
fn padded_bounds(series: &ChartSeries) -> (f64, f64) {
    match (series.min(), series.max()) {
        (Some(min), Some(max)) => {
            let pad = ((max - min) * 0.1).max(1.0);
            ((min - pad).floor(), (max + pad).ceil())
        }
        _ => (0.0, 1.0),
    }
}

fn summary(series: &ChartSeries) -> Paragraph<'_> {
    let fmt = |v: Option<f64>| v.map(|v| format!("{:.0}{}", v, series.unit)).unwrap_or_default();
    let change = series
        .net_change()
        .map(|c| format!("{:+.0}{}", c, series.unit))
        .unwrap_or_default();

    Paragraph::new(Line::from(vec![
        Span::styled("min ", Theme::dim()),
        Span::raw(fmt(series.min())),
        Span::styled("  max ", Theme::dim()),
        Span::raw(fmt(series.max())),
        Span::styled("  avg ", Theme::dim()),
        Span::raw(fmt(series.average())),
        Span::styled("  change ", Theme::dim()),
        Span::raw(change),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analytics::{soil_health_series, water_usage_series};

    #[test]
    fn bounds_pad_the_data_range() {
        let (lo, hi) = padded_bounds(&soil_health_series());
        assert!(lo < 65.0);
        assert!(hi > 75.0);
    }

    #[test]
    fn summary_line_reports_average() {
        let soil = soil_health_series();
        let water = water_usage_series();
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        AnalyticsScreen::new(&soil, &water).render(area, &mut buf);

        let out: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        // (65 + 70 + 68 + 74 + 72 + 75) / 6 = 70.67
        assert!(out.contains("avg 71"));
        assert!(out.contains("change +10"));
        assert!(out.contains("change -20L"));
    }
}
