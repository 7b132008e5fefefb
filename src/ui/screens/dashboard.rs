use crate::models::{CropRecord, Language, MonitoringSnapshot, SensorReading, WeatherDay};
use crate::ui::components::{humidity_gauge, moisture_gauge, temperature_gauge};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

pub struct DashboardScreen<'a> {
    pub sensors: Option<&'a SensorReading>,
    pub monitoring: Option<&'a MonitoringSnapshot>,
    pub forecast: &'a [WeatherDay],
    pub farm_crops: &'a [&'a CropRecord],
    pub language: Language,
    pub selected_crop: usize,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(
        sensors: Option<&'a SensorReading>,
        monitoring: Option<&'a MonitoringSnapshot>,
        forecast: &'a [WeatherDay],
    ) -> Self {
        Self {
            sensors,
            monitoring,
            forecast,
            farm_crops: &[],
            language: Language::En,
            selected_crop: 0,
        }
    }

    pub fn with_farm(mut self, crops: &'a [&'a CropRecord], selected: usize) -> Self {
        self.farm_crops = crops;
        self.selected_crop = selected;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Stat cards
                Constraint::Length(4), // Weather strip
                Constraint::Length(5), // Monitoring panels
                Constraint::Min(4),    // My Farm
            ])
            .split(area);

        self.render_stats(chunks[0], buf);
        self.render_forecast(chunks[1], buf);
        self.render_monitoring(chunks[2], buf);
        self.render_farm(chunks[3], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_stats(&self, area: Rect, buf: &mut Buffer) {
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        temperature_gauge("Temperature", self.sensors.map(|s| s.temperature_c))
            .render(cards[0], buf);
        humidity_gauge("Humidity", self.sensors.map(|s| s.humidity_percent)).render(cards[1], buf);
        moisture_gauge("Soil Moisture", self.sensors.map(|s| s.soil_moisture_percent))
            .render(cards[2], buf);
    }

    fn render_forecast(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Weather Forecast", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        if self.forecast.is_empty() {
            Paragraph::new(Span::styled("No forecast available", Theme::dim())).render(inner, buf);
            return;
        }

        let constraints: Vec<Constraint> = self
            .forecast
            .iter()
            .map(|_| Constraint::Ratio(1, self.forecast.len() as u32))
            .collect();
        let days = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(inner);

        for (day, slot) in self.forecast.iter().zip(days.iter()) {
            let lines = vec![
                Line::from(Span::styled(day.weekday_name(), Theme::dim())),
                Line::from(vec![
                    Span::styled("☀ ", Theme::warning()),
                    Span::styled(
                        format!("{:.0}°C", day.temperature_c),
                        Style::default().fg(Theme::temp_color(day.temperature_c)),
                    ),
                ]),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(*slot, buf);
        }
    }

    fn render_monitoring(&self, area: Rect, buf: &mut Buffer) {
        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        let Some(m) = self.monitoring else {
            for (title, panel) in ["Soil Sensors", "Irrigation", "Weather Station"]
                .iter()
                .zip(panels.iter())
            {
                Paragraph::new(Span::styled("Waiting for readings...", Theme::dim()))
                    .block(panel_block(title))
                    .render(*panel, buf);
            }
            return;
        };

        let soil = vec![
            reading_line(
                "Moisture",
                format!("{:.0}%", m.soil.moisture_percent),
                Style::default().fg(Theme::moisture_color(m.soil.moisture_percent)),
            ),
            reading_line(
                "pH",
                format!("{:.1} ({})", m.soil.ph, m.soil.ph_label()),
                Theme::normal(),
            ),
            reading_line(
                "Temperature",
                format!("{:.0}°C", m.soil.temperature_c),
                Style::default().fg(Theme::temp_color(m.soil.temperature_c)),
            ),
        ];
        Paragraph::new(soil)
            .block(panel_block("Soil Sensors"))
            .render(panels[0], buf);

        let status_style = if m.irrigation.active {
            Theme::success()
        } else {
            Theme::dim()
        };
        let irrigation = vec![
            reading_line("Status", m.irrigation.status_str().to_string(), status_style),
            reading_line(
                "Water Flow",
                format!("{:.0} L/hr", m.irrigation.flow_liters_per_hour),
                Theme::normal(),
            ),
            reading_line(
                "Last Active",
                m.irrigation
                    .last_active
                    .with_timezone(&chrono::Local)
                    .format("%H:%M:%S")
                    .to_string(),
                Theme::dim(),
            ),
        ];
        Paragraph::new(irrigation)
            .block(panel_block("Irrigation"))
            .render(panels[1], buf);

        let weather = vec![
            reading_line(
                "Temperature",
                format!("{:.0}°C", m.weather.temperature_c),
                Style::default().fg(Theme::temp_color(m.weather.temperature_c)),
            ),
            reading_line(
                "Humidity",
                format!("{:.0}%", m.weather.humidity_percent),
                Theme::normal(),
            ),
            reading_line(
                "Wind Speed",
                format!("{:.0} km/h", m.weather.wind_kph),
                Theme::normal(),
            ),
        ];
        Paragraph::new(weather)
            .block(panel_block("Weather Station"))
            .render(panels[2], buf);
    }

    fn render_farm(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("My Farm", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        if self.farm_crops.is_empty() {
            Paragraph::new(Span::styled(
                "No crops yet. Add some from the Crops tab [2].",
                Theme::dim(),
            ))
            .block(block)
            .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .farm_crops
            .iter()
            .map(|crop| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<8}", crop.season.label()),
                        Style::default().fg(Theme::season_color(&crop.season)),
                    ),
                    Span::styled(crop.display_name(self.language), Theme::normal()),
                    Span::styled(format!("  {}", crop.growing_period), Theme::dim()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Theme::selected());
        let mut state = ListState::default();
        state.select(Some(self.selected_crop));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(title, Theme::header()))
        .borders(Borders::ALL)
        .border_style(Theme::border())
}

fn reading_line(label: &str, value: String, style: Style) -> Line<'_> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Theme::dim()),
        Span::styled(value, style),
    ])
}
