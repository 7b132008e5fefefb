use crate::app::CropsFocus;
use crate::models::{region_label, CropRecord, Language};
use crate::ui::components::{centered_rect, InputWidget, SelectWidget};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, Paragraph, Row, StatefulWidget, Table, TableState, Widget,
        Wrap,
    },
};

/// Crop guide: filter controls, the matching crops and an optional detail popup.
pub struct CropsScreen<'a> {
    pub crops: &'a [&'a CropRecord],
    pub search: &'a str,
    pub season_label: &'a str,
    pub state_label: &'a str,
    pub focus: CropsFocus,
    pub selected_index: usize,
    pub language: Language,
    pub show_details: bool,
}

impl<'a> CropsScreen<'a> {
    pub fn new(crops: &'a [&'a CropRecord], search: &'a str) -> Self {
        Self {
            crops,
            search,
            season_label: "All Seasons",
            state_label: "All States",
            focus: CropsFocus::List,
            selected_index: 0,
            language: Language::En,
            show_details: false,
        }
    }

    pub fn with_filters(mut self, season_label: &'a str, state_label: &'a str) -> Self {
        self.season_label = season_label;
        self.state_label = state_label;
        self
    }

    pub fn with_focus(mut self, focus: CropsFocus) -> Self {
        self.focus = focus;
        self
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn show_details(mut self, show: bool) -> Self {
        self.show_details = show;
        self
    }
}

impl Widget for CropsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Filters
                Constraint::Min(5),    // Table
                Constraint::Length(1), // Nav
            ])
            .split(area);

        self.render_filters(chunks[0], buf);
        self.render_table(chunks[1], buf);

        let nav = Line::from(vec![
            Span::styled("[Tab]", Theme::nav_key()),
            Span::styled("Focus ", Theme::nav_label()),
            Span::styled("[←→]", Theme::nav_key()),
            Span::styled("Change filter ", Theme::nav_label()),
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Select ", Theme::nav_label()),
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled("Details ", Theme::nav_label()),
            Span::styled("[a]", Theme::nav_key()),
            Span::styled("Add to My Farm ", Theme::nav_label()),
            Span::styled("[l]", Theme::nav_key()),
            Span::styled("Language", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);

        if self.show_details {
            if let Some(crop) = self.crops.get(self.selected_index) {
                self.render_details(crop, area, buf);
            }
        }
    }
}

impl CropsScreen<'_> {
    fn render_filters(&self, area: Rect, buf: &mut Buffer) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(50),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        InputWidget::new("Search", self.search)
            .placeholder("Search crops...")
            .focused(self.focus == CropsFocus::Search)
            .render(cols[0], buf);
        SelectWidget::new("Season", self.season_label)
            .focused(self.focus == CropsFocus::Season)
            .render(cols[1], buf);
        SelectWidget::new("State", self.state_label)
            .focused(self.focus == CropsFocus::State)
            .render(cols[2], buf);
    }

    fn render_table(&self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focus == CropsFocus::List {
            Theme::border_focused()
        } else {
            Theme::border()
        };
        let block = Block::default()
            .title(format!("Crops ({})", self.crops.len()))
            .borders(Borders::ALL)
            .border_style(border_style);

        if self.crops.is_empty() {
            Paragraph::new(Span::styled("No crops match these filters", Theme::dim()))
                .block(block)
                .render(area, buf);
            return;
        }

        let header = Row::new(vec![
            Cell::from("Crop").style(Theme::header()),
            Cell::from("Season").style(Theme::header()),
            Cell::from("Soil").style(Theme::header()),
            Cell::from("Water").style(Theme::header()),
            Cell::from("Growing Period").style(Theme::header()),
        ]);

        let rows: Vec<Row> = self
            .crops
            .iter()
            .map(|crop| {
                Row::new(vec![
                    Cell::from(crop_title(crop, self.language)),
                    Cell::from(crop.season.label())
                        .style(Style::default().fg(Theme::season_color(&crop.season))),
                    Cell::from(crop.soil_requirement.as_str()),
                    Cell::from(crop.water_requirement.as_str()),
                    Cell::from(crop.growing_period.as_str()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Min(18),
            Constraint::Length(20),
            Constraint::Length(20),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Theme::selected());

        let mut state = TableState::default();
        state.select(Some(self.selected_index));
        StatefulWidget::render(table, area, buf, &mut state);
    }

    fn render_details(&self, crop: &CropRecord, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(60, 14, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(Span::styled(crop_title(crop, self.language), Theme::title()))
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());

        let states = if crop.applicable_states.is_empty() {
            "-".to_string()
        } else {
            crop.applicable_states
                .iter()
                .map(|s| region_label(s))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let lines = vec![
            detail_line("Season", crop.season.label()),
            detail_line("Soil Requirements", crop.soil_requirement.clone()),
            detail_line("Water Needs", crop.water_requirement.clone()),
            detail_line("Temperature", crop.temperature_range.clone()),
            detail_line("Growing Period", crop.growing_period.clone()),
            detail_line("States", states),
            Line::from(""),
            Line::from(vec![
                Span::styled("[a]", Theme::nav_key()),
                Span::styled("Add to My Farm ", Theme::nav_label()),
                Span::styled("[Esc]", Theme::nav_key()),
                Span::styled("Close", Theme::nav_label()),
            ]),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(popup, buf);
    }
}

/// `Wheat (गेहूं)` style title; just the name when no distinct local name exists.
fn crop_title(crop: &CropRecord, language: Language) -> String {
    let local = crop.display_name(language);
    if local == crop.name {
        crop.name.clone()
    } else {
        format!("{} ({})", crop.name, local)
    }
}

fn detail_line(label: &str, value: String) -> Line<'_> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Theme::highlight()),
        Span::raw(value),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::Catalog;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.y..area.y + area.height)
            .map(|y| {
                (area.x..area.x + area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn crop_title_uses_local_name() {
        let catalog = Catalog::builtin();
        let wheat = catalog.get(1).unwrap();
        assert_eq!(crop_title(wheat, Language::En), "Wheat");
        assert_eq!(crop_title(wheat, Language::Pa), "Wheat (ਕਣਕ)");
    }

    #[test]
    fn empty_result_shows_message() {
        let area = Rect::new(0, 0, 100, 12);
        let mut buf = Buffer::empty(area);
        CropsScreen::new(&[], "xyz").render(area, &mut buf);
        assert!(text(&buf).contains("No crops match"));
    }

    #[test]
    fn details_popup_lists_states() {
        let catalog = Catalog::builtin();
        let crops: Vec<&CropRecord> = catalog.records().iter().collect();
        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        CropsScreen::new(&crops, "")
            .show_details(true)
            .render(area, &mut buf);
        assert!(text(&buf).contains("Uttar Pradesh"));
    }
}
