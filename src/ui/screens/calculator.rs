use crate::logic::ResourceEstimate;
use crate::ui::components::{InputWidget, SelectWidget};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct CalculatorScreen<'a> {
    pub area_input: &'a str,
    pub crop_label: &'a str,
    pub typing: bool,
    pub result: Option<&'a ResourceEstimate>,
}

impl<'a> CalculatorScreen<'a> {
    pub fn new(area_input: &'a str, crop_label: &'a str) -> Self {
        Self {
            area_input,
            crop_label,
            typing: false,
            result: None,
        }
    }

    pub fn typing(mut self, typing: bool) -> Self {
        self.typing = typing;
        self
    }

    pub fn with_result(mut self, result: Option<&'a ResourceEstimate>) -> Self {
        self.result = result;
        self
    }
}

impl Widget for CalculatorScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Inputs
                Constraint::Min(5),    // Results
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let inputs = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);

        InputWidget::new("Field Area (acres)", self.area_input)
            .placeholder("e.g. 2.5")
            .focused(self.typing)
            .render(inputs[0], buf);
        SelectWidget::new("Crop", self.crop_label)
            .focused(!self.typing)
            .render(inputs[1], buf);

        let block = Block::default()
            .title(Span::styled("Recommended Resources", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let body = match self.result {
            Some(est) => vec![
                Line::from(vec![
                    Span::styled("Water Needed: ", Theme::dim()),
                    Span::styled(format!("{} liters", trim_float(est.water_liters)), Theme::highlight()),
                ]),
                Line::from(vec![
                    Span::styled("Fertilizer Needed: ", Theme::dim()),
                    Span::styled(format!("{} kg", trim_float(est.fertilizer_kg)), Theme::success()),
                ]),
            ],
            None => vec![Line::from(Span::styled(
                "Enter a field area and press Enter to calculate",
                Theme::dim(),
            ))],
        };
        Paragraph::new(body).block(block).render(chunks[1], buf);

        let nav = if self.typing {
            Line::from(vec![
                Span::styled("[Enter]", Theme::nav_key()),
                Span::styled("Calculate ", Theme::nav_label()),
                Span::styled("[Esc]", Theme::nav_key()),
                Span::styled("Stop typing", Theme::nav_label()),
            ])
        } else {
            Line::from(vec![
                Span::styled("[i]", Theme::nav_key()),
                Span::styled("Edit area ", Theme::nav_label()),
                Span::styled("[←→]", Theme::nav_key()),
                Span::styled("Crop ", Theme::nav_label()),
                Span::styled("[Enter]", Theme::nav_key()),
                Span::styled("Calculate", Theme::nav_label()),
            ])
        };
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

/// `2500` rather than `2500.0`, but keeps real fractions.
fn trim_float(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_float_drops_zero_fraction() {
        assert_eq!(trim_float(2500.0), "2500");
        assert_eq!(trim_float(62.5), "62.50");
    }

    #[test]
    fn renders_estimate() {
        let est = ResourceEstimate::for_area(2.0).unwrap();
        let area = Rect::new(0, 0, 70, 10);
        let mut buf = Buffer::empty(area);
        CalculatorScreen::new("2", "Wheat")
            .with_result(Some(&est))
            .render(area, &mut buf);

        let out: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(out.contains("Water Needed: 2000 liters"));
        assert!(out.contains("Fertilizer Needed: 100 kg"));
    }
}
