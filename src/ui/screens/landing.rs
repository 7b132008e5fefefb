use crate::app::{LoginField, LoginState};
use crate::ui::components::{centered_rect, InputWidget};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

const FEATURES: &[(&str, &str)] = &[
    ("Real-time Monitoring", "Soil, irrigation and weather at a glance"),
    ("Crop Guide", "Search crops by season, state and local name"),
    ("Farm Assistant", "Quick answers to everyday farming questions"),
    ("Analytics", "Track soil health and water usage over time"),
];

pub struct LandingScreen<'a> {
    pub login: &'a LoginState,
    pub status_message: Option<&'a str>,
}

impl<'a> LandingScreen<'a> {
    pub fn new(login: &'a LoginState) -> Self {
        Self {
            login,
            status_message: None,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for LandingScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Hero
                Constraint::Min(6),    // Features
                Constraint::Length(1), // Status
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let hero = vec![
            Line::from(""),
            Line::from(Span::styled("SmartFarm", Theme::title())),
            Line::from(Span::styled(
                "Smart Farming Solutions for Modern Agriculture",
                Theme::header(),
            )),
        ];
        Paragraph::new(hero)
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        self.render_features(chunks[1], buf);

        if let Some(msg) = self.status_message {
            Paragraph::new(Span::styled(msg, Theme::warning())).render(chunks[2], buf);
        }

        let nav = Line::from(vec![
            Span::styled("[l]", Theme::nav_key()),
            Span::styled("Login ", Theme::nav_label()),
            Span::styled("[s]", Theme::nav_key()),
            Span::styled("Sign Up ", Theme::nav_label()),
            Span::styled("[g]", Theme::nav_key()),
            Span::styled("Google ", Theme::nav_label()),
            Span::styled("[t]", Theme::nav_key()),
            Span::styled("Theme ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);

        if self.login.modal_open {
            self.render_modal(area, buf);
        }
    }
}

impl LandingScreen<'_> {
    fn render_features(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Features", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let lines: Vec<Line> = FEATURES
            .iter()
            .flat_map(|(name, desc)| {
                [
                    Line::from(Span::styled(format!("• {}", name), Theme::highlight())),
                    Line::from(Span::styled(format!("  {}", desc), Theme::dim())),
                ]
            })
            .collect();

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }

    fn render_modal(&self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(50, 16, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(Span::styled(self.login.title(), Theme::title()))
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());
        let inner = block.inner(popup);
        block.render(popup, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Email
                Constraint::Length(3), // Password
                Constraint::Length(3), // Phone
                Constraint::Length(1), // Google
                Constraint::Length(1), // Spacer
                Constraint::Min(1),    // Help
            ])
            .split(inner);

        let field = self.login.field;
        InputWidget::new("Email", &self.login.email)
            .placeholder("you@example.com")
            .focused(field == LoginField::Email)
            .render(rows[0], buf);
        InputWidget::new("Password", &self.login.password)
            .masked(true)
            .focused(field == LoginField::Password)
            .render(rows[1], buf);
        InputWidget::new("Or continue with phone", &self.login.phone)
            .placeholder("Phone number")
            .focused(field == LoginField::Phone)
            .render(rows[2], buf);

        let google_style = if field == LoginField::Google {
            Theme::selected()
        } else {
            Theme::normal()
        };
        Paragraph::new(Span::styled(" G  Continue with Google ", google_style))
            .alignment(Alignment::Center)
            .render(rows[3], buf);

        let help = Line::from(vec![
            Span::styled("[Tab]", Theme::nav_key()),
            Span::styled("Next ", Theme::nav_label()),
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled("Submit ", Theme::nav_label()),
            Span::styled("[Ctrl+T]", Theme::nav_key()),
            Span::styled("Login/Sign Up ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Close", Theme::nav_label()),
        ]);
        Paragraph::new(help)
            .wrap(Wrap { trim: true })
            .render(rows[5], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(buf: &Buffer, text: &str) -> bool {
        let area = buf.area;
        (area.y..area.y + area.height).any(|y| {
            let row: String = (area.x..area.x + area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect();
            row.contains(text)
        })
    }

    #[test]
    fn modal_shows_sign_up_title() {
        let mut login = LoginState::new();
        login.open(true);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        LandingScreen::new(&login).render(area, &mut buf);
        assert!(contains(&buf, "Sign Up to SmartFarm"));
    }

    #[test]
    fn closed_modal_shows_hero_only() {
        let login = LoginState::new();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        LandingScreen::new(&login).render(area, &mut buf);
        assert!(contains(&buf, "Smart Farming Solutions"));
        assert!(!contains(&buf, "Login to SmartFarm"));
    }
}
