use crate::models::Language;
use crate::ui::{Theme, ThemeMode};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Top bar shown on every logged-in screen.
pub struct HeaderBar<'a> {
    title: &'a str,
    user: &'a str,
    language: Language,
    theme_mode: ThemeMode,
    sidebar_visible: bool,
}

impl<'a> HeaderBar<'a> {
    pub fn new(title: &'a str, user: &'a str) -> Self {
        Self {
            title,
            user,
            language: Language::En,
            theme_mode: ThemeMode::Light,
            sidebar_visible: true,
        }
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn theme_mode(mut self, mode: ThemeMode) -> Self {
        self.theme_mode = mode;
        self
    }

    pub fn sidebar_visible(mut self, visible: bool) -> Self {
        self.sidebar_visible = visible;
        self
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let menu_icon = if self.sidebar_visible { "✕" } else { "☰" };

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let left = Line::from(vec![
            Span::styled(format!("{} ", menu_icon), Theme::nav_key()),
            Span::styled("SmartFarm", Theme::title()),
            Span::styled(format!(" - {}", self.title), Theme::dim()),
        ]);
        Paragraph::new(left).render(inner, buf);

        let right = Line::from(vec![
            Span::styled(self.language.label(), Theme::highlight()),
            Span::raw("  "),
            Span::styled(self.theme_mode.icon(), Theme::warning()),
            Span::raw("  "),
            Span::styled(self.user, Theme::header()),
        ]);
        Paragraph::new(right)
            .alignment(Alignment::Right)
            .render(inner, buf);
    }
}
