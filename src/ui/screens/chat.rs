use crate::models::{ChatMessage, Sender};
use crate::ui::components::InputWidget;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct ChatScreen<'a> {
    pub messages: &'a [ChatMessage],
    pub input: &'a str,
    pub typing: bool,
    pub bot_typing: bool,
}

impl<'a> ChatScreen<'a> {
    pub fn new(messages: &'a [ChatMessage], input: &'a str) -> Self {
        Self {
            messages,
            input,
            typing: false,
            bot_typing: false,
        }
    }

    pub fn typing(mut self, user: bool, bot: bool) -> Self {
        self.typing = user;
        self.bot_typing = bot;
        self
    }
}

impl Widget for ChatScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // Messages
                Constraint::Length(3), // Input
                Constraint::Length(1), // Nav
            ])
            .split(area);

        self.render_messages(chunks[0], buf);

        InputWidget::new("Message", self.input)
            .placeholder("Ask about your crops...")
            .focused(self.typing)
            .render(chunks[1], buf);

        let nav = if self.typing {
            Line::from(vec![
                Span::styled("[Enter]", Theme::nav_key()),
                Span::styled("Send ", Theme::nav_label()),
                Span::styled("[Esc]", Theme::nav_key()),
                Span::styled("Stop typing", Theme::nav_label()),
            ])
        } else {
            Line::from(vec![
                Span::styled("[i]", Theme::nav_key()),
                Span::styled("Type a message", Theme::nav_label()),
            ])
        };
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl ChatScreen<'_> {
    fn render_messages(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Farm Assistant", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();
        for msg in self.messages {
            let (who, alignment) = match msg.sender {
                Sender::User => ("You", Alignment::Right),
                Sender::Bot => ("Assistant", Alignment::Left),
            };
            let style = Style::default().fg(msg.sender.color());
            lines.push(
                Line::from(vec![
                    Span::styled(who, style),
                    Span::styled(
                        format!(" {}", msg.sent_at.with_timezone(&chrono::Local).format("%H:%M")),
                        Theme::dim(),
                    ),
                ])
                .alignment(alignment),
            );
            lines.push(Line::from(msg.body.as_str()).alignment(alignment));
            lines.push(Line::from(""));
        }
        if self.bot_typing {
            lines.push(Line::from(Span::styled("Assistant is typing...", Theme::dim())));
        }

        if lines.is_empty() {
            Paragraph::new(Span::styled(
                "Ask the assistant anything about your farm.",
                Theme::dim(),
            ))
            .render(inner, buf);
            return;
        }

        // Keep the newest messages in view
        let overflow = (lines.len() as u16).saturating_sub(inner.height);
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((overflow, 0))
            .render(inner, buf);
    }
}
