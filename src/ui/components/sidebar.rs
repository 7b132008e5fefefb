use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

pub struct Sidebar<'a> {
    items: &'a [(char, &'a str)],
    active: Option<usize>,
}

impl<'a> Sidebar<'a> {
    pub fn new(items: &'a [(char, &'a str)]) -> Self {
        Self {
            items,
            active: None,
        }
    }

    pub fn active(mut self, index: Option<usize>) -> Self {
        self.active = index;
        self
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, (key, label))| {
                let label_style = if Some(i) == self.active {
                    Theme::selected()
                } else {
                    Theme::normal()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("[{}] ", key), Theme::nav_key()),
                    Span::styled(*label, label_style),
                ]))
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_keys_and_labels() {
        let items = [('1', "Dashboard"), ('2', "Crops")];
        let area = Rect::new(0, 0, 16, 3);
        let mut buf = Buffer::empty(area);
        Sidebar::new(&items).active(Some(1)).render(area, &mut buf);

        let row: String = (0..15).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.starts_with("[2] Crops"), "{:?}", row);
        assert_eq!(buf[(4, 1)].style().bg, Theme::selected().bg);
    }
}
