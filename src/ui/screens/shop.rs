use crate::models::{Cart, PRODUCTS};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

pub struct ShopScreen<'a> {
    pub cart: &'a Cart,
    pub selected_index: usize,
}

impl<'a> ShopScreen<'a> {
    pub fn new(cart: &'a Cart) -> Self {
        Self {
            cart,
            selected_index: 0,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }
}

impl Widget for ShopScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(1)])
            .split(area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[0]);

        self.render_products(cols[0], buf);
        self.render_cart(cols[1], buf);

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Select ", Theme::nav_label()),
            Span::styled("[Enter/a]", Theme::nav_key()),
            Span::styled("Add to Cart ", Theme::nav_label()),
            Span::styled("[x]", Theme::nav_key()),
            Span::styled("Remove one ", Theme::nav_label()),
            Span::styled("[c]", Theme::nav_key()),
            Span::styled("Clear cart", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[1], buf);
    }
}

impl ShopScreen<'_> {
    fn render_products(&self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(vec![
            Cell::from("Product").style(Theme::header()),
            Cell::from("Price").style(Theme::header()),
            Cell::from("In Cart").style(Theme::header()),
        ]);

        let rows: Vec<Row> = PRODUCTS
            .iter()
            .map(|p| {
                let qty = self.cart.quantity_of(p.id);
                Row::new(vec![
                    Cell::from(p.name),
                    Cell::from(format!("${:.2}", p.price)),
                    Cell::from(if qty > 0 {
                        qty.to_string()
                    } else {
                        "-".to_string()
                    }),
                ])
            })
            .collect();

        let widths = [
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(8),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .title(Span::styled("Products", Theme::header()))
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .row_highlight_style(Theme::selected());

        let mut state = TableState::default();
        state.select(Some(self.selected_index));
        StatefulWidget::render(table, area, buf, &mut state);
    }

    fn render_cart(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(
                format!("Cart ({} items)", self.cart.item_count()),
                Theme::header(),
            ))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        if self.cart.is_empty() {
            Paragraph::new(Span::styled("Your cart is empty", Theme::dim()))
                .block(block)
                .render(area, buf);
            return;
        }

        let mut lines: Vec<Line> = self
            .cart
            .lines()
            .iter()
            .filter_map(|line| {
                let product = line.product()?;
                Some(Line::from(vec![
                    Span::styled(format!("{} x{}", product.name, line.quantity), Theme::normal()),
                    Span::styled(format!("  ${:.2}", line.subtotal()), Theme::dim()),
                ]))
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Total: ", Theme::header()),
            Span::styled(format!("${:.2}", self.cart.total()), Theme::success()),
        ]));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
