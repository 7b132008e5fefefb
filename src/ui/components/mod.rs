pub mod gauge;
pub mod header;
pub mod input;
pub mod sidebar;

pub use gauge::{humidity_gauge, moisture_gauge, temperature_gauge};
pub use header::HeaderBar;
pub use input::{InputWidget, SelectWidget};
pub use sidebar::Sidebar;

use ratatui::layout::Rect;

/// A rectangle of at most `width` x `height` centred in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
