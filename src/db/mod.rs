mod connection;
pub(crate) mod migrations;
mod queries;

pub use connection::Database;
pub use queries::{SETTING_LANGUAGE, SETTING_THEME};
