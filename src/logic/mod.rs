pub mod auth;
pub mod calculator;
pub mod chat;
pub mod filter;
pub mod monitor;

pub use calculator::ResourceEstimate;
pub use chat::ChatBot;
pub use filter::{filter, FilterCriteria};
pub use monitor::{MonitorService, MonitorUpdate};
