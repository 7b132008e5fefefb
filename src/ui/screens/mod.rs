pub mod analytics;
pub mod calculator;
pub mod chat;
pub mod crops;
pub mod dashboard;
pub mod landing;
pub mod shop;

pub use analytics::AnalyticsScreen;
pub use calculator::CalculatorScreen;
pub use chat::ChatScreen;
pub use crops::CropsScreen;
pub use dashboard::DashboardScreen;
pub use landing::LandingScreen;
pub use shop::ShopScreen;
