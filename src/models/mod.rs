pub mod analytics;
pub mod chat;
pub mod crop;
pub mod forecast;
pub mod language;
pub mod product;
pub mod sensor;
pub mod session;

pub use analytics::*;
pub use chat::*;
pub use crop::*;
pub use forecast::*;
pub use language::*;
pub use product::*;
pub use sensor::*;
pub use session::*;
