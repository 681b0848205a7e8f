pub mod chat;
pub mod diagnostics;
pub mod health_route;
pub mod starters_route;
pub mod ui_route;
