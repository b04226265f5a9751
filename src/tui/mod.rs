//! Terminal dashboard.
//!
//! - `app`: application state, key handling and the event loop
//! - `ui`: layout and widgets
//! - `views`: tab definitions

pub mod app;
pub mod ui;
pub mod views;

pub use app::{run_dashboard, DashboardApp};
pub use views::Tab;
