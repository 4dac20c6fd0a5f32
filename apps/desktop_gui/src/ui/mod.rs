//! UI layer for desktop GUI: app shell, pages and theme.

pub mod add_model_page;
pub mod app;
pub mod list_page;
pub mod theme;

pub use app::ModelsBaseApp;
