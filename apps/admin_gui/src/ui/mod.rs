//! UI layer for the admin dashboard: app shell, screens, widgets and theme.

pub mod app;
pub mod pages;
pub mod theme;
pub mod widgets;

pub use app::AdminApp;
