//! Interactive terminal viewer
pub mod popup;
pub mod state;
pub mod ui;
