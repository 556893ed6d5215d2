pub mod app;
pub mod bridge;
pub mod player;
pub mod ui;
