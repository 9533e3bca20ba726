pub mod app_logic;
pub mod core;
pub mod gui;
pub mod platform_layer;
