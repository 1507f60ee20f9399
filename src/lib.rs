pub mod browse;
pub mod catalog;
pub mod config;
pub mod links;
pub mod logging;
pub mod shutdown;
pub mod ui;
