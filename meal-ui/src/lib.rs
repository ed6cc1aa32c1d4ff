pub mod app;
pub mod commands;
pub mod config;
pub mod logging;
pub mod models;
pub mod render;
pub mod session;
pub mod utils;

pub use session::{Flow, Session};
