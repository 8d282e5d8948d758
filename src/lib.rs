pub mod api;
pub mod config;
pub mod handlers;
pub mod models;
pub mod render;
pub mod sync;
pub mod tasks;
pub mod terminal;
