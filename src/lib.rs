pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

pub use app::{app, AppState};

#[cfg(test)]
pub mod testing;
