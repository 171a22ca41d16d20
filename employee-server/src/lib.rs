//! employee-server: employee records over HTTP
//!
//! CRUD, paged listing and substring search over a SQLite-backed
//! `employees` table, served with axum.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
pub mod utils;

pub use config::Config;
pub use state::AppState;
