//! Shared types for the employee service
//!
//! Wire models, request types and the unified error system used by
//! the server and its tests.

pub mod error;
pub mod models;
pub mod request;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use request::{PageQuery, SortDirection};
