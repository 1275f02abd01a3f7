//! HTTP API module for the payroll engine.
//!
//! This module exposes the record views, payroll summary, rate
//! configuration and batch run controls as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ConfigUpdateRequest, RecordQuery, RecordReplaceRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
