//! Application-wide error types

mod app_error;

pub use app_error::{domain_status_code, AppError};
