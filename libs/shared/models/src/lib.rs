pub mod error;

pub use error::{AppError, ErrorCode, FieldError};
