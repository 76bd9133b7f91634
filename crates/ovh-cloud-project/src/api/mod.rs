pub mod data_source;
mod error;

pub use error::{ErrorModel, ErrorResponse};
