//! Admissions backend access over HTTP/JSON

mod client;
mod error;
mod traits;

pub use client::AdmissionsClient;
pub use error::ApiError;
pub use traits::{AdmissionsApi, ApiResult};

#[cfg(test)]
pub use traits::MockAdmissionsApi;
