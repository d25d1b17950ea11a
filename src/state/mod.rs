//! Application state module

mod app_state;
mod dashboard;
mod records;
pub mod wizard;

pub use app_state::*;
pub use dashboard::*;
pub use records::*;
