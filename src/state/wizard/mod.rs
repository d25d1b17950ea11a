//! Application wizard: draft, per-step rules and the form store

mod academic;
mod draft;
mod payload;
mod rows;
mod schema;
mod step;
mod store;

pub use draft::Field;
pub use payload::SubmissionPayload;
pub use rows::{cycle_choice, rows_for, FormRow, RowKind};
pub use step::WizardStep;
pub use store::{Advance, FormStore, PreferenceOption};
