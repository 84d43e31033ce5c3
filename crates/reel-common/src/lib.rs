pub mod action;
pub mod error;

pub use action::{Action, ActionKind, RecordedAction};
pub use error::BackendError;
