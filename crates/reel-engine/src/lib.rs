pub mod artifact;
pub mod backend;
pub mod cli;
pub mod command;
pub mod config;
pub mod dry_run;
pub mod executor;
pub mod recorder;
pub mod redact;
pub mod session;

pub use reel_codegen as codegen;
pub use reel_common::{Action, ActionKind, BackendError, RecordedAction};
