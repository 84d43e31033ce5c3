//! Turns a recorded action log into runnable test source.
//!
//! Output is chosen by a ([`Framework`], [`Language`]) pair. JavaScript and
//! TypeScript share one template table per framework; Python has its own
//! rendering path in [`python`].

pub mod generator;
pub mod literal;
pub mod python;
pub mod target;
pub mod templates;

pub use generator::{
    ActionOutcome, CodegenError, GenerateOptions, GeneratedCode, Strategy, generate, strategy_for,
};
pub use literal::{DEFAULT_TEST_NAME, Interpolation, sanitize_identifier};
pub use target::{Framework, Language, default_file_name};
