// src/commands/command_spec.rs

//! Re-exports `CommandSpec` as its own module, separate from the other
//! command traits it's commonly imported alongside.

pub use super::command_trait::CommandSpec;
