// src/commands/mod.rs

//! The `BF*` command surface: thin adapters binding the engine to the store
//! (`crate::store`).

pub mod bf_add;
pub mod bf_count;
pub mod bf_debug;
pub mod bf_exist;
pub mod command;
pub mod command_spec;
pub mod command_trait;
pub mod helpers;

pub use bf_add::BfAdd;
pub use bf_count::BfCount;
pub use bf_debug::BfDebug;
pub use bf_exist::BfExist;
pub use command::BloomCommand;
