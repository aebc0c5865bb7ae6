// src/commands/command_trait.rs

//! Defines the core traits every `BF*` command implements.

use crate::error::BloomError;
use crate::reply::Reply;
use crate::store::Store;
use async_trait::async_trait;
use bitflags::bitflags;
use bytes::Bytes;

bitflags! {
    /// Flags describing a command's properties, trimmed to the subset this
    /// crate's four commands actually use.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct CommandFlags: u32 {
        /// The command modifies the dataset.
        const WRITE       = 1 << 0;
        /// The command only reads data.
        const READONLY    = 1 << 1;
        /// The command is denied if the server is out of memory.
        const DENY_OOM    = 1 << 2;
        /// The command's keys can be moved (cluster hashing).
        const MOVABLEKEYS = 1 << 3;
    }
}

/// The outcome of a command's execution, used to decide whether the store's
/// dirty-key counter and keyspace event log should be touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    DidNotWrite,
    Write { keys_modified: u64 },
}

/// Parses a command's arguments (everything after the command/subcommand
/// name) into a typed struct.
pub trait ParseCommand: Sized {
    fn parse(args: &[Bytes]) -> Result<Self, BloomError>;
}

/// Executes a parsed command against the store.
#[async_trait]
pub trait ExecutableCommand {
    async fn execute(&self, store: &Store) -> Result<(Reply, WriteOutcome), BloomError>;
}

/// Metadata about a command: its arity contract, key positions, and how to
/// re-render it as RESP-style arguments.
pub trait CommandSpec {
    fn name(&self) -> &'static str;
    fn arity(&self) -> i64;
    fn flags(&self) -> CommandFlags;
    fn first_key(&self) -> i64;
    fn last_key(&self) -> i64;
    fn step(&self) -> i64;
    fn to_resp_args(&self) -> Vec<Bytes>;

    /// Extracts the command's key arguments by walking `first_key..=last_key`
    /// in steps of `step` over `to_resp_args()`. `first_key() < 1` means the
    /// command touches no keys.
    fn get_keys(&self) -> Vec<Bytes> {
        let args = self.to_resp_args();
        let mut keys = Vec::new();
        let step = self.step().max(1);
        let mut i = self.first_key();
        if i < 1 {
            return keys;
        }
        while i <= self.last_key() {
            if let Some(arg) = args.get((i - 1) as usize) {
                keys.push(arg.clone());
            }
            i += step;
        }
        keys
    }
}

/// Checks `provided` (the number of RESP arguments including the command
/// name) against `spec`'s arity contract: exact when `arity() >= 0`, a
/// minimum when negative, following the same convention as `COMMAND INFO`.
pub fn validate_arity(spec: &dyn CommandSpec, provided: i64) -> Result<(), BloomError> {
    let arity = spec.arity();
    let ok = if arity >= 0 {
        provided == arity
    } else {
        provided >= -arity
    };
    if ok {
        Ok(())
    } else {
        Err(BloomError::WrongArgumentCount(spec.name().to_string()))
    }
}
