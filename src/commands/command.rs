// src/commands/command.rs

use crate::commands::bf_add::BfAdd;
use crate::commands::bf_count::BfCount;
use crate::commands::bf_debug::BfDebug;
use crate::commands::bf_exist::BfExist;
use crate::commands::command_spec::CommandSpec;
use crate::commands::command_trait::{
    CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome, validate_arity,
};
use crate::error::BloomError;
use crate::reply::Reply;
use crate::store::Store;
use bytes::Bytes;

/// Dispatches one of the four top-level `BF*` commands by name.
#[derive(Debug, Clone)]
pub enum BloomCommand {
    Add(BfAdd),
    Exist(BfExist),
    Count(BfCount),
    Debug(BfDebug),
}

impl BloomCommand {
    /// Parses `name` (case-insensitive) and `args` into the matching
    /// command. Returns `UnknownSubcommand` for any other command name.
    ///
    /// Once a command parses successfully, its arity is re-checked against
    /// `args` (plus the command name) as a final contract check before it
    /// can be executed.
    pub fn parse(name: &str, args: &[Bytes]) -> Result<Self, BloomError> {
        let cmd = match name.to_ascii_uppercase().as_str() {
            "BFADD" => Self::Add(BfAdd::parse(args)?),
            "BFEXIST" => Self::Exist(BfExist::parse(args)?),
            "BFCOUNT" => Self::Count(BfCount::parse(args)?),
            "BFDEBUG" => Self::Debug(BfDebug::parse(args)?),
            other => return Err(BloomError::UnknownSubcommand(other.to_string())),
        };
        validate_arity(&cmd, args.len() as i64 + 1)?;
        Ok(cmd)
    }

    pub async fn execute(&self, store: &Store) -> Result<(Reply, WriteOutcome), BloomError> {
        tracing::trace!(name = self.name(), flags = ?self.flags(), "dispatching command");
        match self {
            Self::Add(cmd) => cmd.execute(store).await,
            Self::Exist(cmd) => cmd.execute(store).await,
            Self::Count(cmd) => cmd.execute(store).await,
            Self::Debug(cmd) => cmd.execute(store).await,
        }
    }
}

impl CommandSpec for BloomCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::Add(cmd) => cmd.name(),
            Self::Exist(cmd) => cmd.name(),
            Self::Count(cmd) => cmd.name(),
            Self::Debug(cmd) => cmd.name(),
        }
    }

    fn arity(&self) -> i64 {
        match self {
            Self::Add(cmd) => cmd.arity(),
            Self::Exist(cmd) => cmd.arity(),
            Self::Count(cmd) => cmd.arity(),
            Self::Debug(cmd) => cmd.arity(),
        }
    }

    fn flags(&self) -> CommandFlags {
        match self {
            Self::Add(cmd) => cmd.flags(),
            Self::Exist(cmd) => cmd.flags(),
            Self::Count(cmd) => cmd.flags(),
            Self::Debug(cmd) => cmd.flags(),
        }
    }

    fn first_key(&self) -> i64 {
        match self {
            Self::Add(cmd) => cmd.first_key(),
            Self::Exist(cmd) => cmd.first_key(),
            Self::Count(cmd) => cmd.first_key(),
            Self::Debug(cmd) => cmd.first_key(),
        }
    }

    fn last_key(&self) -> i64 {
        match self {
            Self::Add(cmd) => cmd.last_key(),
            Self::Exist(cmd) => cmd.last_key(),
            Self::Count(cmd) => cmd.last_key(),
            Self::Debug(cmd) => cmd.last_key(),
        }
    }

    fn step(&self) -> i64 {
        match self {
            Self::Add(cmd) => cmd.step(),
            Self::Exist(cmd) => cmd.step(),
            Self::Count(cmd) => cmd.step(),
            Self::Debug(cmd) => cmd.step(),
        }
    }

    fn to_resp_args(&self) -> Vec<Bytes> {
        match self {
            Self::Add(cmd) => cmd.to_resp_args(),
            Self::Exist(cmd) => cmd.to_resp_args(),
            Self::Count(cmd) => cmd.to_resp_args(),
            Self::Debug(cmd) => cmd.to_resp_args(),
        }
    }
}
