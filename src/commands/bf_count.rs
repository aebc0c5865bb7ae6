// src/commands/bf_count.rs

use crate::commands::command_spec::CommandSpec;
use crate::commands::command_trait::{CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome};
use crate::error::BloomError;
use crate::reply::Reply;
use crate::store::Store;
use async_trait::async_trait;
use bytes::Bytes;

/// Implements `BFCOUNT key`: the Swamidass-Baldi cardinality estimate, or
/// `0` if the key does not exist.
#[derive(Debug, Clone)]
pub struct BfCount {
    pub key: Bytes,
}

impl ParseCommand for BfCount {
    fn parse(args: &[Bytes]) -> Result<Self, BloomError> {
        if args.len() != 1 {
            return Err(BloomError::WrongArgumentCount("BFCOUNT".to_string()));
        }
        Ok(BfCount {
            key: args[0].clone(),
        })
    }
}

#[async_trait]
impl ExecutableCommand for BfCount {
    async fn execute(&self, store: &Store) -> Result<(Reply, WriteOutcome), BloomError> {
        let estimate = store
            .with_bloom(&self.key, |bf| bf.cardinality())
            .await?
            .unwrap_or(0);
        Ok((Reply::Integer(estimate as i64), WriteOutcome::DidNotWrite))
    }
}

impl CommandSpec for BfCount {
    fn name(&self) -> &'static str {
        "bfcount"
    }
    fn arity(&self) -> i64 {
        2
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::READONLY
    }
    fn first_key(&self) -> i64 {
        1
    }
    fn last_key(&self) -> i64 {
        1
    }
    fn step(&self) -> i64 {
        1
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        vec![self.key.clone()]
    }
}
