// src/commands/bf_exist.rs

use crate::commands::command_spec::CommandSpec;
use crate::commands::command_trait::{CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome};
use crate::error::BloomError;
use crate::reply::Reply;
use crate::store::Store;
use async_trait::async_trait;
use bytes::Bytes;

/// Implements `BFEXIST key elem`. A missing key is treated as an empty
/// filter, so the reply is `0` rather than an error.
#[derive(Debug, Clone)]
pub struct BfExist {
    pub key: Bytes,
    pub element: Bytes,
}

impl ParseCommand for BfExist {
    fn parse(args: &[Bytes]) -> Result<Self, BloomError> {
        if args.len() != 2 {
            return Err(BloomError::WrongArgumentCount("BFEXIST".to_string()));
        }
        Ok(BfExist {
            key: args[0].clone(),
            element: args[1].clone(),
        })
    }
}

#[async_trait]
impl ExecutableCommand for BfExist {
    async fn execute(&self, store: &Store) -> Result<(Reply, WriteOutcome), BloomError> {
        let element = &self.element;
        let present = store
            .with_bloom(&self.key, |bf| bf.contains(element))
            .await?
            .unwrap_or(false);
        Ok((
            Reply::Integer(present as i64),
            WriteOutcome::DidNotWrite,
        ))
    }
}

impl CommandSpec for BfExist {
    fn name(&self) -> &'static str {
        "bfexist"
    }
    fn arity(&self) -> i64 {
        3
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::READONLY | CommandFlags::MOVABLEKEYS
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
        vec![self.key.clone(), self.element.clone()]
    }
}
