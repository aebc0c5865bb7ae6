// src/commands/bf_debug.rs

use crate::commands::command_spec::CommandSpec;
use crate::commands::command_trait::{CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome};
use crate::commands::helpers::{extract_string, parse_index};
use crate::error::BloomError;
use crate::reply::Reply;
use crate::store::Store;
use async_trait::async_trait;
use bytes::Bytes;

/// The two `BFDEBUG` subcommands. Unlike `BFEXIST`/`BFCOUNT`, a missing key
/// is an error here -- an intentional, documented asymmetry.
#[derive(Debug, Clone)]
pub enum BfDebug {
    Status { key: Bytes },
    Filter { key: Bytes, idx: usize },
}

impl ParseCommand for BfDebug {
    fn parse(args: &[Bytes]) -> Result<Self, BloomError> {
        if args.is_empty() {
            return Err(BloomError::WrongArgumentCount("BFDEBUG".to_string()));
        }
        let sub = extract_string(&args[0])?.to_ascii_uppercase();
        match sub.as_str() {
            "STATUS" => {
                if args.len() != 2 {
                    return Err(BloomError::WrongArgumentCount("STATUS".to_string()));
                }
                Ok(BfDebug::Status {
                    key: args[1].clone(),
                })
            }
            "FILTER" => {
                if args.len() != 3 {
                    return Err(BloomError::WrongArgumentCount("FILTER".to_string()));
                }
                let idx = parse_index(&args[2])?;
                Ok(BfDebug::Filter {
                    key: args[1].clone(),
                    idx,
                })
            }
            other => Err(BloomError::UnknownSubcommand(other.to_string())),
        }
    }
}

#[async_trait]
impl ExecutableCommand for BfDebug {
    async fn execute(&self, store: &Store) -> Result<(Reply, WriteOutcome), BloomError> {
        match self {
            BfDebug::Status { key } => {
                let status = store
                    .with_bloom(key, |bf| (bf.num_filters(), bf.error_rate()))
                    .await?;
                match status {
                    Some((n, e)) => Ok((
                        Reply::bulk_string(format!("n:{n} e:{e}")),
                        WriteOutcome::DidNotWrite,
                    )),
                    None => Err(BloomError::KeyNotFound),
                }
            }
            BfDebug::Filter { key, idx } => {
                let idx = *idx;
                let generation = store
                    .with_bloom(key, |bf| bf.generation(idx).map(|g| (g.k(), g.s(), g.b())))
                    .await?;
                match generation {
                    Some(Some((k, s, b))) => Ok((
                        Reply::bulk_string(format!("k:{k} s:{s} b:{b}")),
                        WriteOutcome::DidNotWrite,
                    )),
                    Some(None) => Err(BloomError::IndexOutOfRange),
                    None => Err(BloomError::KeyNotFound),
                }
            }
        }
    }
}

impl CommandSpec for BfDebug {
    fn name(&self) -> &'static str {
        "bfdebug"
    }
    fn arity(&self) -> i64 {
        -3
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::READONLY
    }
    fn first_key(&self) -> i64 {
        2
    }
    fn last_key(&self) -> i64 {
        2
    }
    fn step(&self) -> i64 {
        1
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        match self {
            BfDebug::Status { key } => {
                vec![Bytes::from_static(b"STATUS"), key.clone()]
            }
            BfDebug::Filter { key, idx } => vec![
                Bytes::from_static(b"FILTER"),
                key.clone(),
                Bytes::from(idx.to_string()),
            ],
        }
    }
}
