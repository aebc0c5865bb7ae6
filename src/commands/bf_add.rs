// src/commands/bf_add.rs

use crate::commands::command_spec::CommandSpec;
use crate::commands::command_trait::{CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome};
use crate::commands::helpers::{extract_string, parse_f64};
use crate::error::BloomError;
use crate::reply::Reply;
use crate::scalable::ScalableBloom;
use crate::store::Store;
use async_trait::async_trait;
use bytes::Bytes;

/// Implements `BFADD key [ERROR eps] ELEMENTS e1 e2 ...`.
///
/// If the scalable filter at `key` does not exist, it is implicitly created
/// (with the `ERROR` rate if given, otherwise the configured default).
#[derive(Debug, Clone)]
pub struct BfAdd {
    pub key: Bytes,
    /// `0.0` means "unspecified"; the frozen-ε rule treats it that way.
    pub error: f64,
    pub elements: Vec<Bytes>,
}

impl ParseCommand for BfAdd {
    fn parse(args: &[Bytes]) -> Result<Self, BloomError> {
        if args.is_empty() {
            return Err(BloomError::WrongArgumentCount("BFADD".to_string()));
        }
        let key = args[0].clone();
        let mut idx = 1;
        let mut error = 0.0f64;
        let mut error_seen = false;
        let mut saw_elements = false;

        while idx < args.len() {
            let tok = extract_string(&args[idx])?;
            match tok.to_ascii_uppercase().as_str() {
                "ERROR" => {
                    if error_seen {
                        return Err(BloomError::InvalidOption(tok));
                    }
                    idx += 1;
                    let val = args.get(idx).ok_or(BloomError::NoErrorSpecified)?;
                    error = parse_f64(val)?;
                    error_seen = true;
                    idx += 1;
                }
                "ELEMENTS" => {
                    idx += 1;
                    saw_elements = true;
                    break;
                }
                other => return Err(BloomError::InvalidOption(other.to_string())),
            }
        }

        if !saw_elements {
            return Err(BloomError::WrongArgumentCount("BFADD".to_string()));
        }

        let elements = args[idx..].to_vec();
        Ok(BfAdd {
            key,
            error,
            elements,
        })
    }
}

#[async_trait]
impl ExecutableCommand for BfAdd {
    async fn execute(&self, store: &Store) -> Result<(Reply, WriteOutcome), BloomError> {
        let requested_error = self.error;
        let elements = &self.elements;
        let cfg = store.config().clone();

        let added = store
            .with_bloom_mut_or_create(
                &self.key,
                || ScalableBloom::new(cfg),
                |bf| -> Result<u64, BloomError> {
                    let mut added = 0u64;
                    for elem in elements {
                        if bf.add(elem, requested_error)? {
                            added += 1;
                        }
                    }
                    Ok(added)
                },
            )
            .await??;

        if added > 0 {
            store.record_write(&self.key).await;
            Ok((
                Reply::Integer(added as i64),
                WriteOutcome::Write { keys_modified: 1 },
            ))
        } else {
            Ok((Reply::Integer(0), WriteOutcome::DidNotWrite))
        }
    }
}

impl CommandSpec for BfAdd {
    fn name(&self) -> &'static str {
        "bfadd"
    }
    fn arity(&self) -> i64 {
        -3
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::WRITE | CommandFlags::DENY_OOM | CommandFlags::MOVABLEKEYS
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
        let mut out = vec![self.key.clone()];
        if self.error != 0.0 {
            out.push(Bytes::from_static(b"ERROR"));
            out.push(Bytes::from(self.error.to_string()));
        }
        out.push(Bytes::from_static(b"ELEMENTS"));
        out.extend(self.elements.iter().cloned());
        out
    }
}
