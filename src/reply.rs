// src/reply.rs

//! The reply side of the wire contract: a small value type the command
//! surface returns (integer / bulk string / simple string) without pulling
//! in the full RESP protocol machinery.

use bytes::Bytes;

/// A reply value produced by one of the `BF*` commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Integer(i64),
    BulkString(Bytes),
    SimpleString(String),
}

impl Reply {
    pub fn bulk_string(s: impl Into<String>) -> Self {
        Reply::BulkString(Bytes::from(s.into()))
    }
}
