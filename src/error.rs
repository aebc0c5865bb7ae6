// src/error.rs

//! Defines the primary error type for the crate.

use thiserror::Error;

/// The main error enum, representing all possible failures of the engine and
/// the command surface built on top of it.
///
/// Using `thiserror` allows for clean error definitions and automatic `From`
/// trait implementations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BloomError {
    #[error("no error specified")]
    NoErrorSpecified,

    #[error("error too small")]
    ErrorTooSmall,

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("cannot change error on existing bloom filter")]
    FrozenEpsilon,

    #[error("The specified key does not exist")]
    KeyNotFound,

    #[error("index out of range")]
    IndexOutOfRange,

    #[error("invalid filter index")]
    InvalidFilterIndex,

    #[error("Unknown BFDEBUG subcommand '{0}'")]
    UnknownSubcommand(String),

    #[error("Wrong number of arguments for the '{0}' subcommand")]
    WrongArgumentCount(String),

    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    WrongType,

    #[error("value is not a valid float")]
    NotAFloat,
}

impl From<std::num::ParseFloatError> for BloomError {
    fn from(_: std::num::ParseFloatError) -> Self {
        BloomError::NotAFloat
    }
}
