//! Error types for the decode/encode boundary.
//!
//! Everything inside the CRDT core is infallible (§7 of `SPEC_FULL.md`): a
//! resolver or applier that cannot locate a path simply drops the offending
//! change. The only place this crate surfaces a `Result` to its caller is at
//! the serialized-bytes boundary, where malformed input is a real,
//! caller-visible failure.

use thiserror::Error;

/// Failure while turning wire bytes back into an `Rga`/tree/changeset.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("cbor decode error: {0}")]
    Cbor(#[from] ciborium::de::Error<std::io::Error>),

    #[error("invalid node uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("failed to parse event string {0:?}")]
    InvalidEvent(String),

    #[error("malformed tree shape: {0}")]
    MalformedTree(String),

    #[error("malformed changeset: {0}")]
    MalformedChangeSet(String),
}

/// Failure while turning an `Rga`/tree/changeset into wire bytes.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("cbor encode error: {0}")]
    Cbor(#[from] ciborium::ser::Error<std::io::Error>),
}
