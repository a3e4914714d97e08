use thiserror::Error;

use crate::types::network::Collection;

/// Errors returned by the entity factories and by [`Network::merge_with`](crate::Network::merge_with).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("Node '{name}' already exists")]
    DuplicateNode { name: String },
    #[error("Value table '{name}' already exists")]
    DuplicateValueTable { name: String },
    #[error("Message ID {id:#X} already assigned to message '{name}'")]
    DuplicateMessage { id: u64, name: String },
    #[error("Signal '{signal}' already exists in message '{message}'")]
    DuplicateSignal { message: String, signal: String },
    #[error("Environment variable '{name}' already exists")]
    DuplicateEnvironmentVariable { name: String },
    #[error("Attribute definition '{name}' already exists")]
    DuplicateAttributeDefinition { name: String },
    #[error("Attribute '{name}' already set on {owner}")]
    DuplicateAttribute { owner: String, name: String },
    #[error("Merge rejected: {count} conflicting key(s), first is {collection} '{key}'")]
    MergeConflict {
        collection: Collection,
        key: String,
        count: usize,
    },
}

/// Errors produced by the checked codec entry points (`try_decode` / `try_encode`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Buffer too short for signal '{signal}': need at least {needed} bytes, got {actual}")]
    BufferTooShort {
        signal: String,
        needed: usize,
        actual: usize,
    },
}
