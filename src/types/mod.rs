//! # types
//!
//! `types` is the module containing all the public structs of the network model:
//! one file per entity, plus the error types.

pub mod attributes;
pub mod bit_timing;
pub mod env_var;
pub mod errors;
pub mod message;
pub mod network;
pub mod node;
pub mod signal;
pub mod value_table;
