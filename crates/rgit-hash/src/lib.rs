//! Object identity and content hashing for the rgit object store.
//!
//! This crate provides the core `ObjectId` type (a 160-bit SHA-1 digest
//! with its hex representation) and the streaming `Hasher` used to compute
//! identifiers over framed object bytes.

mod error;
pub mod hasher;
mod oid;

pub use error::HashError;
pub use oid::ObjectId;
