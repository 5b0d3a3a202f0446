//! Shared utilities for rgit: commit dates, signatures, and identities.

pub mod date;
pub mod error;

pub use date::{GitDate, Identity, Signature};
pub use error::UtilError;

pub type Result<T> = std::result::Result<T, UtilError>;
