//! Domain layer shared by the persistence, generation and HTTP crates.
//!
//! Holds no I/O: primitive types, the error taxonomy and article rules.

pub mod article;
pub mod error;
pub mod types;
