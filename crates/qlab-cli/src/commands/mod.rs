//! CLI command implementations.

pub mod common;
pub mod export;
pub mod qasm;
pub mod run;
pub mod version;
