//! Memory Match (workspace facade crate).
//!
//! Re-exports the engine crates under `memory_match::{core,input,term,types}`
//! and adds the binary's configuration and logging setup.

pub mod config;
pub mod logging;

pub use memory_match_core as core;
pub use memory_match_input as input;
pub use memory_match_term as term;
pub use memory_match_types as types;

pub use config::GameConfig;
