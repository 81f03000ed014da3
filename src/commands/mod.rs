//! Command implementations
//!
//! Each command is a module with an execute function that takes the parsed
//! CLI args and the loaded configuration.

pub mod apply;

pub use apply::execute as apply;
