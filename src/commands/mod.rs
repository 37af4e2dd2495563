//! Command implementations for the stack-dev CLI

pub mod cleanup;
pub mod deploy;
pub mod status;
