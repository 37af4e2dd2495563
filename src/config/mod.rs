//! Configuration for stack-dev

pub mod topology;
