//! stack-dev library - deploy/teardown orchestration for the api-stack demo app

pub mod commands;
pub mod config;
pub mod install;
pub mod k8s;
pub mod utils;
