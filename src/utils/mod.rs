//! Utility modules for stack-dev

pub mod errors;
pub mod logger;
pub mod prereqs;
pub mod progress;
pub mod prompt;

// Re-export commonly used items
pub use errors::OrchestrationError;
pub use logger::{log_error, log_info, log_warn};
pub use prereqs::{ClusterContext, Prerequisite, StackPrereqs};
pub use prompt::{is_confirmed, read_line, CONFIRM_TOKEN};
