//! Kubernetes operations

pub mod client;
pub mod exec;
pub mod kubectl;

#[cfg(test)]
pub mod fake;

// Re-export commonly used items
pub use client::ControlPlane;
pub use exec::ExecOutput;
pub use kubectl::KubectlClient;
