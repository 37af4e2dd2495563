//! Error taxonomy for the deploy and teardown pipelines
//!
//! Every variant is fatal to the run and maps to exit code 1. A declined
//! cleanup confirmation is deliberately not here: cancelling is not an error.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestrationError {
    #[error("{0}")]
    FatalPrerequisite(String),

    #[error("Manifest not found: {}", .0.display())]
    ManifestMissing(PathBuf),

    #[error("Failed to apply manifest '{name}': {detail}")]
    ApplyFailed {
        name: String,
        path: PathBuf,
        detail: String,
    },

    #[error(
        "Deployment {namespace}/{name} did not become ready within {}s",
        timeout.as_secs()
    )]
    RolloutTimeout {
        name: String,
        namespace: String,
        timeout: Duration,
    },

    #[error("Failed to delete namespace '{namespace}': {detail}")]
    DeletionFailed { namespace: String, detail: String },

    #[error(
        "Namespace '{namespace}' still present after {}s (finalizers may be stuck; \
         inspect with: kubectl get namespace {namespace} -o yaml)",
        waited.as_secs()
    )]
    DeletionTimeout { namespace: String, waited: Duration },
}

impl OrchestrationError {
    /// Operator-facing remediation hint, where one exists
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::FatalPrerequisite(_) => None,
            Self::ManifestMissing(path) => Some(format!(
                "Run from the repository root, or pass --manifests pointing at the \
                 directory containing {}",
                path.display()
            )),
            Self::ApplyFailed { path, .. } => Some(format!(
                "Validate the manifest with: kubectl apply --dry-run=client -f {}",
                path.display()
            )),
            Self::RolloutTimeout { name, namespace, .. } => Some(format!(
                "Check pod status: kubectl get pods -n {} -l app={}",
                namespace, name
            )),
            Self::DeletionFailed { namespace, .. } => Some(format!(
                "Check your permissions: kubectl auth can-i delete namespace {}",
                namespace
            )),
            Self::DeletionTimeout { .. } => None,
        }
    }
}
