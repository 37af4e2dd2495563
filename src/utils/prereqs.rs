//! Prerequisite checking for required tools and cluster environment

use crate::install::ingress_nginx::{self, IngressOutcome};
use crate::install::metrics_server;
use crate::k8s::ControlPlane;
use crate::utils::errors::OrchestrationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrereqError {
    #[error("Tool '{name}' not found")]
    NotFound { name: String, hint: String },
}

/// Trait for checking prerequisites
pub trait Prerequisite {
    /// Name of the prerequisite tool
    fn name(&self) -> &str;

    /// Check if the tool is available
    fn check(&self) -> Result<(), PrereqError>;

    /// Installation hint for the user
    fn install_hint(&self) -> &str;
}

/// Basic prerequisite that checks if a command exists
pub struct CommandPrereq {
    pub name: String,
    pub hint: String,
}

impl CommandPrereq {
    pub fn new(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: hint.into(),
        }
    }
}

impl Prerequisite for CommandPrereq {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> Result<(), PrereqError> {
        which::which(&self.name).map_err(|_| PrereqError::NotFound {
            name: self.name.clone(),
            hint: self.hint.clone(),
        })?;
        Ok(())
    }

    fn install_hint(&self) -> &str {
        &self.hint
    }
}

/// Common prerequisites for stack-dev
pub struct StackPrereqs;

impl StackPrereqs {
    /// Get kubectl prerequisite
    pub fn kubectl() -> CommandPrereq {
        CommandPrereq::new(
            "kubectl",
            "Install from: https://kubernetes.io/docs/tasks/tools/",
        )
    }

    /// Get helm prerequisite
    pub fn helm() -> CommandPrereq {
        CommandPrereq::new("helm", "Install from: https://helm.sh/docs/intro/install/")
    }

    /// Check all prerequisites and return detailed results
    /// Returns (found_tools, missing_tools)
    pub fn check_all(prereqs: &[&dyn Prerequisite]) -> (Vec<String>, Vec<(String, String)>) {
        let mut found = Vec::new();
        let mut missing = Vec::new();

        for prereq in prereqs {
            match prereq.check() {
                Ok(_) => found.push(prereq.name().to_string()),
                Err(PrereqError::NotFound { name, hint }) => missing.push((name, hint)),
            }
        }

        (found, missing)
    }
}

/// What the prerequisite check learned about the cluster
#[derive(Debug)]
pub struct ClusterContext {
    pub context_name: String,
    pub ingress: IngressOutcome,
    pub metrics_server_present: bool,
}

/// Probe cluster connectivity; fatal on failure, no retry
pub fn check_connectivity(cp: &dyn ControlPlane) -> Result<(), OrchestrationError> {
    let info = cp
        .cluster_info()
        .map_err(|e| OrchestrationError::FatalPrerequisite(e.to_string()))?;
    if !info.succeeded {
        return Err(OrchestrationError::FatalPrerequisite(format!(
            "Cannot connect to the cluster: {}. Fix connectivity (kubeconfig, VPN, \
             cluster up?) and retry",
            info.diagnostic()
        )));
    }
    Ok(())
}

/// Verify the cluster environment before a deploy.
///
/// Fatal: client binary broken, cluster unreachable. Everything else is
/// best-effort preparation: the ingress controller is installed when missing
/// (if helm is around), the metrics aggregator only warrants guidance.
pub fn check_cluster(cp: &dyn ControlPlane) -> Result<ClusterContext, OrchestrationError> {
    let version = cp
        .client_version()
        .map_err(|e| OrchestrationError::FatalPrerequisite(e.to_string()))?;
    if !version.succeeded {
        return Err(OrchestrationError::FatalPrerequisite(format!(
            "kubectl is not usable: {}. {}",
            version.diagnostic(),
            StackPrereqs::kubectl().install_hint()
        )));
    }

    check_connectivity(cp)?;

    // Recorded for the report only; a failed probe is not worth aborting over.
    let context_name = cp.current_context().unwrap_or_else(|_| "unknown".to_string());
    crate::log_info!("Active cluster context: {}", context_name);

    let ingress = ingress_nginx::ensure(cp);
    let metrics_server_present = metrics_server::probe(cp);

    Ok(ClusterContext {
        context_name,
        ingress,
        metrics_server_present,
    })
}
