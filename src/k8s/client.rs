//! Control-plane client abstraction
//!
//! Every cluster interaction the orchestrator performs goes through this trait
//! so that tests can simulate failures, timeouts, and partial states without a
//! real cluster.

use crate::k8s::exec::ExecOutput;
use anyhow::Result;
use std::path::Path;
use std::time::Duration;

/// The capability set the orchestrator needs from the cluster
pub trait ControlPlane {
    /// Probe the client binary itself (`kubectl version --client`)
    fn client_version(&self) -> Result<ExecOutput>;

    /// Probe cluster connectivity (`kubectl cluster-info`)
    fn cluster_info(&self) -> Result<ExecOutput>;

    /// Name of the active kubeconfig context
    fn current_context(&self) -> Result<String>;

    /// Whether a namespace exists in the cluster
    fn namespace_exists(&self, name: &str) -> Result<bool>;

    /// Apply one manifest file
    fn apply_manifest(&self, path: &Path) -> Result<ExecOutput>;

    /// Block until a workload's rollout completes or the bound elapses
    fn rollout_status(
        &self,
        kind: &str,
        name: &str,
        namespace: &str,
        timeout: Duration,
    ) -> Result<ExecOutput>;

    /// Cascading namespace delete; already-absent counts as success when
    /// `ignore_missing` is set
    fn delete_namespace(&self, name: &str, ignore_missing: bool) -> Result<ExecOutput>;

    /// List resources of a kind in a namespace (human-readable table)
    fn get_resources(&self, kind: &str, namespace: &str) -> Result<ExecOutput>;

    /// List resources of a kind in a namespace as JSON
    fn get_resources_json(&self, kind: &str, namespace: &str) -> Result<ExecOutput>;
}
