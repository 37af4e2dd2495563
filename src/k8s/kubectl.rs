//! Kubectl-backed control-plane client

use crate::k8s::client::ControlPlane;
use crate::k8s::exec::{self, ExecOutput};
use anyhow::Result;
use std::path::Path;
use std::time::Duration;

/// Real [`ControlPlane`] implementation that shells out to `kubectl`
#[derive(Debug, Default)]
pub struct KubectlClient;

impl KubectlClient {
    pub fn new() -> Self {
        Self
    }

    fn kubectl(&self, args: &[&str]) -> Result<ExecOutput> {
        exec::run("kubectl", args)
    }
}

impl ControlPlane for KubectlClient {
    fn client_version(&self) -> Result<ExecOutput> {
        self.kubectl(&["version", "--client"])
    }

    fn cluster_info(&self) -> Result<ExecOutput> {
        self.kubectl(&["cluster-info"])
    }

    fn current_context(&self) -> Result<String> {
        let out = self.kubectl(&["config", "current-context"])?;
        if out.succeeded {
            Ok(out.stdout.trim().to_string())
        } else {
            Err(anyhow::anyhow!(
                "Failed to read current context: {}",
                out.diagnostic()
            ))
        }
    }

    fn namespace_exists(&self, name: &str) -> Result<bool> {
        let out = self.kubectl(&["get", "namespace", name, "--no-headers"])?;
        Ok(out.succeeded)
    }

    fn apply_manifest(&self, path: &Path) -> Result<ExecOutput> {
        let path_str = path.to_string_lossy();
        self.kubectl(&["apply", "-f", &path_str])
    }

    fn rollout_status(
        &self,
        kind: &str,
        name: &str,
        namespace: &str,
        timeout: Duration,
    ) -> Result<ExecOutput> {
        let resource = format!("{}/{}", kind, name);
        let timeout_arg = format!("--timeout={}s", timeout.as_secs());
        self.kubectl(&[
            "rollout",
            "status",
            &resource,
            "-n",
            namespace,
            &timeout_arg,
        ])
    }

    fn delete_namespace(&self, name: &str, ignore_missing: bool) -> Result<ExecOutput> {
        let mut args = vec!["delete", "namespace", name, "--wait=false"];
        if ignore_missing {
            args.push("--ignore-not-found=true");
        }
        self.kubectl(&args)
    }

    // An empty namespace means cluster scope
    fn get_resources(&self, kind: &str, namespace: &str) -> Result<ExecOutput> {
        if namespace.is_empty() {
            self.kubectl(&["get", kind, "-o", "wide"])
        } else {
            self.kubectl(&["get", kind, "-n", namespace, "-o", "wide"])
        }
    }

    fn get_resources_json(&self, kind: &str, namespace: &str) -> Result<ExecOutput> {
        if namespace.is_empty() {
            self.kubectl(&["get", kind, "-o", "json"])
        } else {
            self.kubectl(&["get", kind, "-n", namespace, "-o", "json"])
        }
    }
}
