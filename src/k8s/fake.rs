//! Scriptable control-plane double for tests
//!
//! Records every call and plays back configured outcomes so orchestration
//! logic can be exercised deterministically without a cluster. Single-threaded
//! by design, hence `RefCell` rather than locks.

use crate::k8s::client::ControlPlane;
use crate::k8s::exec::ExecOutput;
use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct FakeControlPlane {
    pub client_version_ok: bool,
    pub cluster_reachable: bool,
    pub context_name: String,
    /// Namespaces that exist in the fake cluster
    pub namespaces: Vec<String>,
    /// Manifest file name (e.g. "05-api-deployment.yaml") whose apply fails
    pub fail_apply_on: Option<String>,
    /// Deployment names whose rollout never completes
    pub rollout_never_ready: Vec<String>,
    pub delete_succeeds: bool,
    /// Per-namespace countdown: report the namespace present for N polls,
    /// absent afterwards
    pub gone_after_polls: HashMap<String, usize>,
    pub table_output: String,
    pub json_output: String,

    pub apply_calls: RefCell<Vec<PathBuf>>,
    pub rollout_calls: RefCell<Vec<String>>,
    pub delete_calls: RefCell<u32>,
    pub exists_polls: RefCell<HashMap<String, usize>>,
}

impl Default for FakeControlPlane {
    fn default() -> Self {
        Self {
            client_version_ok: true,
            cluster_reachable: true,
            context_name: "kind-stack-test".to_string(),
            namespaces: Vec::new(),
            fail_apply_on: None,
            rollout_never_ready: Vec::new(),
            delete_succeeds: true,
            gone_after_polls: HashMap::new(),
            table_output: "NAME         READY   STATUS\nfake-thing   1/1     Running\n"
                .to_string(),
            json_output: r#"{"items":[]}"#.to_string(),
            apply_calls: RefCell::new(Vec::new()),
            rollout_calls: RefCell::new(Vec::new()),
            delete_calls: RefCell::new(0),
            exists_polls: RefCell::new(HashMap::new()),
        }
    }
}

fn ok(stdout: &str) -> ExecOutput {
    ExecOutput {
        succeeded: true,
        exit_code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

fn fail(stderr: &str) -> ExecOutput {
    ExecOutput {
        succeeded: false,
        exit_code: Some(1),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

impl ControlPlane for FakeControlPlane {
    fn client_version(&self) -> Result<ExecOutput> {
        Ok(if self.client_version_ok {
            ok("Client Version: v1.31.0")
        } else {
            fail("kubectl: command not found")
        })
    }

    fn cluster_info(&self) -> Result<ExecOutput> {
        Ok(if self.cluster_reachable {
            ok("Kubernetes control plane is running")
        } else {
            fail("The connection to the server was refused")
        })
    }

    fn current_context(&self) -> Result<String> {
        Ok(self.context_name.clone())
    }

    fn namespace_exists(&self, name: &str) -> Result<bool> {
        let polls_so_far = {
            let mut polls = self.exists_polls.borrow_mut();
            let entry = polls.entry(name.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };

        if let Some(&present_for) = self.gone_after_polls.get(name) {
            return Ok(polls_so_far <= present_for);
        }

        Ok(self.namespaces.iter().any(|ns| ns == name))
    }

    fn apply_manifest(&self, path: &Path) -> Result<ExecOutput> {
        self.apply_calls.borrow_mut().push(path.to_path_buf());

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.fail_apply_on.as_deref() == Some(file_name.as_str()) {
            Ok(fail(&format!("error validating \"{}\"", file_name)))
        } else {
            Ok(ok(&format!("{} configured", file_name)))
        }
    }

    fn rollout_status(
        &self,
        _kind: &str,
        name: &str,
        _namespace: &str,
        timeout: Duration,
    ) -> Result<ExecOutput> {
        self.rollout_calls.borrow_mut().push(name.to_string());

        if self.rollout_never_ready.iter().any(|n| n == name) {
            Ok(fail(&format!(
                "error: timed out waiting for the condition after {}s",
                timeout.as_secs()
            )))
        } else {
            Ok(ok(&format!("deployment \"{}\" successfully rolled out", name)))
        }
    }

    fn delete_namespace(&self, name: &str, ignore_missing: bool) -> Result<ExecOutput> {
        *self.delete_calls.borrow_mut() += 1;

        if !self.delete_succeeds {
            return Ok(fail(&format!("unable to delete namespace \"{}\"", name)));
        }

        let present = self.namespaces.iter().any(|ns| ns == name)
            || self.gone_after_polls.contains_key(name);
        if !present && !ignore_missing {
            return Ok(fail(&format!("namespaces \"{}\" not found", name)));
        }

        Ok(ok(&format!("namespace \"{}\" deleted", name)))
    }

    fn get_resources(&self, _kind: &str, _namespace: &str) -> Result<ExecOutput> {
        Ok(ok(&self.table_output))
    }

    fn get_resources_json(&self, _kind: &str, _namespace: &str) -> Result<ExecOutput> {
        Ok(ok(&self.json_output))
    }
}
