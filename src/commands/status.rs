//! Status reporting for the deployed topology
//!
//! Strictly read-only and best-effort: a failed listing warns and moves on,
//! it never changes the run's outcome.

use anyhow::Result;
use colored::Colorize;

use crate::config::topology;
use crate::k8s::{ControlPlane, KubectlClient};
use crate::utils::prereqs;

/// Handle the status command
pub fn run() -> Result<()> {
    let cp = KubectlClient::new();
    prereqs::check_connectivity(&cp)?;
    report(&cp, topology::NAMESPACE);
    Ok(())
}

/// Print the current resource inventory for the namespace plus next steps
pub fn report(cp: &dyn ControlPlane, namespace: &str) {
    println!();
    println!("{}", format!("Resources in namespace '{}':", namespace).bold());

    for (kind, title) in [
        ("deployments", "Deployments"),
        ("services", "Services"),
        ("ingress", "Ingress"),
        ("pods", "Pods"),
    ] {
        println!();
        println!("{}", title.cyan().bold());
        match cp.get_resources(kind, namespace) {
            Ok(out) if out.succeeded && !out.stdout.trim().is_empty() => {
                println!("{}", out.stdout.trim_end());
            }
            Ok(out) => {
                crate::log_warn!("Could not list {}: {}", kind, out.diagnostic());
            }
            Err(e) => {
                crate::log_warn!("Could not list {}: {}", kind, e);
            }
        }
    }

    print_replica_summary(cp, namespace);
    print_guidance(namespace);
}

fn print_replica_summary(cp: &dyn ControlPlane, namespace: &str) {
    let Ok(out) = cp.get_resources_json("deployments", namespace) else {
        return;
    };
    if !out.succeeded {
        return;
    }

    let summary = summarize_deployments(&out.stdout);
    if summary.is_empty() {
        return;
    }

    println!();
    println!("{}", "Replica readiness".cyan().bold());
    for (name, ready, desired) in summary {
        let line = format!("  {}: {}/{} ready", name, ready, desired);
        if ready == desired && desired > 0 {
            println!("{}", line.green());
        } else {
            println!("{}", line.yellow());
        }
    }
}

/// Parse (name, readyReplicas, desiredReplicas) from a deployment list response
pub fn summarize_deployments(json: &str) -> Vec<(String, u64, u64)> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(json) else {
        return Vec::new();
    };

    value["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let name = item["metadata"]["name"].as_str()?;
                    let ready = item["status"]["readyReplicas"].as_u64().unwrap_or(0);
                    let desired = item["spec"]["replicas"].as_u64().unwrap_or(0);
                    Some((name.to_string(), ready, desired))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn print_guidance(namespace: &str) {
    println!();
    println!("{}", "Next steps".bold());
    println!(
        "  Port-forward the API:  kubectl port-forward -n {} service/api-service 8080:80",
        namespace
    );
    println!("  Ingress address:       kubectl get ingress -n {}", namespace);
    println!(
        "  Tail API logs:         kubectl logs -n {} deployment/{} -f",
        namespace,
        topology::API_DEPLOYMENT
    );
    println!("  Watch the autoscaler:  kubectl get hpa -n {} -w", namespace);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::k8s::fake::FakeControlPlane;

    #[test]
    fn test_summarize_deployments() {
        let json = r#"{"items":[
            {"metadata":{"name":"redis-cache"},
             "spec":{"replicas":1},
             "status":{"readyReplicas":1}},
            {"metadata":{"name":"api-server"},
             "spec":{"replicas":3},
             "status":{}}
        ]}"#;
        let summary = summarize_deployments(json);
        assert_eq!(
            summary,
            vec![
                ("redis-cache".to_string(), 1, 1),
                ("api-server".to_string(), 0, 3)
            ]
        );
    }

    #[test]
    fn test_summarize_tolerates_garbage() {
        assert!(summarize_deployments("").is_empty());
        assert!(summarize_deployments("{}").is_empty());
    }

    #[test]
    fn test_report_is_best_effort() {
        // Listings succeed here, but nothing in report may panic or error out.
        let cp = FakeControlPlane {
            json_output: r#"{"items":[{"metadata":{"name":"api-server"},
                "spec":{"replicas":2},"status":{"readyReplicas":2}}]}"#
                .to_string(),
            ..Default::default()
        };
        report(&cp, topology::NAMESPACE);
    }
}
