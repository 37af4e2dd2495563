//! Advisory metrics-server probe
//!
//! The HPA in the topology needs resource metrics to scale on. Absence never
//! aborts a deploy; the operator just gets told what will not work.

use crate::k8s::ControlPlane;

const DEPLOYMENT: &str = "metrics-server";
const SYSTEM_NAMESPACE: &str = "kube-system";

/// Check whether metrics-server is deployed; print guidance if not
pub fn probe(cp: &dyn ControlPlane) -> bool {
    let present = deployment_listed(cp);

    if present {
        crate::log_info!("metrics-server found in {}", SYSTEM_NAMESPACE);
    } else {
        crate::log_warn!(
            "metrics-server not found in {}; the autoscaler will not scale",
            SYSTEM_NAMESPACE
        );
        println!();
        println!("To enable autoscaling, install metrics-server:");
        println!(
            "  kubectl apply -f https://github.com/kubernetes-sigs/metrics-server/releases/latest/download/components.yaml"
        );
        println!("  (on minikube: minikube addons enable metrics-server)");
        println!();
    }

    present
}

fn deployment_listed(cp: &dyn ControlPlane) -> bool {
    let out = match cp.get_resources_json("deployments", SYSTEM_NAMESPACE) {
        Ok(out) if out.succeeded => out,
        _ => return false,
    };

    names_in_list(&out.stdout)
        .iter()
        .any(|name| name == DEPLOYMENT)
}

/// Extract `.items[].metadata.name` from a kubectl list response
fn names_in_list(json: &str) -> Vec<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(json) else {
        return Vec::new();
    };

    value["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["metadata"]["name"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
