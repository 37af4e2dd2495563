//! Cluster add-on handling

pub mod ingress_nginx;
pub mod metrics_server;
