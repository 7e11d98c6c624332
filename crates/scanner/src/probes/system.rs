use crate::probe::{Probe, ProbeContext, ProbeReport};
use async_trait::async_trait;
use envdoctor_core::{EnvironmentInfo, Issue, Result, Severity, UNKNOWN_VERSION};

/// Describes the host and the installed Node toolchain
#[derive(Debug, Default)]
pub struct SystemProbe;

#[async_trait]
impl Probe for SystemProbe {
    fn name(&self) -> &'static str {
        "system"
    }

    async fn run(&self, ctx: &ProbeContext) -> Result<ProbeReport> {
        let host = &ctx.host;
        let node_version = ctx.node_version().await?;
        let npm_version = ctx.npm_version().await?;

        let mut issues = Vec::new();
        if node_version.is_none() {
            issues.push(Issue::error(
                "missing-node",
                Severity::Critical,
                "Node.js was not found on PATH. Install Node.js before continuing.",
            ));
        }

        let environment = EnvironmentInfo {
            node_version: node_version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
            npm_version: npm_version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
            os: host.os_name(),
            arch: host.arch.clone(),
            shell: host.shell().unwrap_or(UNKNOWN_VERSION).to_string(),
            is_wsl: host.is_wsl(),
            is_docker: host.is_docker(),
            is_ci: host.is_ci(),
            is_termux: host.is_termux(),
        };

        tracing::debug!(
            node = %environment.node_version,
            npm = %environment.npm_version,
            os = %environment.os,
            "collected environment info"
        );

        Ok(ProbeReport {
            issues,
            environment: Some(environment),
        })
    }
}
