use super::{nested_str, read_package_json};
use crate::probe::{Probe, ProbeContext, ProbeReport};
use crate::version;
use async_trait::async_trait;
use envdoctor_core::{Error, Issue, Result, Severity, NVMRC_FILE, PACKAGE_JSON};
use envdoctor_utils::fs::{path_exists, read_to_string};
use std::path::PathBuf;

const MIN_SUPPORTED_NODE_MAJOR: u64 = 16;
const MIN_SUPPORTED_NPM_MAJOR: u64 = 6;

/// Checks Node and npm versions against project requirements
#[derive(Debug)]
pub struct ToolchainProbe {
    /// Well-known install locations counted towards duplicate installations
    known_paths: Vec<PathBuf>,
}

impl Default for ToolchainProbe {
    fn default() -> Self {
        Self::with_known_paths(
            ["/usr/local/bin/node", "/usr/bin/node", "/opt/nodejs/bin/node"]
                .into_iter()
                .map(PathBuf::from)
                .collect(),
        )
    }
}

impl ToolchainProbe {
    pub fn with_known_paths(known_paths: Vec<PathBuf>) -> Self {
        Self { known_paths }
    }

    async fn check_node(&self, ctx: &ProbeContext) -> Result<Vec<Issue>> {
        // Absence of node is reported by the system probe
        let Some(current) = ctx.node_version().await? else {
            return Ok(Vec::new());
        };
        let mut issues = Vec::new();

        let nvmrc = ctx.project_path(NVMRC_FILE);
        if path_exists(&nvmrc) {
            let required = read_to_string(&nvmrc)?.trim().to_string();
            if !version::is_compatible(&current, &required) {
                issues.push(
                    Issue::warning(
                        "node-version-mismatch",
                        Severity::Medium,
                        format!("Node.js version mismatch. Current: {current}, Required: {required}"),
                    )
                    .with_file(NVMRC_FILE)
                    .with_fix(),
                );
            }
        }

        if let Some(package) = read_package_json(ctx)? {
            if let Some(required) = nested_str(&package, "engines", "node") {
                if !version::is_compatible(&current, required) {
                    issues.push(
                        Issue::warning(
                            "node-engine-mismatch",
                            Severity::Medium,
                            format!(
                                "Node.js version doesn't meet engine requirement. Current: {current}, Required: {required}"
                            ),
                        )
                        .with_file(PACKAGE_JSON)
                        .with_fix(),
                    );
                }
            }
        }

        if version::major(&current).is_some_and(|major| major < MIN_SUPPORTED_NODE_MAJOR) {
            issues.push(
                Issue::warning(
                    "node-version-outdated",
                    Severity::Medium,
                    format!(
                        "Node.js version {current} is outdated. Consider upgrading to a newer LTS version."
                    ),
                )
                .with_fix(),
            );
        }

        Ok(issues)
    }

    async fn check_npm(&self, ctx: &ProbeContext) -> Result<Vec<Issue>> {
        let current = ctx.npm_version().await?.ok_or_else(|| {
            Error::command_execution("npm --version", "npm is not available", None)
        })?;
        let mut issues = Vec::new();

        if let Some(package) = read_package_json(ctx)? {
            if let Some(required) = nested_str(&package, "engines", "npm") {
                if !version::is_compatible(&current, required) {
                    issues.push(
                        Issue::warning(
                            "npm-engine-mismatch",
                            Severity::Medium,
                            format!(
                                "npm version doesn't meet engine requirement. Current: {current}, Required: {required}"
                            ),
                        )
                        .with_file(PACKAGE_JSON)
                        .with_fix(),
                    );
                }
            }
        }

        if version::major(&current).is_some_and(|major| major < MIN_SUPPORTED_NPM_MAJOR) {
            issues.push(
                Issue::warning(
                    "npm-version-outdated",
                    Severity::Low,
                    format!("npm version {current} is outdated. Consider upgrading to a newer version."),
                )
                .with_fix(),
            );
        }

        Ok(issues)
    }

    async fn check_installations(&self, ctx: &ProbeContext) -> Option<Issue> {
        // Symlinked entries (merged /usr, version manager shims) resolve to one binary
        let mut seen: Vec<PathBuf> = Vec::new();
        let mut found: Vec<String> = Vec::new();
        let mut record = |candidate: String| {
            let resolved = std::fs::canonicalize(&candidate)
                .unwrap_or_else(|_| PathBuf::from(&candidate));
            if !seen.contains(&resolved) {
                seen.push(resolved);
                found.push(candidate);
            }
        };

        let configured = ["NODEJS_HOME", "NVM_DIR"]
            .iter()
            .filter_map(|name| ctx.host.var(name).map(PathBuf::from));
        for path in self.known_paths.iter().cloned().chain(configured) {
            if path_exists(&path) {
                record(path.display().to_string());
            }
        }

        let lookup = if ctx.host.is_windows() {
            "where node"
        } else {
            "which -a node"
        };
        match ctx.run(lookup).await {
            Ok(result) if result.success() => {
                for line in result.stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
                    record(line.to_string());
                }
            }
            Ok(_) => {}
            Err(e) => tracing::debug!(error = %e, "node installation lookup failed"),
        }

        (found.len() > 1).then(|| {
            Issue::warning(
                "multiple-node-installations",
                Severity::Low,
                format!(
                    "Multiple Node.js installations detected. This may cause conflicts. Found installations: {}",
                    found.join(", ")
                ),
            )
            .with_fix()
        })
    }
}

#[async_trait]
impl Probe for ToolchainProbe {
    fn name(&self) -> &'static str {
        "toolchain"
    }

    async fn run(&self, ctx: &ProbeContext) -> Result<ProbeReport> {
        let mut issues = Vec::new();

        match self.check_node(ctx).await {
            Ok(found) => issues.extend(found),
            Err(e) => issues.push(Issue::error(
                "node-version-check-failed",
                Severity::Low,
                format!("Failed to check Node.js version: {e}"),
            )),
        }

        match self.check_npm(ctx).await {
            Ok(found) => issues.extend(found),
            Err(e) => issues.push(Issue::error(
                "npm-version-check-failed",
                Severity::Low,
                format!("Failed to check npm version: {e}"),
            )),
        }

        issues.extend(self.check_installations(ctx).await);

        Ok(ProbeReport::issues(issues))
    }
}
