//! Individual remediation steps shared by the procedures

use crate::procedure::RemediationContext;
use envdoctor_core::{
    RemediationOutcome, Result, NODE_GYP_BIN, NODE_GYP_CACHE_DIR, NODE_GYP_VERSION_MARKER,
    NODE_MODULES_DIR, NPM_LOCKFILE, PNPM_LOCKFILE, YARN_LOCKFILE,
};
use envdoctor_utils::fs::{path_exists, remove_path, write_string};
use std::path::Path;

/// Runs the project-local node-gyp from the project directory
pub const NODE_GYP_CLEAN_COMMAND: &str = "node_modules/.bin/node-gyp clean";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

/// Extra flags for a reinstall
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    pub force: bool,
    pub skip_optional: bool,
}

impl InstallOptions {
    pub fn forced_without_optional() -> Self {
        Self {
            force: true,
            skip_optional: true,
        }
    }
}

impl PackageManager {
    /// Pick the package manager from the lockfiles present.
    ///
    /// `yarn.lock` wins over `pnpm-lock.yaml`, which wins over
    /// `package-lock.json`; npm is the fallback.
    pub fn detect(project: &Path) -> Self {
        if path_exists(&project.join(YARN_LOCKFILE)) {
            PackageManager::Yarn
        } else if path_exists(&project.join(PNPM_LOCKFILE)) {
            PackageManager::Pnpm
        } else {
            PackageManager::Npm
        }
    }

    pub fn binary(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    pub fn install_command(self, options: InstallOptions) -> String {
        let mut command = format!("{} install", self.binary());
        if options.force {
            command.push_str(" --force");
        }
        if options.skip_optional {
            command.push_str(match self {
                PackageManager::Npm => " --omit=optional",
                PackageManager::Yarn => " --ignore-optional",
                PackageManager::Pnpm => " --no-optional",
            });
        }
        command
    }
}

/// Remove `node_modules` and `package-lock.json`
pub fn clear_dependency_cache(ctx: &RemediationContext) -> RemediationOutcome {
    let mut removed = Vec::new();
    for (relative, step) in [
        (NODE_MODULES_DIR, "node_modules-removed"),
        (NPM_LOCKFILE, "package-lock-removed"),
    ] {
        match remove_path(&ctx.project_path(relative)) {
            Ok(true) => {
                tracing::info!(path = relative, "removed");
                removed.push(step);
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(path = relative, error = %e, "cleanup failed");
                let mut outcome = ctx
                    .failed(format!("Failed to clean up: {e}"))
                    .with_failed_step("cleanup-failed");
                outcome.fixed_steps = removed.iter().map(|s| s.to_string()).collect();
                return outcome;
            }
        }
    }

    removed.into_iter().fold(
        ctx.succeeded("Successfully cleaned node_modules and lock files"),
        |outcome, step| outcome.with_fixed_step(step),
    )
}

/// Install dependencies with the given package manager
pub async fn reinstall(
    ctx: &RemediationContext,
    manager: PackageManager,
    options: InstallOptions,
) -> Result<RemediationOutcome> {
    let command = manager.install_command(options);
    let output = ctx.run_install(&command).await?;

    if output.success() {
        Ok(ctx
            .succeeded(format!("Dependencies successfully installed with `{command}`"))
            .with_fixed_step("dependencies-installed"))
    } else {
        Ok(ctx
            .failed(format!(
                "Installation failed with code {}: {}",
                output.exit_code,
                output.stderr.trim()
            ))
            .with_failed_step("install-failed"))
    }
}

/// Remove the node-gyp build cache, record the Node version it will be
/// rebuilt for and let the project's node-gyp clean its own build output
pub async fn clear_gyp_cache(ctx: &RemediationContext) -> RemediationOutcome {
    let cache_dir = ctx.project_path(NODE_GYP_CACHE_DIR);
    let mut outcome = ctx.succeeded("No node-gyp cache found to clean");

    match remove_path(&cache_dir) {
        Ok(false) => {}
        Ok(true) => {
            outcome.fixed_steps.push("node-gyp-cache-removed".to_string());
            record_node_version(ctx, &cache_dir, &mut outcome).await;
        }
        Err(e) => {
            return ctx
                .failed(format!("Failed to clean node-gyp cache: {e}"))
                .with_failed_step("node-gyp-cache-cleanup-failed");
        }
    }

    if path_exists(&ctx.project_path(NODE_GYP_BIN)) {
        match ctx.run_install(NODE_GYP_CLEAN_COMMAND).await {
            Ok(output) if output.success() => {
                outcome.fixed_steps.push("node-gyp-cleaned".to_string());
            }
            Ok(output) => {
                tracing::warn!(
                    exit_code = output.exit_code,
                    stderr = %output.stderr.trim(),
                    "node-gyp clean failed"
                );
            }
            Err(e) => tracing::warn!(error = %e, "node-gyp clean failed"),
        }
    }

    if !outcome.fixed_steps.is_empty() {
        outcome.message = "Successfully cleaned node-gyp cache".to_string();
    }
    outcome
}

async fn record_node_version(
    ctx: &RemediationContext,
    cache_dir: &Path,
    outcome: &mut RemediationOutcome,
) {
    match ctx.run_lookup("node --version").await {
        Ok(output) if output.success() => {
            let version = output.stdout.trim();
            match write_string(&cache_dir.join(NODE_GYP_VERSION_MARKER), version) {
                Ok(()) => outcome.fixed_steps.push("node-version-recorded".to_string()),
                Err(e) => {
                    tracing::warn!(error = %e, "could not record node version");
                    outcome.failed_steps.push("node-version-record-failed".to_string());
                }
            }
        }
        Ok(_) | Err(_) => {
            tracing::debug!("node version unavailable, marker not written");
        }
    }
}

/// The command that installs compiler tooling on this host, if one of the
/// known system package managers is available
pub async fn build_tools_install_command(ctx: &RemediationContext) -> Option<String> {
    let host = ctx.host();
    let candidates: &[(&str, &str)] = if host.is_macos() {
        &[("which brew", "brew install python3 make gcc")]
    } else if host.is_windows() {
        &[
            (
                "choco --version",
                "choco install python3 visualstudio2022buildtools -y",
            ),
            (
                "scoop --version",
                "scoop install python3 && scoop install visualstudio2022buildtools",
            ),
            (
                "winget --version",
                "winget install Python.Python.3 && winget install Microsoft.VisualStudio.2022.BuildTools",
            ),
        ]
    } else if host.is_termux() {
        &[("which pkg", "pkg install python make clang")]
    } else {
        &[
            ("which apt", "sudo apt update && sudo apt install -y python3 make g++"),
            ("which yum", "sudo yum install -y python3 make gcc-c++"),
            ("which pacman", "sudo pacman -S python3 make gcc"),
        ]
    };

    for (probe, install) in candidates {
        if matches!(ctx.run_lookup(probe).await, Ok(output) if output.success()) {
            return Some(install.to_string());
        }
    }
    None
}
