use super::{check_failed, read_package_json};
use crate::probe::{Probe, ProbeContext, ProbeReport};
use async_trait::async_trait;
use envdoctor_core::{
    Issue, Result, Severity, COMMAND_NOT_FOUND_EXIT_CODE, NODE_MODULES_DIR, NPM_LOCKFILE,
    PACKAGE_JSON, PNPM_LOCKFILE, YARN_LOCKFILE,
};
use envdoctor_utils::fs::{list_dir_sorted, path_exists};

/// How many installed packages are sampled for missing manifests
const CORRUPTION_SAMPLE_SIZE: usize = 5;

const ROLLUP_ANDROID_ARM64: &str = "node_modules/@rollup/rollup-android-arm64";

/// Lockfile integrity check per package manager
struct DriftCheck {
    lockfile: &'static str,
    command: &'static str,
    issue_id: &'static str,
    manager: &'static str,
}

const DRIFT_CHECKS: &[DriftCheck] = &[
    DriftCheck {
        lockfile: NPM_LOCKFILE,
        command: "npm ls --depth=0",
        issue_id: "npm-dependency-drift",
        manager: "npm",
    },
    DriftCheck {
        lockfile: YARN_LOCKFILE,
        command: "yarn check --integrity",
        issue_id: "yarn-dependency-drift",
        manager: "yarn",
    },
    DriftCheck {
        lockfile: PNPM_LOCKFILE,
        command: "pnpm ls --depth 0",
        issue_id: "pnpm-dependency-drift",
        manager: "pnpm",
    },
];

/// Checks the installed dependency tree against the project's lockfiles
#[derive(Debug, Default)]
pub struct DependencyProbe;

impl DependencyProbe {
    async fn check_drift(&self, ctx: &ProbeContext, issues: &mut Vec<Issue>) -> Result<()> {
        for check in DRIFT_CHECKS {
            if !path_exists(&ctx.project_path(check.lockfile)) {
                continue;
            }
            let result = ctx.run_in_project(check.command).await?;
            if result.exit_code == COMMAND_NOT_FOUND_EXIT_CODE {
                tracing::debug!(
                    manager = check.manager,
                    "package manager not installed, skipping integrity check"
                );
                continue;
            }
            if !result.success() {
                tracing::debug!(
                    command = check.command,
                    exit_code = result.exit_code,
                    "lockfile integrity check failed"
                );
                issues.push(
                    Issue::warning(
                        check.issue_id,
                        Severity::Medium,
                        format!(
                            "{} dependency drift detected. Run {} install to fix.",
                            check.manager, check.manager
                        ),
                    )
                    .with_file(check.lockfile)
                    .with_fix(),
                );
            }
        }
        Ok(())
    }

    fn check_optional_dependencies(&self, ctx: &ProbeContext) -> Result<Option<Issue>> {
        if ctx.host.is_macos() {
            return Ok(None);
        }
        let Some(package) = read_package_json(ctx)? else {
            return Ok(None);
        };

        let declared = package
            .get("optionalDependencies")
            .and_then(|deps| deps.get("fsevents"))
            .is_some();
        let installed = path_exists(&ctx.project_path("node_modules/fsevents"));

        Ok((declared && installed).then(|| {
            Issue::warning(
                "fsevents-non-macos",
                Severity::Medium,
                "fsevents is installed but only works on macOS. This may cause issues on other platforms.",
            )
            .with_file(PACKAGE_JSON)
            .with_fix()
        }))
    }

    fn check_rollup_android(&self, ctx: &ProbeContext) -> Option<Issue> {
        let host = &ctx.host;
        if !(host.is_termux() && host.is_arm64()) {
            return None;
        }
        path_exists(&ctx.project_path(ROLLUP_ANDROID_ARM64)).then(|| {
            Issue::error(
                "rollup-android-arm64-issue",
                Severity::High,
                "@rollup/rollup-android-arm64 is installed on Termux and is known to fail to load. Reinstall dependencies with --force.",
            )
            .with_fix()
        })
    }

    fn check_corruption(&self, ctx: &ProbeContext) -> Result<Option<Issue>> {
        let node_modules = ctx.project_path(NODE_MODULES_DIR);
        let sample: Vec<String> = list_dir_sorted(&node_modules)?
            .into_iter()
            .filter(|name| !name.starts_with('.') && !name.starts_with('@'))
            .take(CORRUPTION_SAMPLE_SIZE)
            .collect();

        if sample.is_empty() {
            return Ok(None);
        }

        let broken = sample
            .iter()
            .filter(|name| !path_exists(&node_modules.join(name).join(PACKAGE_JSON)))
            .count();

        Ok((broken * 2 > sample.len()).then(|| {
            Issue::error(
                "corrupted-node-modules",
                Severity::High,
                "node_modules appears to be corrupted. Consider removing and reinstalling.",
            )
            .with_fix()
        }))
    }
}

#[async_trait]
impl Probe for DependencyProbe {
    fn name(&self) -> &'static str {
        "dependency"
    }

    async fn run(&self, ctx: &ProbeContext) -> Result<ProbeReport> {
        let mut issues = Vec::new();

        if !path_exists(&ctx.project_path(NODE_MODULES_DIR)) {
            // Nothing else can be checked without an installed tree
            issues.push(
                Issue::error(
                    "missing-node-modules",
                    Severity::Critical,
                    "node_modules directory is missing. Run npm install.",
                )
                .with_fix(),
            );
            return Ok(ProbeReport::issues(issues));
        }

        let has_lockfile = [NPM_LOCKFILE, YARN_LOCKFILE, PNPM_LOCKFILE]
            .iter()
            .any(|lockfile| path_exists(&ctx.project_path(lockfile)));
        if !has_lockfile {
            issues.push(
                Issue::warning(
                    "missing-lockfile",
                    Severity::Medium,
                    "No lockfile found. Consider running npm install to generate one.",
                )
                .with_fix(),
            );
        }

        if let Err(e) = self.check_drift(ctx, &mut issues).await {
            issues.push(check_failed("lockfile-drift", "lockfile integrity", &e));
        }
        match self.check_optional_dependencies(ctx) {
            Ok(found) => issues.extend(found),
            Err(e) => issues.push(check_failed("optional-packages", "optional packages", &e)),
        }
        issues.extend(self.check_rollup_android(ctx));
        match self.check_corruption(ctx) {
            Ok(found) => issues.extend(found),
            Err(e) => issues.push(check_failed("corruption", "node_modules integrity", &e)),
        }

        Ok(ProbeReport::issues(issues))
    }
}
