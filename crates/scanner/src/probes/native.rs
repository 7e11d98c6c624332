use super::{check_failed, read_package_json};
use crate::probe::{Probe, ProbeContext, ProbeReport};
use async_trait::async_trait;
use envdoctor_core::{
    Issue, Result, Severity, NODE_GYP_BIN, NODE_GYP_CACHE_DIR, NODE_GYP_VERSION_MARKER,
    NODE_MODULES_DIR, NPM_LOCKFILE,
};
use envdoctor_utils::fs::{list_dir_sorted, path_exists, read_to_string};

/// Tools needed to compile native addons on Unix-like hosts
const UNIX_BUILD_TOOLS: &[&str] = &["python3", "make", "g++"];

/// Packages that compile native code at install time
const NATIVE_PACKAGES: &[&str] = &[
    "node-sass",
    "sqlite3",
    "bcrypt",
    "canvas",
    "sharp",
    "fibers",
    "native-ext",
    "native-module",
    "node-expat",
    "node-xml",
    "iconv",
    "bufferutil",
    "utf-8-validate",
    "fsevents",
];

/// Checks the native addon build chain
#[derive(Debug, Default)]
pub struct NativeProbe;

impl NativeProbe {
    async fn check_build_tools(&self, ctx: &ProbeContext) -> Result<Vec<Issue>> {
        if ctx.host.is_windows() {
            let has_vs = ctx.host.var("VSINSTALLDIR").is_some()
                || ctx.host.var("VisualStudioVersion").is_some();
            if has_vs {
                return Ok(Vec::new());
            }
            return Ok(vec![Issue::warning(
                "missing-vs-build-tools",
                Severity::High,
                "Visual Studio Build Tools not detected. Native modules may fail to compile.",
            )
            .with_fix()]);
        }

        let mut issues = Vec::new();
        for tool in UNIX_BUILD_TOOLS {
            let result = ctx.run(&format!("{tool} --version")).await?;
            if !result.success() {
                issues.push(
                    Issue::warning(
                        format!("missing-{tool}"),
                        Severity::High,
                        format!("{tool} not found. Required for compiling native modules."),
                    )
                    .with_fix(),
                );
            }
        }
        Ok(issues)
    }

    async fn check_gyp_cache(&self, ctx: &ProbeContext) -> Result<Option<Issue>> {
        if !path_exists(&ctx.project_path(NODE_GYP_BIN)) {
            return Ok(None);
        }
        let cache_dir = ctx.project_path(NODE_GYP_CACHE_DIR);
        if !path_exists(&cache_dir) || !self.has_native_modules(ctx)? {
            return Ok(None);
        }

        // No marker means no previous build to compare against
        let marker = cache_dir.join(NODE_GYP_VERSION_MARKER);
        if !path_exists(&marker) {
            return Ok(None);
        }
        let recorded = read_to_string(&marker)?.trim().to_string();
        let Some(current) = ctx.node_version().await? else {
            return Ok(None);
        };

        Ok((recorded != current).then(|| {
            Issue::warning(
                "node-gyp-cache-issue",
                Severity::Medium,
                format!(
                    "Node.js version has changed since last build ({recorded} -> {current}). node-gyp cache may be outdated."
                ),
            )
            .with_fix()
        }))
    }

    fn check_lockfile_errors(&self, ctx: &ProbeContext) -> Result<Option<Issue>> {
        let lockfile = ctx.project_path(NPM_LOCKFILE);
        if !path_exists(&lockfile) {
            return Ok(None);
        }
        let content = read_to_string(&lockfile)?;

        Ok((content.contains("node-gyp") && content.contains("error")).then(|| {
            Issue::warning(
                "node-gyp-lockfile-error",
                Severity::Medium,
                "node-gyp errors detected in lockfile. Consider cleaning and reinstalling.",
            )
            .with_file(NPM_LOCKFILE)
            .with_fix()
        }))
    }

    fn has_native_modules(&self, ctx: &ProbeContext) -> Result<bool> {
        if let Some(package) = read_package_json(ctx)? {
            let declares_native = ["dependencies", "devDependencies"].iter().any(|section| {
                package
                    .get(section)
                    .and_then(|deps| deps.as_object())
                    .is_some_and(|deps| deps.keys().any(|name| NATIVE_PACKAGES.contains(&name.as_str())))
            });
            if declares_native {
                return Ok(true);
            }
        }

        let node_modules = ctx.project_path(NODE_MODULES_DIR);
        if !path_exists(&node_modules) {
            return Ok(false);
        }
        Ok(list_dir_sorted(&node_modules)?
            .iter()
            .any(|name| name.ends_with(".node")))
    }
}

#[async_trait]
impl Probe for NativeProbe {
    fn name(&self) -> &'static str {
        "native"
    }

    async fn run(&self, ctx: &ProbeContext) -> Result<ProbeReport> {
        let mut issues = Vec::new();
        match self.check_build_tools(ctx).await {
            Ok(found) => issues.extend(found),
            Err(e) => issues.push(check_failed("build-tools", "build tools", &e)),
        }
        match self.check_gyp_cache(ctx).await {
            Ok(found) => issues.extend(found),
            Err(e) => issues.push(check_failed("gyp-cache", "the native build cache", &e)),
        }
        match self.check_lockfile_errors(ctx) {
            Ok(found) => issues.extend(found),
            Err(e) => issues.push(check_failed("gyp-lockfile", "the lockfile", &e)),
        }
        Ok(ProbeReport::issues(issues))
    }
}
