//! Snapshot of host facts the probes depend on
//!
//! Captured once per scan so probes never read the process environment
//! directly, and so tests can describe any host they like.

use std::collections::HashMap;
use std::path::Path;

/// Environment variables probes look at
const CAPTURED_VARS: &[&str] = &[
    "SHELL",
    "ComSpec",
    "WSL_DISTRO_NAME",
    "DOCKER",
    "CONTAINER",
    "CI",
    "GITHUB_ACTIONS",
    "TRAVIS",
    "JENKINS",
    "PREFIX",
    "NODEJS_HOME",
    "NVM_DIR",
    "VSINSTALLDIR",
    "VisualStudioVersion",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    /// Value of `std::env::consts::OS` (`linux`, `macos`, `windows`, ...)
    pub platform: String,
    /// Value of `std::env::consts::ARCH`
    pub arch: String,
    env: HashMap<String, String>,
    kernel_mentions_microsoft: bool,
    has_dockerenv: bool,
}

impl HostInfo {
    /// A host with the given platform and no environment
    pub fn new(platform: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            arch: arch.into(),
            env: HashMap::new(),
            kernel_mentions_microsoft: false,
            has_dockerenv: false,
        }
    }

    /// Capture the current machine
    pub fn capture() -> Self {
        let env = CAPTURED_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok().map(|value| (name.to_string(), value)))
            .collect();

        let kernel_mentions_microsoft = std::fs::read_to_string("/proc/version")
            .map(|version| version.to_lowercase().contains("microsoft"))
            .unwrap_or(false);

        Self {
            platform: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            env,
            kernel_mentions_microsoft,
            has_dockerenv: Path::new("/.dockerenv").exists(),
        }
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    pub fn with_wsl_kernel(mut self, wsl: bool) -> Self {
        self.kernel_mentions_microsoft = wsl;
        self
    }

    /// Look up a captured variable; empty values count as unset
    pub fn var(&self, name: &str) -> Option<&str> {
        self.env
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn is_windows(&self) -> bool {
        self.platform == "windows"
    }

    pub fn is_macos(&self) -> bool {
        self.platform == "macos"
    }

    pub fn is_arm64(&self) -> bool {
        matches!(self.arch.as_str(), "aarch64" | "arm64")
    }

    /// Human-readable operating system name
    pub fn os_name(&self) -> String {
        match self.platform.as_str() {
            "macos" => "macOS".to_string(),
            "windows" => "Windows".to_string(),
            "linux" => "Linux".to_string(),
            other => other.to_string(),
        }
    }

    pub fn shell(&self) -> Option<&str> {
        self.var("SHELL").or_else(|| self.var("ComSpec"))
    }

    pub fn is_wsl(&self) -> bool {
        self.kernel_mentions_microsoft || self.var("WSL_DISTRO_NAME").is_some()
    }

    pub fn is_docker(&self) -> bool {
        self.has_dockerenv || self.var("DOCKER") == Some("true") || self.var("CONTAINER") == Some("true")
    }

    pub fn is_ci(&self) -> bool {
        ["CI", "GITHUB_ACTIONS", "TRAVIS", "JENKINS"]
            .iter()
            .any(|name| self.var(name).is_some())
    }

    pub fn is_termux(&self) -> bool {
        self.var("PREFIX")
            .map(|prefix| prefix.contains("com.termux"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_name_mapping() {
        assert_eq!(HostInfo::new("macos", "aarch64").os_name(), "macOS");
        assert_eq!(HostInfo::new("windows", "x86_64").os_name(), "Windows");
        assert_eq!(HostInfo::new("linux", "x86_64").os_name(), "Linux");
        assert_eq!(HostInfo::new("freebsd", "x86_64").os_name(), "freebsd");
    }

    #[test]
    fn test_shell_prefers_unix_variable() {
        let host = HostInfo::new("linux", "x86_64")
            .with_var("ComSpec", "cmd.exe")
            .with_var("SHELL", "/bin/zsh");
        assert_eq!(host.shell(), Some("/bin/zsh"));

        let windows = HostInfo::new("windows", "x86_64").with_var("ComSpec", "cmd.exe");
        assert_eq!(windows.shell(), Some("cmd.exe"));
    }

    #[test]
    fn test_environment_flags() {
        let host = HostInfo::new("linux", "aarch64")
            .with_var("CI", "1")
            .with_var("DOCKER", "true")
            .with_var("WSL_DISTRO_NAME", "Ubuntu")
            .with_var("PREFIX", "/data/data/com.termux/files/usr");

        assert!(host.is_ci());
        assert!(host.is_docker());
        assert!(host.is_wsl());
        assert!(host.is_termux());
        assert!(host.is_arm64());
    }

    #[test]
    fn test_plain_host_has_no_flags() {
        let host = HostInfo::new("linux", "x86_64")
            .with_var("CI", "")
            .with_var("DOCKER", "false");

        assert!(!host.is_ci());
        assert!(!host.is_docker());
        assert!(!host.is_wsl());
        assert!(!host.is_termux());
        assert!(host.with_wsl_kernel(true).is_wsl());
    }
}
