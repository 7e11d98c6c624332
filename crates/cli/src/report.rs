//! Persistence of the last scan report between runs

use envdoctor_config::Config;
use envdoctor_core::{Result, ScanReport, REPORT_FILENAME};
use envdoctor_utils::atomic_file::write_json_atomic;
use envdoctor_utils::fs::{path_exists, read_json, remove_path};
use std::path::{Path, PathBuf};

/// Stores the last [`ScanReport`] under the envdoctor state directory
#[derive(Debug, Clone)]
pub struct ReportStore {
    state_dir: PathBuf,
}

impl ReportStore {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.runtime_settings.state_dir.clone())
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn report_path(&self) -> PathBuf {
        self.state_dir.join(REPORT_FILENAME)
    }

    pub fn save(&self, report: &ScanReport) -> Result<()> {
        let path = self.report_path();
        write_json_atomic(&path, report)?;
        tracing::debug!(path = %path.display(), issues = report.issues.len(), "report saved");
        Ok(())
    }

    /// The saved report, or `None` when no scan has been saved yet
    pub fn load(&self) -> Result<Option<ScanReport>> {
        let path = self.report_path();
        if !path_exists(&path) {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    /// The saved report if it was produced for `project_dir`. A report
    /// from another project is treated as absent.
    pub fn load_for(&self, project_dir: &Path) -> Result<Option<ScanReport>> {
        Ok(self.load()?.filter(|report| {
            let matches = same_directory(&report.working_directory, project_dir);
            if !matches {
                tracing::debug!(
                    saved = %report.working_directory.display(),
                    current = %project_dir.display(),
                    "saved report belongs to another project"
                );
            }
            matches
        }))
    }

    /// Remove the whole state directory. Returns `false` if it did not exist.
    pub fn clear(&self) -> Result<bool> {
        remove_path(&self.state_dir)
    }
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
