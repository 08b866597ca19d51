use std::fmt;
use std::path::PathBuf;

/// The six setup stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    ToolProbe,
    Provision,
    Reconcile,
    Layout,
    Validate,
    Scripts,
}

impl StageKind {
    pub fn label(&self) -> &'static str {
        match self {
            StageKind::ToolProbe => "Tool probe",
            StageKind::Provision => "Provisioning",
            StageKind::Reconcile => "Dependencies",
            StageKind::Layout => "Library layout",
            StageKind::Validate => "Configuration",
            StageKind::Scripts => "Build scripts",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a stage that ran to completion without a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageStatus {
    /// Stage succeeded; the string is a short detail for the summary.
    Passed(String),
    Failed(SetupError),
}

impl StageStatus {
    pub fn is_passed(&self) -> bool {
        matches!(self, StageStatus::Passed(_))
    }
}

/// Expected failure conditions. Anything else is a fatal `anyhow::Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// Neither the configured path nor the PATH lookup produced a working tool
    ToolNotFound,
    /// A provisioning subcommand exited non-zero (or could not be spawned)
    ProvisioningFailed { command: String, stderr: String },
    /// Manifest files absent from the source root
    DependencyMissing(Vec<String>),
    ConfigMissing(PathBuf),
    ConfigMalformed { path: PathBuf, reason: String },
    /// Required top-level sections absent from the configuration
    SectionMissing(Vec<String>),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::ToolNotFound => write!(f, "arduino-cli not found"),
            SetupError::ProvisioningFailed { command, stderr } => {
                write!(f, "command failed: {}", command)?;
                if !stderr.trim().is_empty() {
                    write!(f, ": {}", stderr.trim())?;
                }
                Ok(())
            }
            SetupError::DependencyMissing(files) => {
                write!(f, "missing dependency files: {}", files.join(", "))
            }
            SetupError::ConfigMissing(path) => {
                write!(f, "configuration file not found: {}", path.display())
            }
            SetupError::ConfigMalformed { path, reason } => {
                write!(f, "invalid JSON in {}: {}", path.display(), reason)
            }
            SetupError::SectionMissing(sections) => {
                write!(f, "missing configuration sections: {}", sections.join(", "))
            }
        }
    }
}

impl std::error::Error for SetupError {}
