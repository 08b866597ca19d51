use semver::Version;
use std::ffi::OsString;

/// What the tool probe found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Found(DetectedTool),
    NotFound,
}

/// A working arduino-cli executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedTool {
    /// Program that answered `version`; used for every later command.
    pub program: OsString,
    /// Trimmed stdout of `version`.
    pub version_output: String,
    /// Semantic version extracted from the output, if one could be parsed.
    pub version: Option<Version>,
    /// True when the configured path failed and the bare-name lookup succeeded.
    pub from_path_lookup: bool,
}

impl DetectedTool {
    /// Short version text for display.
    pub fn display_version(&self) -> String {
        match &self.version {
            Some(v) => format!("v{}", v),
            None => self
                .version_output
                .lines()
                .next()
                .unwrap_or("unknown version")
                .to_string(),
        }
    }
}
