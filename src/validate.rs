//! `maritime_config.json` checks.
//!
//! Only the presence of the required top-level sections is verified; what is
//! inside each section belongs to the firmware.

use anyhow::{Context, Result};
use colored::*;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::pipeline::SetupError;

pub const CONFIG_FILE: &str = "maritime_config.json";

pub const REQUIRED_SECTIONS: [&str; 4] = ["device", "gnss", "mqtt", "maritime"];

/// Parsed maritime configuration: a JSON object, otherwise unconstrained.
#[derive(Debug, Clone, PartialEq)]
pub struct MaritimeConfig {
    sections: Map<String, Value>,
}

impl MaritimeConfig {
    /// Parse raw file contents; invalid UTF-8 is reported like any other syntax error.
    pub fn parse(path: &Path, bytes: &[u8]) -> Result<Self, SetupError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| SetupError::ConfigMalformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        match value {
            Value::Object(sections) => Ok(Self { sections }),
            other => Err(SetupError::ConfigMalformed {
                path: path.to_path_buf(),
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Presence of each required section, in order.
    pub fn section_report(&self) -> Vec<(&'static str, bool)> {
        REQUIRED_SECTIONS
            .iter()
            .map(|&name| (name, self.has_section(name)))
            .collect()
    }
}

pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE)
}

/// Load and check the project's maritime configuration.
///
/// The outer `Result` carries fatal I/O errors (e.g. permissions); the inner one
/// the expected failure conditions.
pub fn validate_config(project_root: &Path) -> Result<Result<MaritimeConfig, SetupError>> {
    let path = config_path(project_root);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            println!("{} Configuration file not found: {}", "x".red(), path.display());
            return Ok(Err(SetupError::ConfigMissing(path)));
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };

    let config = match MaritimeConfig::parse(&path, &bytes) {
        Ok(config) => config,
        Err(err) => {
            println!("{} {}", "x".red(), err);
            return Ok(Err(err));
        }
    };

    let mut missing = Vec::new();
    for (name, present) in config.section_report() {
        if present {
            println!("   {} Configuration section found: {}", "✓".green(), name);
        } else {
            println!("   {} Missing configuration section: {}", "x".red(), name);
            missing.push(name.to_string());
        }
    }

    if missing.is_empty() {
        Ok(Ok(config))
    } else {
        Ok(Err(SetupError::SectionMissing(missing)))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
