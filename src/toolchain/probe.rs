//! arduino-cli detection.
//!
//! Tries the configured executable first, then the bare `arduino-cli` name
//! resolved through PATH. Nothing on disk is touched.

use colored::*;
use regex::Regex;
use semver::Version;
use std::path::Path;

use super::types::{DetectedTool, ProbeOutcome};
use crate::config::DEFAULT_CLI;
use crate::exec::{CommandSpec, Executor};

pub const INSTALL_URL: &str = "https://arduino.github.io/arduino-cli/";

/// Probe for a working arduino-cli.
pub fn probe_tool(exec: &dyn Executor, configured: &Path) -> ProbeOutcome {
    if let Some(tool) = try_version(exec, configured, false) {
        println!(
            "{} arduino-cli found: {}",
            "✓".green(),
            tool.version_output.cyan()
        );
        return ProbeOutcome::Found(tool);
    }

    // Retrying the identical command would only repeat the same failure
    if configured != Path::new(DEFAULT_CLI) {
        println!(
            "{} {} not usable, trying {} from PATH...",
            "!".yellow(),
            configured.display(),
            DEFAULT_CLI
        );
        if let Some(tool) = try_version(exec, Path::new(DEFAULT_CLI), true) {
            println!(
                "{} arduino-cli found in PATH: {}",
                "✓".green(),
                tool.version_output.cyan()
            );
            return ProbeOutcome::Found(tool);
        }
    }

    println!("{} arduino-cli not found", "x".red());
    println!("   Install from: {}", INSTALL_URL.yellow());
    #[cfg(windows)]
    println!("   or: {}", "winget install Arduino.Arduino-CLI".yellow());
    #[cfg(not(windows))]
    println!("   or: {}", "brew install arduino-cli".yellow());
    ProbeOutcome::NotFound
}

fn try_version(
    exec: &dyn Executor,
    program: &Path,
    from_path_lookup: bool,
) -> Option<DetectedTool> {
    let spec = CommandSpec::new(program).arg("version");
    let output = exec.run(&spec).ok().filter(|o| o.success())?;
    let version_output = output.stdout.trim().to_string();
    Some(DetectedTool {
        program: spec.program,
        version: parse_version(&version_output),
        version_output,
        from_path_lookup,
    })
}

/// Pull the first `x.y.z` token out of `arduino-cli version` output.
pub fn parse_version(output: &str) -> Option<Version> {
    let re = Regex::new(r"\b(\d+\.\d+\.\d+(?:-[0-9A-Za-z.]+)?)\b").ok()?;
    let token = re.captures(output)?.get(1)?.as_str();
    Version::parse(token).ok()
}
