//! arduino-cli platform and library installation.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsStr;
use std::path::Path;

use super::{LIBRARIES, PLATFORM};
use crate::exec::{CommandSpec, Executor};
use crate::pipeline::SetupError;

/// The fixed provisioning sequence for a given tool.
pub fn provisioning_commands(tool: &OsStr) -> Vec<CommandSpec> {
    let tool = Path::new(tool);
    let mut commands = vec![
        CommandSpec::new(tool).args(["core", "update-index"]),
        CommandSpec::new(tool).args(["core", "install", PLATFORM]),
    ];
    for lib in LIBRARIES {
        commands.push(CommandSpec::new(tool).args(["lib", "install", lib]));
    }
    commands
}

/// Run each command in order, stopping at the first failure.
pub fn provision(
    exec: &dyn Executor,
    commands: &[CommandSpec],
    verbose: bool,
) -> Result<(), SetupError> {
    for spec in commands {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""]));
        }
        pb.set_message(format!("Running: {}", spec));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        let result = exec.run(spec);
        pb.finish_and_clear();

        match result {
            Ok(output) if output.success() => {
                println!("   {} {}", "✓".green(), spec);
                if verbose && !output.stdout.trim().is_empty() {
                    for line in output.stdout.lines() {
                        println!("     {}", line.dimmed());
                    }
                }
            }
            Ok(output) => {
                println!("   {} {}", "x".red(), spec);
                println!("{} Command failed: {}", "x".red(), output.stderr.trim());
                return Err(SetupError::ProvisioningFailed {
                    command: spec.to_string(),
                    stderr: output.stderr,
                });
            }
            Err(e) => {
                println!("   {} {}", "x".red(), spec);
                println!("{} Could not start command: {}", "x".red(), e);
                return Err(SetupError::ProvisioningFailed {
                    command: spec.to_string(),
                    stderr: e.to_string(),
                });
            }
        }
    }
    Ok(())
}
