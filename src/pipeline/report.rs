use colored::*;

use super::{PipelineReport, STAGES, SetupError, StageStatus};
use crate::config::SetupConfig;
use crate::toolchain::probe::INSTALL_URL;
use crate::ui::Table;
use crate::validate;

/// Print the stage table followed by next steps or resolution guidance.
pub fn print_summary(report: &PipelineReport, config: &SetupConfig) {
    println!();
    println!("{}", "═".repeat(50).dimmed());

    let mut table = Table::new(&["Stage", "Status", "Detail"]);
    for (kind, _) in STAGES {
        let row = match report.stages.iter().find(|(k, _)| *k == kind) {
            Some((_, StageStatus::Passed(detail))) => {
                vec![kind.to_string(), "✓".green().to_string(), detail.clone()]
            }
            Some((_, StageStatus::Failed(err))) => {
                vec![kind.to_string(), "x".red().to_string(), err.to_string()]
            }
            None => vec![
                kind.to_string(),
                "-".dimmed().to_string(),
                "skipped".dimmed().to_string(),
            ],
        };
        table.add_row(row);
    }
    table.print();
    println!();

    match report.failure() {
        None => {
            println!("{} Development environment setup complete!", "✓".green());
            println!();
            println!("{}", "Next steps:".bold());
            for (i, step) in next_steps(config).iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
        }
        Some((kind, err)) => {
            println!(
                "{} Setup failed at {}. Please resolve the errors above.",
                "x".red(),
                kind.label().bold()
            );
            for hint in guidance(err, config) {
                println!("   {}", hint);
            }
        }
    }
}

pub(crate) fn next_steps(config: &SetupConfig) -> Vec<String> {
    let run = |file: &str| {
        if cfg!(windows) {
            file.to_string()
        } else {
            format!("./{}", file)
        }
    };
    vec![
        "Connect ESP32-S3 via USB".to_string(),
        format!("Run: {}", run(config.scripts.compile_file()).yellow()),
        format!("Run: {}", run(config.scripts.upload_file()).yellow()),
        "Monitor serial output".to_string(),
    ]
}

/// Actionable text for each failure kind.
pub(crate) fn guidance(err: &SetupError, config: &SetupConfig) -> Vec<String> {
    match err {
        SetupError::ToolNotFound => vec![
            format!("Install arduino-cli from {}", INSTALL_URL.yellow()),
            format!(
                "or point {} at it (currently {}).",
                "--cli".cyan(),
                config.cli.display()
            ),
        ],
        SetupError::ProvisioningFailed { command, .. } => vec![
            "Re-run the failing command manually to see the full output:".to_string(),
            format!("  {}", command.yellow()),
        ],
        SetupError::DependencyMissing(files) => {
            let mut hints = vec![format!(
                "These files were not found in {}:",
                config.source_root.display()
            )];
            hints.extend(files.iter().map(|f| format!("  - {}", f.yellow())));
            hints.push(format!(
                "Check the ArduRemoteID checkout or pass {}.",
                "--source-root".cyan()
            ));
            hints
        }
        SetupError::ConfigMissing(path) => vec![
            format!("Create {} with the sections:", path.display()),
            format!("  {}", validate::REQUIRED_SECTIONS.join(", ").yellow()),
        ],
        SetupError::ConfigMalformed { path, .. } => {
            vec![format!("Fix the JSON syntax in {}.", path.display())]
        }
        SetupError::SectionMissing(sections) => vec![format!(
            "Add the missing top-level section(s) to {}: {}",
            validate::CONFIG_FILE,
            sections.join(", ").yellow()
        )],
    }
}
