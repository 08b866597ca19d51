//! # ondocean-setup CLI Entry Point
//!
//! Runs the full setup pipeline. Every flag is optional; with none given the
//! configuration comes from `ondocean-setup.toml` (if present) or the built-in
//! ESP32-S3 defaults.
//!
//! Exit status is 0 when every stage passed and 1 otherwise.

use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;

use ondocean_setup::config::{Overrides, SetupConfig};
use ondocean_setup::exec::SystemExecutor;
use ondocean_setup::pipeline;

#[cfg(windows)]
#[link(name = "kernel32")]
unsafe extern "system" {
    fn SetConsoleOutputCP(wCodePageID: u32) -> i32;
}

#[cfg(windows)]
fn enable_windows_utf8_console() {
    unsafe {
        SetConsoleOutputCP(65001);
    }
}

#[cfg(not(windows))]
fn enable_windows_utf8_console() {}

#[derive(Parser)]
#[command(name = "ondocean-setup")]
#[command(about = "OndOcean RemoteID Maritime development environment setup", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct Cli {
    /// Path to the arduino-cli executable
    #[arg(long)]
    cli: Option<PathBuf>,
    /// ArduRemoteID RemoteIDModule directory to copy dependencies from
    #[arg(long)]
    source_root: Option<PathBuf>,
    /// OndOcean RemoteID project directory
    #[arg(long)]
    project_root: Option<PathBuf>,
    /// Board id within the esp32:esp32 platform (e.g. esp32s3)
    #[arg(long)]
    board: Option<String>,
    /// Setup configuration file [default: ./ondocean-setup.toml if present]
    #[arg(long)]
    config: Option<PathBuf>,
    /// Show arduino-cli output for each provisioning command
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: Cli) -> Result<bool> {
    let overrides = Overrides {
        cli: cli.cli,
        source_root: cli.source_root,
        project_root: cli.project_root,
        board: cli.board,
    };
    let config = SetupConfig::load(cli.config.as_deref(), overrides)?;

    println!("{}", "OndOcean RemoteID Development Setup".bold());
    println!("{}", "═".repeat(50).dimmed());
    println!("{} Project: {}", "→".dimmed(), config.project_root.display());
    println!("{} ArduRemoteID: {}", "→".dimmed(), config.source_root.display());
    println!("{} Board: {}", "→".dimmed(), config.board.base_fqbn().cyan());

    let report = pipeline::run_pipeline(&config, &SystemExecutor, cli.verbose)?;
    pipeline::print_summary(&report, &config);
    Ok(report.is_success())
}

fn main() -> ExitCode {
    enable_windows_utf8_console();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {:#}", "x".red(), e);
            ExitCode::FAILURE
        }
    }
}
