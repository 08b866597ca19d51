//! Setup pipeline orchestration.
//!
//! Stages run strictly in order and each one gates the next. A stage returns
//! [`StageStatus::Failed`] for expected problems (missing files, missing
//! sections, failing subcommands); the orchestrator records it and stops.
//! Unexpected I/O errors are returned as `Err` and abort the whole run.
//! Nothing is rolled back: files copied or moved before a failure stay put.

mod report;
mod types;

pub use report::print_summary;
pub use types::{SetupError, StageKind, StageStatus};

use anyhow::Result;
use colored::*;
use std::path::PathBuf;

use crate::config::SetupConfig;
use crate::deps::{self, ReconciliationResult};
use crate::exec::Executor;
use crate::layout;
use crate::scripts;
use crate::toolchain::{self, DetectedTool, ProbeOutcome};
use crate::validate;

/// State shared by the stages of one run.
pub struct SetupContext<'a> {
    pub config: &'a SetupConfig,
    pub exec: &'a dyn Executor,
    pub verbose: bool,
    tool: Option<DetectedTool>,
    reconciliation: Option<ReconciliationResult>,
    scripts: Vec<PathBuf>,
}

impl<'a> SetupContext<'a> {
    pub fn new(config: &'a SetupConfig, exec: &'a dyn Executor, verbose: bool) -> Self {
        Self {
            config,
            exec,
            verbose,
            tool: None,
            reconciliation: None,
            scripts: Vec::new(),
        }
    }
}

pub type StageFn = fn(&mut SetupContext<'_>) -> Result<StageStatus>;

/// The pipeline, in execution order. Script emission is last, so it only runs
/// when everything before it passed.
pub const STAGES: [(StageKind, StageFn); 6] = [
    (StageKind::ToolProbe, probe_stage),
    (StageKind::Provision, provision_stage),
    (StageKind::Reconcile, reconcile_stage),
    (StageKind::Layout, layout_stage),
    (StageKind::Validate, validate_stage),
    (StageKind::Scripts, scripts_stage),
];

/// Everything a finished (or halted) run produced.
#[derive(Debug, Default)]
pub struct PipelineReport {
    /// Stages that ran, in order. The last one may be a failure.
    pub stages: Vec<(StageKind, StageStatus)>,
    pub tool: Option<DetectedTool>,
    pub reconciliation: Option<ReconciliationResult>,
    pub scripts: Vec<PathBuf>,
}

impl PipelineReport {
    pub fn is_success(&self) -> bool {
        self.stages.len() == STAGES.len() && self.stages.iter().all(|(_, s)| s.is_passed())
    }

    pub fn failure(&self) -> Option<(StageKind, &SetupError)> {
        self.stages.iter().find_map(|(kind, status)| match status {
            StageStatus::Failed(err) => Some((*kind, err)),
            StageStatus::Passed(_) => None,
        })
    }

    pub fn ran(&self, kind: StageKind) -> bool {
        self.stages.iter().any(|(k, _)| *k == kind)
    }
}

/// Run every stage in order, stopping at the first failure.
pub fn run_pipeline(
    config: &SetupConfig,
    exec: &dyn Executor,
    verbose: bool,
) -> Result<PipelineReport> {
    let mut ctx = SetupContext::new(config, exec, verbose);
    let mut stages = Vec::new();

    for (kind, stage) in STAGES {
        let status = stage(&mut ctx)?;
        let failed = !status.is_passed();
        stages.push((kind, status));
        if failed {
            break;
        }
    }

    Ok(PipelineReport {
        stages,
        tool: ctx.tool,
        reconciliation: ctx.reconciliation,
        scripts: ctx.scripts,
    })
}

fn stage_header(icon: &str, title: &str) {
    println!();
    println!("{} {}", icon.cyan(), title.bold());
}

fn probe_stage(ctx: &mut SetupContext<'_>) -> Result<StageStatus> {
    stage_header("🔍", "Checking arduino-cli...");
    match toolchain::probe_tool(ctx.exec, &ctx.config.cli) {
        ProbeOutcome::Found(tool) => {
            let detail = tool.display_version();
            ctx.tool = Some(tool);
            Ok(StageStatus::Passed(detail))
        }
        ProbeOutcome::NotFound => Ok(StageStatus::Failed(SetupError::ToolNotFound)),
    }
}

fn provision_stage(ctx: &mut SetupContext<'_>) -> Result<StageStatus> {
    stage_header("🔧", "Setting up Arduino environment...");
    let Some(tool) = &ctx.tool else {
        return Ok(StageStatus::Failed(SetupError::ToolNotFound));
    };
    let commands = toolchain::provisioning_commands(&tool.program);
    match toolchain::provision(ctx.exec, &commands, ctx.verbose) {
        Ok(()) => Ok(StageStatus::Passed(format!(
            "{} and {} libraries installed",
            toolchain::PLATFORM,
            toolchain::LIBRARIES.len()
        ))),
        Err(err) => Ok(StageStatus::Failed(err)),
    }
}

fn reconcile_stage(ctx: &mut SetupContext<'_>) -> Result<StageStatus> {
    stage_header("📦", "Copying ArduRemoteID dependencies...");
    let result = deps::reconcile(
        &deps::REQUIRED_FILES,
        &ctx.config.source_root,
        &ctx.config.project_root,
    )?;

    let status = if result.is_complete() {
        StageStatus::Passed(format!(
            "{} copied, {} already present",
            result.copied.len(),
            result.already_present.len()
        ))
    } else {
        println!();
        println!(
            "{} Missing files: {}",
            "x".red(),
            result.missing.join(", ").yellow()
        );
        println!("   Please check ArduRemoteID installation");
        StageStatus::Failed(SetupError::DependencyMissing(result.missing.clone()))
    };

    ctx.reconciliation = Some(result);
    Ok(status)
}

fn layout_stage(ctx: &mut SetupContext<'_>) -> Result<StageStatus> {
    stage_header("📁", "Creating Arduino sketch structure...");
    let report = layout::normalize(&ctx.config.project_root)?;
    Ok(StageStatus::Passed(format!(
        "{} header(s) moved",
        report.moved.len()
    )))
}

fn validate_stage(ctx: &mut SetupContext<'_>) -> Result<StageStatus> {
    stage_header("📋", "Validating configuration...");
    match validate::validate_config(&ctx.config.project_root)? {
        Ok(_) => Ok(StageStatus::Passed(format!(
            "{} sections present",
            validate::REQUIRED_SECTIONS.len()
        ))),
        Err(err) => Ok(StageStatus::Failed(err)),
    }
}

fn scripts_stage(ctx: &mut SetupContext<'_>) -> Result<StageStatus> {
    stage_header("📝", "Creating build scripts...");
    let written = scripts::emit_scripts(ctx.config)?;
    let names: Vec<String> = written
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    ctx.scripts = written;
    Ok(StageStatus::Passed(names.join(", ")))
}
