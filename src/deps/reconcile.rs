use anyhow::{Context, Result};
use colored::*;
use std::fs::{self, File};
use std::io;
use std::path::Path;

/// Outcome of one reconciliation pass, each list in manifest order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconciliationResult {
    pub copied: Vec<String>,
    pub already_present: Vec<String>,
    pub missing: Vec<String>,
}

impl ReconciliationResult {
    /// Every manifest file is now at the destination.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Files that exist at the destination after this pass.
    pub fn handled(&self) -> impl Iterator<Item = &String> {
        self.copied.iter().chain(self.already_present.iter())
    }
}

/// Copy each manifest file from `source_root` into `dest_root` unless it is
/// already there. The full manifest is always processed; absent sources are
/// collected in `missing` rather than aborting.
///
/// I/O errors while copying are fatal and returned as `Err`.
pub fn reconcile(
    manifest: &[&str],
    source_root: &Path,
    dest_root: &Path,
) -> Result<ReconciliationResult> {
    let mut result = ReconciliationResult::default();

    if !source_root.is_dir() {
        println!(
            "{} ArduRemoteID path not found: {}",
            "x".red(),
            source_root.display()
        );
    }

    for &name in manifest {
        let src = source_root.join(name);
        let dst = dest_root.join(name);

        if !src.is_file() {
            println!("   {} Missing: {}", "x".red(), name);
            result.missing.push(name.to_string());
        } else if dst.exists() {
            println!("   {} Already exists: {}", "⚡".yellow(), name);
            result.already_present.push(name.to_string());
        } else {
            copy_preserving_mtime(&src, &dst).with_context(|| {
                format!("Failed to copy {} to {}", src.display(), dst.display())
            })?;
            println!("   {} Copied: {}", "+".green(), name);
            result.copied.push(name.to_string());
        }
    }

    Ok(result)
}

// Permissions are applied last so a read-only source never blocks setting the mtime
fn copy_preserving_mtime(src: &Path, dst: &Path) -> Result<()> {
    let meta = fs::metadata(src)?;
    let mut out = File::create(dst)?;
    io::copy(&mut File::open(src)?, &mut out)?;
    out.set_modified(meta.modified()?)?;
    drop(out);
    fs::set_permissions(dst, meta.permissions())?;
    Ok(())
}
