//! Arduino library layout for the maritime headers.
//!
//! Creates `libraries/OndOceanMaritime/`, (re)writes its `library.properties`
//! and moves the maritime headers from the project root into it.

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

pub const LIBRARIES_DIR: &str = "libraries";
pub const LIBRARY_NAME: &str = "OndOceanMaritime";
pub const DESCRIPTOR_FILE: &str = "library.properties";

/// Headers relocated from the project root into the library.
pub const RELOCATED_FILES: [&str; 2] = ["maritime_sensors.h", "ondocean_mqtt.h"];

pub const LIBRARY_PROPERTIES: &str = "name=OndOcean Maritime
version=1.0.0
author=OndOcean Team
maintainer=OndOcean <contact@ondocean.com>
sentence=Maritime adaptations for RemoteID
paragraph=Environmental sensors, MQTT telemetry, and maritime-specific features
category=Communication
url=https://github.com/ondocean/maritime-remoteid
architectures=esp32
includes=maritime_sensors.h,ondocean_mqtt.h
";

/// What a normalization pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutReport {
    pub library_dir: PathBuf,
    pub moved: Vec<String>,
}

pub fn library_dir(project_root: &Path) -> PathBuf {
    project_root.join(LIBRARIES_DIR).join(LIBRARY_NAME)
}

/// Build the library layout. Only I/O errors fail; absent headers are skipped.
pub fn normalize(project_root: &Path) -> Result<LayoutReport> {
    let lib_dir = library_dir(project_root);
    fs::create_dir_all(&lib_dir)
        .with_context(|| format!("Failed to create {}", lib_dir.display()))?;

    // Generated content, so always rewritten
    let descriptor = lib_dir.join(DESCRIPTOR_FILE);
    fs::write(&descriptor, LIBRARY_PROPERTIES)
        .with_context(|| format!("Failed to write {}", descriptor.display()))?;
    println!("   {} Wrote {}", "+".green(), descriptor.display());

    let mut moved = Vec::new();
    for name in RELOCATED_FILES {
        let src = project_root.join(name);
        if !src.is_file() {
            continue;
        }
        let dst = lib_dir.join(name);
        fs::rename(&src, &dst)
            .with_context(|| format!("Failed to move {} to {}", src.display(), dst.display()))?;
        println!("   {} Moved {} to library", "→".cyan(), name);
        moved.push(name.to_string());
    }

    println!("{} Arduino sketch structure created", "✓".green());
    Ok(LayoutReport {
        library_dir: lib_dir,
        moved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn snapshot(root: &Path) -> BTreeMap<PathBuf, Option<String>> {
        let mut out = BTreeMap::new();
        let mut stack = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                let rel = path.strip_prefix(root).unwrap().to_path_buf();
                if path.is_dir() {
                    stack.push(path);
                    out.insert(rel, None);
                } else {
                    out.insert(rel, Some(fs::read_to_string(&path).unwrap()));
                }
            }
        }
        out
    }

    #[test]
    fn test_creates_library_and_moves_headers() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("maritime_sensors.h"), "// sensors\n").unwrap();
        fs::write(project.path().join("ondocean_mqtt.h"), "// mqtt\n").unwrap();

        let report = normalize(project.path()).unwrap();
        let lib = library_dir(project.path());
        assert_eq!(report.library_dir, lib);
        assert_eq!(report.moved, vec!["maritime_sensors.h", "ondocean_mqtt.h"]);
        assert!(!project.path().join("maritime_sensors.h").exists());
        assert_eq!(
            fs::read_to_string(lib.join("ondocean_mqtt.h")).unwrap(),
            "// mqtt\n"
        );
        assert_eq!(
            fs::read_to_string(lib.join(DESCRIPTOR_FILE)).unwrap(),
            LIBRARY_PROPERTIES
        );
    }

    #[test]
    fn test_absent_headers_are_not_an_error() {
        let project = TempDir::new().unwrap();
        let report = normalize(project.path()).unwrap();
        assert!(report.moved.is_empty());
        assert!(report.library_dir.join(DESCRIPTOR_FILE).is_file());
    }

    #[test]
    fn test_descriptor_is_overwritten() {
        let project = TempDir::new().unwrap();
        let lib = library_dir(project.path());
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join(DESCRIPTOR_FILE), "name=stale\n").unwrap();

        normalize(project.path()).unwrap();
        assert_eq!(
            fs::read_to_string(lib.join(DESCRIPTOR_FILE)).unwrap(),
            LIBRARY_PROPERTIES
        );
    }

    #[test]
    fn test_second_run_yields_same_state() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("maritime_sensors.h"), "// sensors\n").unwrap();

        normalize(project.path()).unwrap();
        let first = snapshot(project.path());
        let second_report = normalize(project.path()).unwrap();
        let second = snapshot(project.path());

        assert!(second_report.moved.is_empty());
        assert_eq!(first, second);
    }
}
