//! Compile and upload script generation.
//!
//! The scripts are plain text with the tool path, board name and sketch baked
//! in. Nothing here validates those values; whatever the configuration says
//! ends up on the command line.
//!
//! ## Flavors
//!
//! - `batch` - `compile.bat` / `upload.bat` for Windows `cmd`
//! - `shell` - `compile.sh` / `upload.sh` for POSIX shells

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ScriptFlavor, SetupConfig};

impl ScriptFlavor {
    pub fn compile_file(&self) -> &'static str {
        match self {
            ScriptFlavor::Batch => "compile.bat",
            ScriptFlavor::Shell => "compile.sh",
        }
    }

    pub fn upload_file(&self) -> &'static str {
        match self {
            ScriptFlavor::Batch => "upload.bat",
            ScriptFlavor::Shell => "upload.sh",
        }
    }
}

pub fn render_compile_script(config: &SetupConfig) -> String {
    let cli = config.cli.display();
    let fqbn = config.board.compile_fqbn();
    let sketch = &config.board.sketch;
    match config.scripts {
        ScriptFlavor::Batch => format!(
            r#"@echo off
REM OndOcean RemoteID Compilation Script

echo Compiling OndOcean RemoteID for ESP32-S3...

"{cli}" compile ^
    --fqbn {fqbn} ^
    --output-dir build ^
    --verbose ^
    {sketch}

if %ERRORLEVEL% EQU 0 (
    echo Compilation successful!
    echo Binary location: build\{sketch}.bin
) else (
    echo Compilation failed!
    exit /b 1
)
"#
        ),
        ScriptFlavor::Shell => format!(
            r#"#!/bin/sh
# OndOcean RemoteID Compilation Script

echo "Compiling OndOcean RemoteID for ESP32-S3..."

if "{cli}" compile \
    --fqbn {fqbn} \
    --output-dir build \
    --verbose \
    {sketch}
then
    echo "Compilation successful!"
    echo "Binary location: build/{sketch}.bin"
else
    echo "Compilation failed!"
    exit 1
fi
"#
        ),
    }
}

pub fn render_upload_script(config: &SetupConfig) -> String {
    let cli = config.cli.display();
    let fqbn = config.board.base_fqbn();
    let baud = config.board.monitor_baud;
    match config.scripts {
        ScriptFlavor::Batch => format!(
            r#"@echo off
REM OndOcean RemoteID Upload Script

set /p COM_PORT="Enter COM port (e.g., COM3): "

echo Uploading to ESP32-S3 on %COM_PORT%...

"{cli}" upload ^
    --fqbn {fqbn} ^
    --port %COM_PORT% ^
    --input-dir build ^
    --verbose

if %ERRORLEVEL% EQU 0 (
    echo Upload successful!
    echo Opening serial monitor...
    "{cli}" monitor --port %COM_PORT% --config baudrate={baud}
) else (
    echo Upload failed!
    exit /b 1
)
"#
        ),
        ScriptFlavor::Shell => format!(
            r#"#!/bin/sh
# OndOcean RemoteID Upload Script

PORT="$1"
if [ -z "$PORT" ]; then
    printf "Enter serial port (e.g., /dev/ttyACM0): "
    read -r PORT
fi

echo "Uploading to ESP32-S3 on $PORT..."

if "{cli}" upload \
    --fqbn {fqbn} \
    --port "$PORT" \
    --input-dir build \
    --verbose
then
    echo "Upload successful!"
    echo "Opening serial monitor..."
    "{cli}" monitor --port "$PORT" --config baudrate={baud}
else
    echo "Upload failed!"
    exit 1
fi
"#
        ),
    }
}

/// Write both scripts into the project root, replacing existing ones.
pub fn emit_scripts(config: &SetupConfig) -> Result<Vec<PathBuf>> {
    let root = &config.project_root;
    let compile = root.join(config.scripts.compile_file());
    let upload = root.join(config.scripts.upload_file());

    write_script(&compile, &render_compile_script(config))?;
    println!("{} Compilation script created: {}", "✓".green(), compile.display());
    write_script(&upload, &render_upload_script(config))?;
    println!("{} Upload script created: {}", "✓".green(), upload.display());

    Ok(vec![compile, upload])
}

fn write_script(path: &Path, body: &str) -> Result<()> {
    fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))?;

    #[cfg(unix)]
    if path.extension().is_some_and(|e| e == "sh") {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to make {} executable", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(flavor: ScriptFlavor) -> SetupConfig {
        SetupConfig {
            cli: PathBuf::from("/opt/arduino/arduino-cli"),
            scripts: flavor,
            ..Default::default()
        }
    }

    #[test]
    fn test_batch_compile_script() {
        let script = render_compile_script(&config(ScriptFlavor::Batch));
        assert!(script.starts_with("@echo off"));
        assert!(script.contains("\"/opt/arduino/arduino-cli\" compile ^"));
        assert!(script.contains("--fqbn esp32:esp32:esp32s3:CDCOnBoot=cdc,CPUFreq=240"));
        assert!(script.contains("PartitionScheme=app3M_fat9M_fact512k_16MB,PSRAM=enabled"));
        assert!(script.contains("build\\OndOceanRemoteID.ino.bin"));
    }

    #[test]
    fn test_shell_upload_script() {
        let script = render_upload_script(&config(ScriptFlavor::Shell));
        assert!(script.starts_with("#!/bin/sh"));
        assert!(script.contains("--fqbn esp32:esp32:esp32s3 \\"));
        assert!(script.contains("--config baudrate=115200"));
    }

    #[test]
    fn test_board_override_flows_into_scripts() {
        let mut cfg = config(ScriptFlavor::Batch);
        cfg.board.board = "esp32c3".to_string();
        cfg.board.flash_size = "4M".to_string();
        let compile = render_compile_script(&cfg);
        let upload = render_upload_script(&cfg);
        assert!(compile.contains("esp32:esp32:esp32c3:"));
        assert!(compile.contains("FlashSize=4M"));
        assert!(upload.contains("--fqbn esp32:esp32:esp32c3 ^"));
    }

    #[test]
    fn test_emit_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(ScriptFlavor::Shell);
        cfg.project_root = dir.path().to_path_buf();
        fs::write(dir.path().join("compile.sh"), "old").unwrap();

        let written = emit_scripts(&cfg).unwrap();
        assert_eq!(
            written,
            vec![dir.path().join("compile.sh"), dir.path().join("upload.sh")]
        );
        for path in &written {
            let body = fs::read_to_string(path).unwrap();
            assert!(body.contains("esp32s3"));
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(dir.path().join("upload.sh"))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }
}
