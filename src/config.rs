use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given.
pub const LOCAL_CONFIG_FILE: &str = "ondocean-setup.toml";

/// Bare command name used for the PATH fallback and as the default tool.
pub const DEFAULT_CLI: &str = "arduino-cli";

/// Full setup configuration. Built once in `main`, then only borrowed.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SetupConfig {
    /// Path (or bare name) of the arduino-cli executable.
    pub cli: PathBuf,
    /// ArduRemoteID `RemoteIDModule` checkout providing the manifest files.
    pub source_root: PathBuf,
    /// OndOcean RemoteID project directory.
    pub project_root: PathBuf,
    pub board: BoardConfig,
    pub scripts: ScriptFlavor,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Board id inside the `esp32:esp32` platform (e.g. `esp32s3`).
    pub board: String,
    pub flash_size: String,
    pub psram: String,
    pub cpu_freq_mhz: u32,
    pub flash_freq_mhz: u32,
    pub partition_scheme: String,
    pub sketch: String,
    pub monitor_baud: u32,
}

/// Which script syntax the emitter writes.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFlavor {
    /// `compile.bat` / `upload.bat`
    Batch,
    /// `compile.sh` / `upload.sh`
    Shell,
}

impl Default for ScriptFlavor {
    fn default() -> Self {
        if cfg!(windows) {
            ScriptFlavor::Batch
        } else {
            ScriptFlavor::Shell
        }
    }
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            cli: PathBuf::from(DEFAULT_CLI),
            source_root: PathBuf::from("../ArduRemoteID/RemoteIDModule"),
            project_root: PathBuf::from("."),
            board: BoardConfig::default(),
            scripts: ScriptFlavor::default(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            board: "esp32s3".to_string(),
            flash_size: "16M".to_string(),
            psram: "enabled".to_string(),
            cpu_freq_mhz: 240,
            flash_freq_mhz: 80,
            partition_scheme: "app3M_fat9M_fact512k_16MB".to_string(),
            sketch: "OndOceanRemoteID.ino".to_string(),
            monitor_baud: 115200,
        }
    }
}

impl BoardConfig {
    /// Fully qualified board name with all compile-time board options.
    pub fn compile_fqbn(&self) -> String {
        format!(
            "{}:CDCOnBoot=cdc,CPUFreq={},FlashFreq={},FlashMode=qio,FlashSize={},LoopCore=1,EventsCore=1,USBMode=hwcdc,WDT=enable,PartitionScheme={},PSRAM={}",
            self.base_fqbn(),
            self.cpu_freq_mhz,
            self.flash_freq_mhz,
            self.flash_size,
            self.partition_scheme,
            self.psram
        )
    }

    /// Board name without options, as used for upload.
    pub fn base_fqbn(&self) -> String {
        format!("{}:{}", crate::toolchain::PLATFORM, self.board)
    }
}

/// Overrides coming from the command line. `None` keeps the file/default value.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub cli: Option<PathBuf>,
    pub source_root: Option<PathBuf>,
    pub project_root: Option<PathBuf>,
    pub board: Option<String>,
}

impl SetupConfig {
    /// Parse a config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: SetupConfig = toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse {} - check for syntax errors or unknown keys",
                path.display()
            )
        })?;
        Ok(config.expand_home())
    }

    /// Resolve the layered configuration: explicit file, local file, user file, defaults;
    /// then command-line overrides on top.
    pub fn load(explicit: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let base = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match discover_config_file() {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        Ok(base.apply(overrides))
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(cli) = overrides.cli {
            self.cli = cli;
        }
        if let Some(source) = overrides.source_root {
            self.source_root = source;
        }
        if let Some(project) = overrides.project_root {
            self.project_root = project;
        }
        if let Some(board) = overrides.board {
            self.board.board = board;
        }
        self.expand_home()
    }

    fn expand_home(mut self) -> Self {
        self.cli = expand_tilde(&self.cli);
        self.source_root = expand_tilde(&self.source_root);
        self.project_root = expand_tilde(&self.project_root);
        self
    }
}

fn discover_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|d| d.join("ondocean-setup").join("config.toml"))
        .filter(|p| p.exists())
}

fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_esp32s3_board() {
        let config = SetupConfig::default();
        assert_eq!(config.cli, PathBuf::from("arduino-cli"));
        assert_eq!(config.board.board, "esp32s3");
        assert_eq!(config.board.cpu_freq_mhz, 240);
        assert_eq!(config.board.partition_scheme, "app3M_fat9M_fact512k_16MB");
    }

    #[test]
    fn test_compile_fqbn() {
        let fqbn = BoardConfig::default().compile_fqbn();
        assert_eq!(
            fqbn,
            "esp32:esp32:esp32s3:CDCOnBoot=cdc,CPUFreq=240,FlashFreq=80,FlashMode=qio,FlashSize=16M,LoopCore=1,EventsCore=1,USBMode=hwcdc,WDT=enable,PartitionScheme=app3M_fat9M_fact512k_16MB,PSRAM=enabled"
        );
        assert_eq!(BoardConfig::default().base_fqbn(), "esp32:esp32:esp32s3");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: SetupConfig = toml::from_str(
            r#"
cli = "/opt/arduino/arduino-cli"
scripts = "batch"

[board]
flash_size = "8M"
"#,
        )
        .unwrap();
        assert_eq!(config.cli, PathBuf::from("/opt/arduino/arduino-cli"));
        assert_eq!(config.scripts, ScriptFlavor::Batch);
        assert_eq!(config.board.flash_size, "8M");
        assert_eq!(config.board.board, "esp32s3");
        assert_eq!(config.project_root, PathBuf::from("."));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let parsed = toml::from_str::<SetupConfig>("compiler = \"gcc\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = SetupConfig::default().apply(Overrides {
            cli: Some(PathBuf::from("/usr/local/bin/arduino-cli")),
            board: Some("esp32c3".to_string()),
            ..Default::default()
        });
        assert_eq!(config.cli, PathBuf::from("/usr/local/bin/arduino-cli"));
        assert_eq!(config.board.board, "esp32c3");
        assert_eq!(
            config.source_root,
            PathBuf::from("../ArduRemoteID/RemoteIDModule")
        );
    }

    #[test]
    fn test_from_file_reports_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[board\n").unwrap();
        let err = SetupConfig::from_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.toml"));
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde(Path::new("src/lib")), PathBuf::from("src/lib"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/tools")), home.join("tools"));
        }
    }
}
