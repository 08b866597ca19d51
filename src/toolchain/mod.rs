//! arduino-cli detection and provisioning
//!
//! The build tool itself is an external collaborator: this module only checks
//! that it answers `version` and then drives its package-management
//! subcommands to install the ESP32 platform and the libraries the firmware needs.

pub mod probe;
pub mod provision;
pub mod types;

pub use probe::probe_tool;
pub use provision::{provision, provisioning_commands};
pub use types::{DetectedTool, ProbeOutcome};

/// Board platform installed by `core install`.
pub const PLATFORM: &str = "esp32:esp32";

/// Libraries installed by `lib install`, in order.
pub const LIBRARIES: [&str; 3] = ["ArduinoJson", "PubSubClient", "WiFi"];
