//! ArduRemoteID dependency handling.
//!
//! The firmware builds against a fixed set of headers from a sibling
//! ArduRemoteID checkout. [`reconcile`] copies them into the project tree,
//! never overwriting a file that is already there.

mod reconcile;

pub use reconcile::{ReconciliationResult, reconcile};

/// Headers the firmware needs from ArduRemoteID's `RemoteIDModule`.
pub const REQUIRED_FILES: [&str; 12] = [
    "options.h",
    "version.h",
    "opendroneid.h",
    "mavlink.h",
    "DroneCAN.h",
    "WiFi_TX.h",
    "BLE_TX.h",
    "parameters.h",
    "webinterface.h",
    "check_firmware.h",
    "efuse.h",
    "led.h",
];
