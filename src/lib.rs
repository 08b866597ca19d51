//! # ondocean-setup - Development Environment Setup
//!
//! Prepares an ESP32-S3 development environment for the OndOcean maritime
//! RemoteID firmware, which builds on top of a sibling ArduRemoteID checkout.
//!
//! ## Pipeline
//!
//! 1. Check that `arduino-cli` is reachable
//! 2. Install the `esp32:esp32` platform and required libraries
//! 3. Copy the ArduRemoteID headers the firmware depends on
//! 4. Build the `libraries/OndOceanMaritime` layout
//! 5. Validate `maritime_config.json`
//! 6. Generate compile and upload scripts
//!
//! ## Module Organization
//!
//! - [`pipeline`] - Stage ordering, results and the final summary
//! - [`config`] - Setup configuration (`ondocean-setup.toml`)
//! - [`toolchain`] - arduino-cli probe and provisioning
//! - [`deps`] - ArduRemoteID file reconciliation

/// Setup configuration and board parameters.
pub mod config;

/// ArduRemoteID dependency reconciliation.
pub mod deps;

/// External process execution.
pub mod exec;

/// Arduino library layout.
pub mod layout;

/// Stage orchestration and reporting.
pub mod pipeline;

/// Build script generation.
pub mod scripts;

/// arduino-cli detection and provisioning.
pub mod toolchain;

/// Terminal UI utilities.
pub mod ui;

/// Maritime configuration validation.
pub mod validate;
