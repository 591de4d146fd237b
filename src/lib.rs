//! Foundation Installer Library
//!
//! This library provides:
//! - A typed publish/subscribe relay for installer events
//! - Shared folder path normalization and file naming
//! - The installation engine writing the bootstrap files
//! - The three-step setup wizard and its terminal rendering
//! - Configuration and logging setup

pub mod config;
pub mod installer;
pub mod logging;
pub mod paths;
pub mod relay;
pub mod templates;
pub mod ui;
pub mod wizard;
