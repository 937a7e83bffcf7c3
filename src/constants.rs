//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and version information.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Kanboard";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "kanboard";

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "Kanboard";

/// Label of the single group derived when a delivery has no column axis.
pub const ALL_GROUP_LABEL: &str = "(All)";
