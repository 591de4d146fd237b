//! Path Normalization and Centralized Path Definitions
//!
//! User-supplied folder paths are normalized here before the installer ever
//! touches them. File names and host directory conventions also live in this
//! module so they are not scattered across the codebase.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Names of the files the installer writes
pub mod files {
    /// User-owned startup file living in the shared folder
    pub const SHARED_SETUP: &str = "sharedUserSetup.py";

    /// Host's per-user startup file
    pub const USER_SETUP: &str = "userSetup.py";

    /// Installer-owned bootstrap module, regenerated on every install
    pub const BOOT: &str = "foundationBoot.py";

    /// Module name of [`BOOT`], as imported from the user setup file
    pub const BOOT_MODULE: &str = "foundationBoot";
}

/// A folder path that has been trimmed, uses forward slashes only, and ends
/// in exactly one separator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of `file_name` inside this folder
    ///
    /// Built by string concatenation so the forward-slash form survives on
    /// every platform.
    pub fn join_file(&self, file_name: &str) -> PathBuf {
        PathBuf::from(format!("{}{}", self.0, file_name))
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// True for empty or whitespace-only input
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Normalize a raw folder path
///
/// No existence check happens here. Whether the folder is usable is only
/// known at install time.
pub fn normalize(raw: &str) -> NormalizedPath {
    let forward = raw.trim().replace('\\', "/");
    let mut path = forward.trim_end_matches('/').to_string();
    path.push('/');
    NormalizedPath(path)
}

/// Host application script directory conventions
pub mod host {
    use std::path::PathBuf;

    /// Version-independent per-user script directory the host scans on startup
    ///
    /// - Windows: `Documents/maya/scripts`
    /// - macOS: `~/Library/Preferences/Autodesk/maya/scripts`
    /// - Linux and others: `~/maya/scripts`
    pub fn default_user_script_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            return dirs::document_dir().map(|d| d.join("maya").join("scripts"));
        }

        #[cfg(target_os = "macos")]
        {
            return dirs::home_dir().map(|h| {
                h.join("Library")
                    .join("Preferences")
                    .join("Autodesk")
                    .join("maya")
                    .join("scripts")
            });
        }

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            dirs::home_dir().map(|h| h.join("maya").join("scripts"))
        }
    }
}
