//! Testing utilities for rofi-search
//!
//! Fixtures shared by the unit tests: a fake `$PATH` lookup and a helper
//! writing configuration files into a temporary directory.
//!
//! Only available when compiled with `cfg(test)`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Install check answering yes only for the given executables
///
/// # Examples
/// ```ignore
/// let installed = installed_only(&["firefox"]);
/// assert!(installed.is_installed("firefox"));
/// assert!(!installed.is_installed("chromium"));
/// ```
#[must_use]
pub fn installed_only(executables: &[&str]) -> impl Fn(&str) -> bool + use<> {
    let executables: HashSet<String> = executables.iter().map(|e| (*e).to_string()).collect();
    move |executable: &str| executables.contains(executable)
}

/// Write a configuration file named `name` into `dir`
///
/// # Panics
/// Panics if the file cannot be written.
pub fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test configuration");
    path
}
