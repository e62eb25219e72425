//! Lookups into the surrounding system
//!
//! Everything the launcher asks the machine about goes through this module:
//! environment variables, whether an executable is on `$PATH`, and the
//! table of locales. Each lookup sits behind a small trait so the
//! configuration and menu logic can be exercised without touching the host.

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Language used when neither the configuration nor `$LANG` gives one
pub const DEFAULT_LANGUAGE: &str = "en";

const SUPPORTED_LOCALES_FILE: &str = "/usr/share/i18n/SUPPORTED";
const LOCALES_DIR: &str = "/usr/share/i18n/locales";

/// ISO 639-1 codes used when the system has no locale table
const ISO_639_1: &[&str] = &[
    "af", "am", "ar", "az", "be", "bg", "bn", "bs", "ca", "cs", "cy", "da", "de", "el", "en",
    "eo", "es", "et", "eu", "fa", "fi", "fr", "ga", "gl", "gu", "he", "hi", "hr", "hu", "hy",
    "id", "is", "it", "ja", "ka", "kk", "km", "kn", "ko", "ky", "lo", "lt", "lv", "mk", "ml",
    "mn", "mr", "ms", "mt", "my", "nb", "ne", "nl", "nn", "no", "pa", "pl", "pt", "ro", "ru",
    "si", "sk", "sl", "sq", "sr", "sv", "sw", "ta", "te", "th", "tl", "tr", "uk", "ur", "uz",
    "vi", "zh", "zu",
];

/// Environment variables the launcher reacts to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// `$BROWSER`, the user's default browser name
    pub browser: Option<String>,
    /// `$LANG`, the system locale
    pub lang: Option<String>,
    /// `$XDG_SESSION_TYPE`
    pub session_type: Option<String>,
}

impl Environment {
    /// Read the variables from the current process environment
    #[must_use]
    pub fn capture() -> Self {
        Self {
            browser: env::var("BROWSER").ok().filter(|v| !v.is_empty()),
            lang: env::var("LANG").ok().filter(|v| !v.is_empty()),
            session_type: env::var("XDG_SESSION_TYPE").ok().filter(|v| !v.is_empty()),
        }
    }

    /// Whether the graphical session runs on Wayland
    #[must_use]
    pub fn is_wayland(&self) -> bool {
        self.session_type.as_deref() == Some("wayland")
    }

    /// Two-letter language derived from `$LANG`
    ///
    /// The `C` and `POSIX` locales, and an unset `$LANG`, fall back to
    /// [`DEFAULT_LANGUAGE`].
    #[must_use]
    pub fn system_language(&self) -> String {
        self.lang
            .as_deref()
            .and_then(language_code)
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    }
}

/// Language part of a locale name such as `fr_FR.UTF-8`
///
/// Only names of the `ll`, `ll_CC`, `ll.charset` or `ll@modifier` shape
/// have one.
///
/// ```
/// use rofi_search::system::language_code;
///
/// assert_eq!(language_code("fr_FR.UTF-8").as_deref(), Some("fr"));
/// assert_eq!(language_code("C.UTF-8"), None);
/// assert_eq!(language_code("POSIX"), None);
/// ```
#[must_use]
pub fn language_code(locale: &str) -> Option<String> {
    let locale = locale.trim();
    let code = locale.get(..2)?;
    if !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    match locale[2..].chars().next() {
        None | Some('_' | '.' | '@') => Some(code.to_ascii_lowercase()),
        Some(_) => None,
    }
}

/// Answers whether a browser executable can be started
pub trait InstallCheck {
    fn is_installed(&self, executable: &str) -> bool;
}

impl<F> InstallCheck for F
where
    F: Fn(&str) -> bool,
{
    fn is_installed(&self, executable: &str) -> bool {
        self(executable)
    }
}

/// Looks executables up on `$PATH`
#[derive(Debug, Clone, Copy, Default)]
pub struct PathLookup;

impl InstallCheck for PathLookup {
    fn is_installed(&self, executable: &str) -> bool {
        which::which(executable).is_ok()
    }
}

/// Source of locale names
pub trait LocaleSource {
    /// Locale names such as `de_DE.UTF-8`
    fn locales(&self) -> Vec<String>;
}

/// Reads the locale table shipped with glibc
#[derive(Debug, Clone)]
pub struct SystemLocales {
    supported: PathBuf,
    locales_dir: PathBuf,
}

impl SystemLocales {
    #[must_use]
    pub fn new() -> Self {
        Self {
            supported: PathBuf::from(SUPPORTED_LOCALES_FILE),
            locales_dir: PathBuf::from(LOCALES_DIR),
        }
    }

    /// Read from another `SUPPORTED` file and locales directory
    #[must_use]
    pub fn at(supported: impl AsRef<Path>, locales_dir: impl AsRef<Path>) -> Self {
        Self {
            supported: supported.as_ref().to_path_buf(),
            locales_dir: locales_dir.as_ref().to_path_buf(),
        }
    }
}

impl Default for SystemLocales {
    fn default() -> Self {
        Self::new()
    }
}

impl LocaleSource for SystemLocales {
    fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = fs::read_to_string(&self.supported)
            .map(|content| {
                content
                    .lines()
                    .filter_map(|line| line.split_whitespace().next())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if let Ok(entries) = fs::read_dir(&self.locales_dir) {
            locales.extend(
                entries
                    .filter_map(Result::ok)
                    .map(|entry| entry.file_name().to_string_lossy().into_owned()),
            );
        }

        if locales.is_empty() {
            tracing::debug!("no system locale table found, using built-in language list");
            return ISO_639_1.iter().map(|code| (*code).to_string()).collect();
        }
        locales
    }
}

/// Distinct two-letter languages offered by `source`, without `current`
///
/// The result is sorted.
#[must_use]
pub fn language_candidates(source: &dyn LocaleSource, current: &str) -> Vec<String> {
    let languages: BTreeSet<String> = source
        .locales()
        .iter()
        .filter_map(|locale| language_code(locale))
        .filter(|code| code != current)
        .collect();
    languages.into_iter().collect()
}
