//! Configuration model for rofi-search
//!
//! The effective configuration of a run is built in place by successive
//! loader passes (see [`ConfigParser`]): built-in catalog, the user's
//! standard configuration file, a file given on the command line, then the
//! command-line flags themselves. Once loaded it is only read.
//!
//! Besides the settings, this module owns the resolution rules that turn
//! them into one effective browser and search engine, and the visibility
//! rules deciding which entries a picker lists.

mod error;
mod location;
mod parsing;

pub use error::ConfigError;
pub use location::{
    CONFIG_FILE_NAMES, ConfigLocation, expand_path, standard_locations, user_config,
};
pub use parsing::{ConfigParser, Document};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::entries::{BrowserId, Catalog, EngineId};
use crate::system::{Environment, InstallCheck};

/// Color of the aliases shown next to entry names
pub const DEFAULT_ALIASES_COLOR: &str = "#444444";

/// Width of the search bar, in percent of the screen
pub const DEFAULT_WIDTH: u8 = 50;

/// `[main]` settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MainConfig {
    /// Open searches in a private window
    pub private_search: bool,
    /// Language given to search engines, `None` to follow `$LANG`
    pub language: Option<String>,
    /// Extra configuration files loaded after the one declaring them
    pub sources: Vec<PathBuf>,
}

/// `[browsers]` settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowsersConfig {
    /// Browser forced for this run
    pub explicit: Option<BrowserId>,
    /// Browsers to use, first installed one wins
    pub preferred: Vec<BrowserId>,
    /// List only browsers flagged as private
    pub private_only: bool,
    pub hide: Vec<BrowserId>,
    pub show: Vec<BrowserId>,
    /// Hide browsers based on one of these
    pub hide_based_on: Vec<BrowserId>,
    /// Show browsers based on one of these
    pub show_based_on: Vec<BrowserId>,
}

impl BrowsersConfig {
    /// Whether a browser is listed in the browser picker
    ///
    /// Rules, first match wins:
    /// 1. not installed: hidden, whatever else is configured
    /// 2. shown or preferred: listed
    /// 3. hidden: not listed
    /// 4. non-private while only private browsers are wanted: not listed
    /// 5. base shown or no base: listed; base hidden: not listed; else listed
    #[must_use]
    pub fn is_valid(&self, id: BrowserId, base: Option<BrowserId>, private: bool, installed: bool) -> bool {
        if !installed {
            return false;
        }
        if self.show.contains(&id) || self.preferred.contains(&id) {
            return true;
        }
        if self.hide.contains(&id) {
            return false;
        }
        if self.private_only && !private {
            return false;
        }
        match base {
            None => true,
            Some(base) if self.show_based_on.contains(&base) => true,
            Some(base) => !self.hide_based_on.contains(&base),
        }
    }
}

/// `[search_engines]` settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchEnginesConfig {
    /// Search engine forced for this run
    pub explicit: Option<EngineId>,
    /// Search engine used when the browser has no preference
    pub default: Option<EngineId>,
    /// List only search engines flagged as private
    pub private_only: bool,
    pub hide: Vec<EngineId>,
    pub show: Vec<EngineId>,
}

impl SearchEnginesConfig {
    /// Whether a search engine is listed in the search engine picker
    ///
    /// Shown beats hidden, hidden beats the private filter.
    #[must_use]
    pub fn is_valid(&self, id: EngineId, private: bool) -> bool {
        if self.show.contains(&id) {
            return true;
        }
        if self.hide.contains(&id) {
            return false;
        }
        !(self.private_only && !private)
    }
}

/// `[customization]` settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customization {
    pub aliases_color: Option<String>,
    /// Keybinding opening the browser picker (`-kb-custom-1`)
    pub kb_browsers: Option<String>,
    /// Keybinding opening the search engine picker (`-kb-custom-2`)
    pub kb_search_engines: Option<String>,
    /// Keybinding toggling private search (`-kb-custom-3`)
    pub kb_toggle_private: Option<String>,
    /// Keybinding opening the language picker (`-kb-custom-4`)
    pub kb_change_language: Option<String>,
    /// rofi configuration file passed with `-config`
    pub rofi_config: Option<PathBuf>,
    /// Width of the search bar in percent, within (0, 100]
    pub width: u8,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            aliases_color: None,
            kb_browsers: None,
            kb_search_engines: None,
            kb_toggle_private: None,
            kb_change_language: None,
            rofi_config: None,
            width: DEFAULT_WIDTH,
        }
    }
}

impl Customization {
    #[must_use]
    pub fn aliases_color(&self) -> &str {
        self.aliases_color.as_deref().unwrap_or(DEFAULT_ALIASES_COLOR)
    }
}

/// Effective configuration of one run
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Print what would be launched instead of launching it
    pub debug: bool,
    pub main: MainConfig,
    pub browsers: BrowsersConfig,
    pub search_engines: SearchEnginesConfig,
    pub customization: Customization,
    /// Built-in and declared browsers and search engines
    pub catalog: Catalog,
    pub environment: Environment,
    loaded_files: HashSet<PathBuf>,
}

impl Configuration {
    /// Configuration holding only the built-in defaults
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self {
            debug: false,
            main: MainConfig::default(),
            browsers: BrowsersConfig::default(),
            search_engines: SearchEnginesConfig::default(),
            customization: Customization::default(),
            catalog: Catalog::builtin(),
            environment,
            loaded_files: HashSet::new(),
        }
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Build the configuration of a run
    ///
    /// Layers, later wins: built-in defaults, the user's standard location,
    /// the file given on the command line, then the command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` met while loading any layer.
    pub fn load(
        environment: Environment,
        user: Option<&ConfigLocation>,
        file: Option<&ConfigLocation>,
        overrides: &Document,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::new(environment);
        let mut parser = ConfigParser::new(&mut config);

        if let Some(user) = user {
            parser.load_location(user)?;
        }
        if let Some(file) = file {
            parser.load_location(file)?;
        }
        parser.load_document(overrides)?;

        Ok(config)
    }

    /// Whether a configuration file has already been applied
    #[must_use]
    pub fn has_loaded(&self, file: &Path) -> bool {
        self.loaded_files.contains(file)
    }

    /// Record a configuration file as applied
    ///
    /// Returns `false` if it was already recorded.
    pub fn mark_loaded(&mut self, file: PathBuf) -> bool {
        self.loaded_files.insert(file)
    }

    /// Files applied so far
    pub fn loaded_files(&self) -> impl Iterator<Item = &Path> {
        self.loaded_files.iter().map(PathBuf::as_path)
    }

    /// Language given to search engines
    #[must_use]
    pub fn language(&self) -> String {
        self.main
            .language
            .clone()
            .unwrap_or_else(|| self.environment.system_language())
    }

    fn browser_installed(&self, id: BrowserId, installed: &dyn InstallCheck) -> bool {
        installed.is_installed(self.catalog.browser(id).executable())
    }

    /// Effective browser
    ///
    /// In order: the explicit browser if installed, the first installed
    /// preferred browser, the browser named by `$BROWSER`, then Firefox.
    #[must_use]
    pub fn browser(&self, installed: &dyn InstallCheck) -> BrowserId {
        if let Some(explicit) = self.browsers.explicit {
            if self.browser_installed(explicit, installed) {
                return explicit;
            }
            tracing::debug!(
                browser = self.catalog.browser(explicit).executable(),
                "explicit browser is not installed, ignoring it"
            );
        }

        if let Some(preferred) = self
            .browsers
            .preferred
            .iter()
            .copied()
            .find(|&id| self.browser_installed(id, installed))
        {
            return preferred;
        }

        if let Some(user_browser) = self
            .environment
            .browser
            .as_deref()
            .and_then(|name| self.catalog.browsers.find(name))
        {
            return user_browser;
        }

        self.catalog.default_browser()
    }

    /// Effective search engine for `browser`, or for the effective browser
    ///
    /// In order: the explicit search engine, the browser's own preference,
    /// the configured default, then DuckDuckGo. Nothing is mutated, so this
    /// also answers "which engine would browser X use".
    #[must_use]
    pub fn search_engine(&self, browser: Option<BrowserId>, installed: &dyn InstallCheck) -> EngineId {
        if let Some(explicit) = self.search_engines.explicit {
            return explicit;
        }
        let browser = browser.unwrap_or_else(|| self.browser(installed));
        self.catalog
            .browser(browser)
            .search_engine()
            .or(self.search_engines.default)
            .unwrap_or_else(|| self.catalog.default_search_engine())
    }

    /// Whether a browser is listed in the browser picker
    #[must_use]
    pub fn is_valid_browser(&self, id: BrowserId, installed: &dyn InstallCheck) -> bool {
        let browser = self.catalog.browser(id);
        self.browsers.is_valid(
            id,
            browser.base(),
            browser.is_private(),
            installed.is_installed(browser.executable()),
        )
    }

    /// Browsers listed in the browser picker, in registration order
    #[must_use]
    pub fn visible_browsers(&self, installed: &dyn InstallCheck) -> Vec<BrowserId> {
        self.catalog
            .browsers
            .ids()
            .filter(|&id| self.is_valid_browser(id, installed))
            .collect()
    }

    /// Search engines listed in the search engine picker, in registration order
    #[must_use]
    pub fn visible_search_engines(&self) -> Vec<EngineId> {
        self.catalog
            .search_engines
            .iter()
            .filter(|(id, engine)| self.search_engines.is_valid(*id, engine.is_private()))
            .map(|(id, _)| id)
            .collect()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(Environment::default())
    }
}
