//! Command-line interface definitions and parsing
//!
//! Every setting of the configuration file has a flag. Flags that are given
//! are turned into a configuration [`Document`] applied after the files, so
//! they win; flags that are absent are left out of it and never clear a
//! value set by a file.
//!
//! # Examples
//!
//! ```
//! use rofi_search::cli::Cli;
//!
//! let cli = Cli::parse_from_args(["rofi-search", "-b", "Brave,Librewolf", "-p"]);
//! let overrides = cli.overrides();
//! assert_eq!(overrides["browsers"]["preferred"].as_array().map(Vec::len), Some(2));
//! assert_eq!(overrides["main"]["private_search"].as_bool(), Some(true));
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use toml::{Table, Value};

use crate::config::Document;

/// Command-line arguments
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "rofi-search")]
#[command(about = "Search the web from rofi with the browser and search engine of your choice", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Search terms; when given, search right away without a menu
    #[arg(value_name = "TERMS")]
    pub terms: Vec<String>,

    /// Path to a TOML configuration file, or a directory holding one
    #[arg(
        short = 'c',
        long = "configuration-file",
        visible_aliases = ["configuration", "config", "config-file"],
        value_name = "PATH"
    )]
    pub configuration_file: Option<PathBuf>,

    /// Print the browser and URL that would be opened, then exit
    #[arg(short = 'd', long = "debug", visible_alias = "fake-run")]
    pub debug: bool,

    /// Language or locale given to search engines
    #[arg(long = "language", visible_aliases = ["locale", "lang"])]
    pub language: Option<String>,

    /// List every known browser and whether it is installed
    #[arg(short = 'l', long = "list-browsers", visible_alias = "list")]
    pub list_browsers: bool,

    /// List every known search engine
    #[arg(long = "list-search-engines")]
    pub list_search_engines: bool,

    /// Open the search in a private window
    #[arg(short = 'p', long = "private-search", visible_alias = "private")]
    pub private_search: bool,

    /// Write a commented configuration file to the user's configuration directory
    #[arg(long = "make-init-config", visible_aliases = ["init-config", "init"])]
    pub make_init_config: bool,

    /// Use this browser, if installed
    #[arg(long = "use-browser", value_name = "BROWSER")]
    pub use_browser: Option<String>,

    /// Use this search engine
    #[arg(long = "use-search-engine", value_name = "SEARCH_ENGINE")]
    pub use_search_engine: Option<String>,

    /// Preferred browsers, first installed one wins (comma separated)
    #[arg(
        short = 'b',
        long = "preferred-browsers",
        visible_aliases = ["preferred-browser", "browsers", "browser"],
        value_delimiter = ',',
        value_name = "BROWSERS"
    )]
    pub preferred_browsers: Option<Vec<String>>,

    /// Only list browsers that respect your privacy
    #[arg(short = 'B', long = "private-browsers-only", visible_alias = "private-browsers")]
    pub private_browsers_only: bool,

    /// Always list these browsers (comma separated)
    #[arg(long = "show-browsers", value_delimiter = ',', value_name = "BROWSERS")]
    pub show_browsers: Option<Vec<String>>,

    /// Never list these browsers (comma separated)
    #[arg(long = "hide-browsers", value_delimiter = ',', value_name = "BROWSERS")]
    pub hide_browsers: Option<Vec<String>>,

    /// List the browsers based on these browsers (comma separated)
    #[arg(
        long = "show-browsers-based-on",
        visible_aliases = ["show-based-on", "show-based"],
        value_delimiter = ',',
        value_name = "BROWSERS"
    )]
    pub show_browsers_based_on: Option<Vec<String>>,

    /// Hide the browsers based on these browsers (comma separated)
    #[arg(
        long = "hide-browsers-based-on",
        visible_aliases = ["hide-based-on", "hide-based"],
        value_delimiter = ',',
        value_name = "BROWSERS"
    )]
    pub hide_browsers_based_on: Option<Vec<String>>,

    /// Search engine used when the browser has no preference
    #[arg(
        short = 's',
        long = "default-search-engine",
        visible_alias = "search-engine",
        value_name = "SEARCH_ENGINE"
    )]
    pub default_search_engine: Option<String>,

    /// Only list search engines that respect your privacy
    #[arg(
        short = 'S',
        long = "private-search-engine-only",
        visible_alias = "private-search-engines"
    )]
    pub private_search_engine_only: bool,

    /// Never list these search engines (comma separated)
    #[arg(long = "hide-search-engines", value_delimiter = ',', value_name = "SEARCH_ENGINES")]
    pub hide_search_engines: Option<Vec<String>>,

    /// Always list these search engines (comma separated)
    #[arg(long = "show-search-engines", value_delimiter = ',', value_name = "SEARCH_ENGINES")]
    pub show_search_engines: Option<Vec<String>>,

    /// Keybinding opening the browser list
    #[arg(long = "kb-browsers", value_name = "KEYS")]
    pub kb_browsers: Option<String>,

    /// Keybinding opening the language list
    #[arg(long = "kb-change-language", value_name = "KEYS")]
    pub kb_change_language: Option<String>,

    /// Keybinding opening the search engine list
    #[arg(long = "kb-search-engines", value_name = "KEYS")]
    pub kb_search_engines: Option<String>,

    /// Keybinding toggling private search
    #[arg(long = "kb-toggle-private-search", visible_alias = "kb-toggle-private", value_name = "KEYS")]
    pub kb_toggle_private_search: Option<String>,

    /// rofi configuration file
    #[arg(long = "rofi-config", value_name = "PATH")]
    pub rofi_config: Option<PathBuf>,

    /// Width of the search bar, in percent of the screen
    #[arg(short = 'w', long = "width", value_parser = clap::value_parser!(u8).range(1..=100))]
    pub width: Option<u8>,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse arguments from an iterator, exiting on error
    #[must_use]
    pub fn parse_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::parse_from(args)
    }

    /// Search terms joined by spaces, if any were given
    #[must_use]
    pub fn search_terms(&self) -> Option<String> {
        (!self.terms.is_empty()).then(|| self.terms.join(" "))
    }

    /// Settings given on the command line, shaped like a configuration file
    ///
    /// Absent flags are left out, and boolean flags only appear when set.
    #[must_use]
    pub fn overrides(&self) -> Table {
        let mut main = Table::new();
        insert_str(&mut main, "lang", self.language.as_deref());
        insert_flag(&mut main, "private_search", self.private_search);

        let mut browsers = Table::new();
        insert_str(&mut browsers, "explicit", self.use_browser.as_deref());
        insert_list(&mut browsers, "preferred", self.preferred_browsers.as_deref());
        insert_flag(&mut browsers, "private_only", self.private_browsers_only);
        insert_list(&mut browsers, "show", self.show_browsers.as_deref());
        insert_list(&mut browsers, "hide", self.hide_browsers.as_deref());
        insert_list(&mut browsers, "show_based_on", self.show_browsers_based_on.as_deref());
        insert_list(&mut browsers, "hide_based_on", self.hide_browsers_based_on.as_deref());

        let mut search_engines = Table::new();
        insert_str(&mut search_engines, "explicit", self.use_search_engine.as_deref());
        insert_str(&mut search_engines, "default", self.default_search_engine.as_deref());
        insert_flag(&mut search_engines, "private_only", self.private_search_engine_only);
        insert_list(&mut search_engines, "hide", self.hide_search_engines.as_deref());
        insert_list(&mut search_engines, "show", self.show_search_engines.as_deref());

        let mut customization = Table::new();
        insert_str(&mut customization, "kb_browsers", self.kb_browsers.as_deref());
        insert_str(&mut customization, "kb_search_engines", self.kb_search_engines.as_deref());
        insert_str(
            &mut customization,
            "kb_toggle_private_search",
            self.kb_toggle_private_search.as_deref(),
        );
        insert_str(&mut customization, "kb_change_language", self.kb_change_language.as_deref());
        let rofi_config = self.rofi_config.as_ref().map(|path| path.display().to_string());
        insert_str(&mut customization, "rofi_config", rofi_config.as_deref());
        if let Some(width) = self.width {
            customization.insert("width".to_string(), Value::Integer(i64::from(width)));
        }

        let mut overrides = Table::new();
        for (name, section) in [
            ("main", main),
            ("browsers", browsers),
            ("search_engines", search_engines),
            ("customization", customization),
        ] {
            if !section.is_empty() {
                overrides.insert(name.to_string(), Value::Table(section));
            }
        }
        overrides
    }

    /// [`Cli::overrides`] as a document for the configuration loader
    #[must_use]
    pub fn overrides_document(&self) -> Document {
        Document::from_arguments(self.overrides())
    }
}

fn insert_str(section: &mut Table, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        section.insert(key.to_string(), Value::String(value.to_string()));
    }
}

fn insert_flag(section: &mut Table, key: &str, set: bool) {
    if set {
        section.insert(key.to_string(), Value::Boolean(true));
    }
}

/// Insert a name list; blank names are dropped, so `--hide-browsers ""` clears
fn insert_list(section: &mut Table, key: &str, names: Option<&[String]>) {
    if let Some(names) = names {
        let items = names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| Value::String(name.to_string()))
            .collect();
        section.insert(key.to_string(), Value::Array(items));
    }
}
