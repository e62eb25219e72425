//! Configuration loader
//!
//! A configuration source, whether a TOML file or the command-line flags
//! translated into the same shape, is a [`Document`]. [`ConfigParser`]
//! applies documents to a [`Configuration`] in place:
//!
//! 1. `[search_engine.NAME]` and `[browser.NAME]` declarations register
//!    custom entries,
//! 2. the `main`, `browsers`, `search_engines` and `customization` sections
//!    are applied through a table of typed settings,
//! 3. the files listed in this document's `main.sources` are loaded,
//!    depth first, skipping files that were already applied.
//!
//! Scalars from a later document replace earlier ones. Lists accumulate: a
//! non-empty list adds its names (a later `preferred` list goes in front),
//! an empty list clears what was collected so far.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::{Table, Value};

use super::error::ConfigError;
use super::location::{ConfigLocation, expand_path};
use super::Configuration;
use crate::entries::{Browser, BrowserId, EngineId, Entry, SearchEngine};

type Result<T> = std::result::Result<T, ConfigError>;

const BROWSER_DECLARATIONS: &str = "browser";
const SEARCH_ENGINE_DECLARATIONS: &str = "search_engine";

/// Where a document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    File(PathBuf),
    Arguments,
}

/// One configuration source, parsed but not yet applied
#[derive(Debug, Clone)]
pub struct Document {
    origin: Origin,
    table: Table,
}

impl Document {
    /// Read and parse a TOML configuration file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read and
    /// `ConfigError::Parse` if it is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse TOML text that was read from `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if `content` is not valid TOML.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let table = content.parse::<Table>().map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            origin: Origin::File(path.to_path_buf()),
            table,
        })
    }

    /// Document built from command-line flags
    #[must_use]
    pub const fn from_arguments(table: Table) -> Self {
        Self {
            origin: Origin::Arguments,
            table,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> &Origin {
        &self.origin
    }

    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    /// Directory relative paths in this document are resolved against
    fn base_dir(&self) -> Option<&Path> {
        match &self.origin {
            Origin::File(path) => path.parent(),
            Origin::Arguments => None,
        }
    }
}

/// State shared by the settings of one document
struct Scope<'a> {
    config: &'a mut Configuration,
    section: &'static str,
    base_dir: Option<&'a Path>,
    /// `main.sources` declared by this document
    sources: Vec<PathBuf>,
}

impl Scope<'_> {
    fn browsers(&self, names: &[String]) -> Result<Vec<BrowserId>> {
        names.iter().map(|name| self.browser(name)).collect()
    }

    fn browser(&self, name: &str) -> Result<BrowserId> {
        self.config
            .catalog
            .browsers
            .find(name)
            .ok_or_else(|| ConfigError::unknown_browser(self.section, name))
    }

    fn search_engines(&self, names: &[String]) -> Result<Vec<EngineId>> {
        names.iter().map(|name| self.search_engine(name)).collect()
    }

    fn search_engine(&self, name: &str) -> Result<EngineId> {
        self.config
            .catalog
            .search_engines
            .find(name)
            .ok_or_else(|| ConfigError::unknown_search_engine(self.section, name))
    }
}

/// A setting, its expected type and how it is applied
enum Setting {
    Str(&'static str, fn(&mut Scope<'_>, &str) -> Result<()>),
    Bool(&'static str, fn(&mut Scope<'_>, bool) -> Result<()>),
    Int(&'static str, fn(&mut Scope<'_>, i64) -> Result<()>),
    List(&'static str, fn(&mut Scope<'_>, Vec<String>) -> Result<()>),
}

impl Setting {
    const fn name(&self) -> &'static str {
        match self {
            Self::Str(name, _) | Self::Bool(name, _) | Self::Int(name, _) | Self::List(name, _) => {
                *name
            }
        }
    }

    const fn expected(&self) -> &'static str {
        match self {
            Self::Str(..) => "string",
            Self::Bool(..) => "boolean",
            Self::Int(..) => "integer",
            Self::List(..) => "list of strings",
        }
    }

    fn apply(&self, scope: &mut Scope<'_>, value: &Value) -> Result<()> {
        match (self, value) {
            (Self::Str(_, apply), Value::String(s)) => apply(scope, s),
            (Self::Bool(_, apply), Value::Boolean(b)) => apply(scope, *b),
            (Self::Int(_, apply), Value::Integer(i)) => apply(scope, *i),
            (Self::List(_, apply), Value::Array(items)) => {
                let strings = items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| self.type_error(scope))?;
                apply(scope, strings)
            }
            _ => Err(self.type_error(scope)),
        }
    }

    fn type_error(&self, scope: &Scope<'_>) -> ConfigError {
        ConfigError::wrong_type(scope.section, self.name(), self.expected())
    }
}

struct Section {
    name: &'static str,
    settings: &'static [Setting],
}

const SECTIONS: &[Section] = &[
    Section {
        name: "main",
        settings: &[
            Setting::Str("lang", set_language),
            Setting::Bool("private_search", set_private_search),
            Setting::List("sources", add_sources),
        ],
    },
    Section {
        name: "browsers",
        settings: &[
            Setting::Str("explicit", set_explicit_browser),
            Setting::List("preferred", add_preferred_browsers),
            Setting::Bool("private_only", set_private_browsers_only),
            Setting::List("hide", add_hidden_browsers),
            Setting::List("show", add_shown_browsers),
            Setting::List("hide_based_on", add_hidden_bases),
            Setting::List("show_based_on", add_shown_bases),
        ],
    },
    Section {
        name: "search_engines",
        settings: &[
            Setting::Str("explicit", set_explicit_search_engine),
            Setting::Str("default", set_default_search_engine),
            Setting::Bool("private_only", set_private_search_engines_only),
            Setting::List("hide", add_hidden_search_engines),
            Setting::List("show", add_shown_search_engines),
        ],
    },
    Section {
        name: "customization",
        settings: &[
            Setting::Str("aliases_color", set_aliases_color),
            Setting::Str("kb_browsers", set_kb_browsers),
            Setting::Str("kb_search_engines", set_kb_search_engines),
            Setting::Str("kb_toggle_private_search", set_kb_toggle_private),
            Setting::Str("kb_change_language", set_kb_change_language),
            Setting::Str("rofi_config", set_rofi_config),
            Setting::Int("width", set_width),
        ],
    },
];

/// Add `items` to `target`, or clear `target` when `items` is empty
fn merge<T: PartialEq>(target: &mut Vec<T>, items: Vec<T>) {
    if items.is_empty() {
        target.clear();
        return;
    }
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

/// Like [`merge`], but the new items go in front, in their given order
fn merge_in_front<T: PartialEq>(target: &mut Vec<T>, items: Vec<T>) {
    if items.is_empty() {
        target.clear();
        return;
    }
    let mut merged: Vec<T> = Vec::with_capacity(target.len() + items.len());
    for item in items {
        if !merged.contains(&item) {
            merged.push(item);
        }
    }
    for item in target.drain(..) {
        if !merged.contains(&item) {
            merged.push(item);
        }
    }
    *target = merged;
}

fn set_language(scope: &mut Scope<'_>, lang: &str) -> Result<()> {
    scope.config.main.language = Some(lang.to_string());
    Ok(())
}

fn set_private_search(scope: &mut Scope<'_>, private_search: bool) -> Result<()> {
    scope.config.main.private_search = private_search;
    Ok(())
}

fn add_sources(scope: &mut Scope<'_>, sources: Vec<String>) -> Result<()> {
    let paths: Vec<PathBuf> = sources
        .iter()
        .map(|source| expand_path(source, scope.base_dir))
        .collect();
    scope.sources.extend(paths.iter().cloned());
    merge(&mut scope.config.main.sources, paths);
    Ok(())
}

fn set_explicit_browser(scope: &mut Scope<'_>, name: &str) -> Result<()> {
    scope.config.browsers.explicit = Some(scope.browser(name)?);
    Ok(())
}

fn add_preferred_browsers(scope: &mut Scope<'_>, names: Vec<String>) -> Result<()> {
    let ids = scope.browsers(&names)?;
    merge_in_front(&mut scope.config.browsers.preferred, ids);
    Ok(())
}

fn set_private_browsers_only(scope: &mut Scope<'_>, private_only: bool) -> Result<()> {
    scope.config.browsers.private_only = private_only;
    Ok(())
}

fn add_hidden_browsers(scope: &mut Scope<'_>, names: Vec<String>) -> Result<()> {
    let ids = scope.browsers(&names)?;
    merge(&mut scope.config.browsers.hide, ids);
    Ok(())
}

fn add_shown_browsers(scope: &mut Scope<'_>, names: Vec<String>) -> Result<()> {
    let ids = scope.browsers(&names)?;
    merge(&mut scope.config.browsers.show, ids);
    Ok(())
}

fn add_hidden_bases(scope: &mut Scope<'_>, names: Vec<String>) -> Result<()> {
    let ids = scope.browsers(&names)?;
    merge(&mut scope.config.browsers.hide_based_on, ids);
    Ok(())
}

fn add_shown_bases(scope: &mut Scope<'_>, names: Vec<String>) -> Result<()> {
    let ids = scope.browsers(&names)?;
    merge(&mut scope.config.browsers.show_based_on, ids);
    Ok(())
}

fn set_explicit_search_engine(scope: &mut Scope<'_>, name: &str) -> Result<()> {
    scope.config.search_engines.explicit = Some(scope.search_engine(name)?);
    Ok(())
}

fn set_default_search_engine(scope: &mut Scope<'_>, name: &str) -> Result<()> {
    scope.config.search_engines.default = Some(scope.search_engine(name)?);
    Ok(())
}

fn set_private_search_engines_only(scope: &mut Scope<'_>, private_only: bool) -> Result<()> {
    scope.config.search_engines.private_only = private_only;
    Ok(())
}

fn add_hidden_search_engines(scope: &mut Scope<'_>, names: Vec<String>) -> Result<()> {
    let ids = scope.search_engines(&names)?;
    merge(&mut scope.config.search_engines.hide, ids);
    Ok(())
}

fn add_shown_search_engines(scope: &mut Scope<'_>, names: Vec<String>) -> Result<()> {
    let ids = scope.search_engines(&names)?;
    merge(&mut scope.config.search_engines.show, ids);
    Ok(())
}

fn set_aliases_color(scope: &mut Scope<'_>, color: &str) -> Result<()> {
    scope.config.customization.aliases_color = Some(color.to_string());
    Ok(())
}

fn set_kb_browsers(scope: &mut Scope<'_>, keybinding: &str) -> Result<()> {
    scope.config.customization.kb_browsers = Some(keybinding.to_string());
    Ok(())
}

fn set_kb_search_engines(scope: &mut Scope<'_>, keybinding: &str) -> Result<()> {
    scope.config.customization.kb_search_engines = Some(keybinding.to_string());
    Ok(())
}

fn set_kb_toggle_private(scope: &mut Scope<'_>, keybinding: &str) -> Result<()> {
    scope.config.customization.kb_toggle_private = Some(keybinding.to_string());
    Ok(())
}

fn set_kb_change_language(scope: &mut Scope<'_>, keybinding: &str) -> Result<()> {
    scope.config.customization.kb_change_language = Some(keybinding.to_string());
    Ok(())
}

fn set_rofi_config(scope: &mut Scope<'_>, path: &str) -> Result<()> {
    scope.config.customization.rofi_config = Some(expand_path(path, scope.base_dir));
    Ok(())
}

fn set_width(scope: &mut Scope<'_>, width: i64) -> Result<()> {
    let width = u8::try_from(width)
        .ok()
        .filter(|w| (1..=100).contains(w))
        .ok_or(ConfigError::WidthOutOfRange(width))?;
    scope.config.customization.width = width;
    Ok(())
}

/// `[browser.NAME]` table
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BrowserDeclaration {
    arguments: Vec<String>,
    executable: Option<String>,
    #[serde(default)]
    private: bool,
    base: Option<String>,
    search_engine: Option<String>,
    #[serde(default)]
    private_arguments: Vec<String>,
    #[serde(default)]
    aliases: Vec<String>,
}

impl BrowserDeclaration {
    fn base(&self) -> Option<&str> {
        self.base.as_deref().filter(|base| !base.is_empty())
    }
}

/// `[search_engine.NAME]` table
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchEngineDeclaration {
    url: String,
    #[serde(default)]
    private: bool,
    field: Option<String>,
    escape: Option<bool>,
    #[serde(default)]
    aliases: Vec<String>,
}

fn declarations<'t>(table: &'t Table, section: &str) -> Result<Option<&'t Table>> {
    match table.get(section) {
        None => Ok(None),
        Some(Value::Table(declarations)) => Ok(Some(declarations)),
        Some(other) => Err(ConfigError::NotASection {
            section: section.to_string(),
            found: other.type_str(),
        }),
    }
}

fn declaration<T>(section: &str, name: &str, value: &Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    value
        .clone()
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::InvalidDeclaration {
            section: section.to_string(),
            name: name.to_string(),
            reason: e.message().to_string(),
        })
}

fn invalid_declaration(section: &str, name: &str, reason: String) -> ConfigError {
    ConfigError::InvalidDeclaration {
        section: section.to_string(),
        name: name.to_string(),
        reason,
    }
}

/// Applies configuration documents to a [`Configuration`]
pub struct ConfigParser<'a> {
    config: &'a mut Configuration,
}

impl<'a> ConfigParser<'a> {
    pub fn new(config: &'a mut Configuration) -> Self {
        Self { config }
    }

    /// Load the configuration file designated by `location`
    ///
    /// Returns `Ok(false)` if that file was already applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the location is invalid, or if the file or
    /// one of its sources cannot be read, parsed or applied.
    pub fn load_location(&mut self, location: &ConfigLocation) -> Result<bool> {
        let file = location.config_file()?;
        self.load_file(&file)
    }

    /// Load one configuration file and, recursively, its sources
    ///
    /// Returns `Ok(false)` if that file was already applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or one of its sources cannot be
    /// read, parsed or applied.
    pub fn load_file(&mut self, file: &Path) -> Result<bool> {
        let canonical = fs::canonicalize(file).map_err(|source| ConfigError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        if self.config.has_loaded(&canonical) {
            tracing::debug!(path = %canonical.display(), "configuration file already loaded, skipping");
            return Ok(false);
        }

        let document = Document::from_file(&canonical)?;
        self.config.mark_loaded(canonical.clone());
        tracing::debug!(path = %canonical.display(), "loading configuration file");
        self.load_document(&document)?;
        Ok(true)
    }

    /// Apply a parsed document, then load the sources it declares
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on the first setting or declaration that cannot
    /// be applied, or if a declared source cannot be loaded.
    pub fn load_document(&mut self, document: &Document) -> Result<()> {
        let mut scope = Scope {
            config: &mut *self.config,
            section: "main",
            base_dir: document.base_dir(),
            sources: Vec::new(),
        };

        declare_search_engines(&mut scope, document.table())?;
        declare_browsers(&mut scope, document.table())?;
        apply_sections(&mut scope, document.table())?;

        let sources = scope.sources;
        for source in sources {
            self.load_location(&ConfigLocation::new(source))?;
        }
        Ok(())
    }
}

fn apply_sections(scope: &mut Scope<'_>, table: &Table) -> Result<()> {
    for key in table.keys() {
        let known = key == BROWSER_DECLARATIONS
            || key == SEARCH_ENGINE_DECLARATIONS
            || SECTIONS.iter().any(|section| section.name == key);
        if !known {
            tracing::warn!(section = %key, "ignoring unknown configuration section");
        }
    }

    for section in SECTIONS {
        let Some(value) = table.get(section.name) else {
            continue;
        };
        let Value::Table(settings) = value else {
            return Err(ConfigError::NotASection {
                section: section.name.to_string(),
                found: value.type_str(),
            });
        };

        scope.section = section.name;
        for (key, value) in settings {
            match section.settings.iter().find(|setting| setting.name() == key) {
                Some(setting) => setting.apply(scope, value)?,
                None => tracing::warn!(
                    section = section.name,
                    setting = %key,
                    "ignoring unknown setting"
                ),
            }
        }
    }
    Ok(())
}

fn declare_search_engines(scope: &mut Scope<'_>, table: &Table) -> Result<()> {
    let Some(declared) = declarations(table, SEARCH_ENGINE_DECLARATIONS)? else {
        return Ok(());
    };
    for (name, value) in declared {
        let declaration: SearchEngineDeclaration =
            declaration(SEARCH_ENGINE_DECLARATIONS, name, value)?;

        let mut engine = SearchEngine::new(name.as_str(), declaration.url)
            .with_private(declaration.private)
            .with_aliases(declaration.aliases);
        if let Some(field) = declaration.field {
            engine = engine.with_field(field);
        }
        if let Some(escape) = declaration.escape {
            engine = engine.with_escape(escape);
        }
        tracing::debug!(search_engine = %name, "registering custom search engine");
        scope.config.catalog.search_engines.register(engine);
    }
    Ok(())
}

/// Register `[browser.NAME]` declarations
///
/// A declaration may use another declaration of the same document as its
/// base, so declarations are registered once their base is.
fn declare_browsers(scope: &mut Scope<'_>, table: &Table) -> Result<()> {
    let Some(declared) = declarations(table, BROWSER_DECLARATIONS)? else {
        return Ok(());
    };

    let mut pending: Vec<(&String, BrowserDeclaration)> = declared
        .iter()
        .map(|(name, value)| Ok((name, declaration(BROWSER_DECLARATIONS, name, value)?)))
        .collect::<Result<_>>()?;

    while !pending.is_empty() {
        let before = pending.len();
        let mut waiting = Vec::new();
        for (name, declaration) in pending {
            let base = match declaration.base() {
                None => None,
                Some(base) => match scope.config.catalog.browsers.find(base) {
                    Some(id) => Some(id),
                    None if declared.contains_key(base) && base != name.as_str() => {
                        waiting.push((name, declaration));
                        continue;
                    }
                    None => {
                        return Err(invalid_declaration(
                            BROWSER_DECLARATIONS,
                            name,
                            format!("'{base}' is not the name of a browser"),
                        ));
                    }
                },
            };
            register_browser(scope, name, declaration, base)?;
        }

        if waiting.len() == before {
            let (name, declaration) = &waiting[0];
            return Err(invalid_declaration(
                BROWSER_DECLARATIONS,
                name,
                format!(
                    "base '{}' is part of a cycle of declarations",
                    declaration.base().unwrap_or_default()
                ),
            ));
        }
        pending = waiting;
    }
    Ok(())
}

fn register_browser(
    scope: &mut Scope<'_>,
    name: &str,
    declaration: BrowserDeclaration,
    base: Option<BrowserId>,
) -> Result<()> {
    let search_engine = declaration
        .search_engine
        .as_deref()
        .map(|engine| {
            scope.config.catalog.search_engines.find(engine).ok_or_else(|| {
                invalid_declaration(
                    BROWSER_DECLARATIONS,
                    name,
                    format!("'{engine}' is not the name of a search engine"),
                )
            })
        })
        .transpose()?;

    // A redeclared browser keeps its id, so its new base chain must not reach it.
    if let (Some(replaced), Some(base)) = (scope.config.catalog.browsers.find(name), base) {
        let mut current = Some(base);
        while let Some(id) = current {
            if id == replaced {
                return Err(invalid_declaration(
                    BROWSER_DECLARATIONS,
                    name,
                    format!(
                        "base '{}' is already based on '{name}'",
                        scope.config.catalog.browser(base).name()
                    ),
                ));
            }
            current = scope.config.catalog.browser(id).base();
        }
    }

    let executable = declaration.executable.unwrap_or_else(|| name.to_string());
    let mut browser = Browser::new(name, executable)
        .with_arguments(declaration.arguments)
        .with_private(declaration.private)
        .with_private_arguments(declaration.private_arguments)
        .with_aliases(declaration.aliases);
    if let Some(base) = base {
        browser = browser.based_on(base);
    }
    if let Some(search_engine) = search_engine {
        browser = browser.with_search_engine(search_engine);
    }

    tracing::debug!(browser = %name, "registering custom browser");
    scope.config.catalog.browsers.register(browser);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::write_config;

    fn load(config: &mut Configuration, content: &str) -> Result<()> {
        let document = Document::parse(content, Path::new("/etc/rofi-search/config.toml"))?;
        ConfigParser::new(config).load_document(&document)
    }

    fn browser_names(config: &Configuration, ids: &[BrowserId]) -> Vec<String> {
        ids.iter()
            .map(|&id| config.catalog.browser(id).name().to_string())
            .collect()
    }

    #[test]
    fn test_load_all_sections() {
        let mut config = Configuration::default();
        load(
            &mut config,
            r##"
            [main]
            lang = "fr"
            private_search = true

            [browsers]
            preferred = ["Librewolf", "Firefox"]
            private_only = true
            hide = ["Chrome"]
            show = ["Opera"]
            hide_based_on = ["Chromium"]

            [search_engines]
            default = "Startpage"
            private_only = true
            hide = ["Qwant"]

            [customization]
            aliases_color = "#888888"
            kb_browsers = "Alt+b"
            kb_search_engines = "Alt+s"
            kb_toggle_private_search = "Alt+p"
            kb_change_language = "Alt+l"
            width = 70
            "##,
        )
        .unwrap();

        assert_eq!(config.main.language.as_deref(), Some("fr"));
        assert!(config.main.private_search);
        assert_eq!(
            browser_names(&config, &config.browsers.preferred),
            vec!["Librewolf", "Firefox"]
        );
        assert!(config.browsers.private_only);
        assert_eq!(browser_names(&config, &config.browsers.hide), vec!["Chrome"]);
        assert_eq!(browser_names(&config, &config.browsers.show), vec!["Opera"]);
        assert_eq!(
            config.search_engines.default,
            config.catalog.search_engines.find("Startpage")
        );
        assert!(config.search_engines.private_only);
        assert_eq!(config.customization.aliases_color(), "#888888");
        assert_eq!(config.customization.kb_browsers.as_deref(), Some("Alt+b"));
        assert_eq!(config.customization.kb_change_language.as_deref(), Some("Alt+l"));
        assert_eq!(config.customization.width, 70);
    }

    #[test]
    fn test_scalar_instead_of_section() {
        let mut config = Configuration::default();
        let error = load(&mut config, "main = 3").unwrap_err();
        assert!(matches!(
            error,
            ConfigError::NotASection { ref section, found: "integer" } if section == "main"
        ));
    }

    #[test]
    fn test_wrong_setting_type() {
        let mut config = Configuration::default();
        let error = load(&mut config, "[customization]\nwidth = \"wide\"").unwrap_err();
        assert_eq!(
            error.to_string(),
            "setting 'customization.width' must be of type 'integer'"
        );

        let error = load(&mut config, "[browsers]\nhide = [\"Opera\", 3]").unwrap_err();
        assert_eq!(
            error.to_string(),
            "setting 'browsers.hide' must be of type 'list of strings'"
        );

        let error = load(&mut config, "[browsers]\npreferred = \"Opera\"").unwrap_err();
        assert!(matches!(error, ConfigError::WrongType { .. }));
    }

    #[test]
    fn test_width_range() {
        for width in [0, -5, 101, 1000] {
            let mut config = Configuration::default();
            let error = load(&mut config, &format!("[customization]\nwidth = {width}")).unwrap_err();
            assert!(matches!(error, ConfigError::WidthOutOfRange(w) if w == width));
        }

        let mut config = Configuration::default();
        load(&mut config, "[customization]\nwidth = 100").unwrap();
        assert_eq!(config.customization.width, 100);
    }

    #[test]
    fn test_unknown_names_are_fatal() {
        let mut config = Configuration::default();
        let error = load(&mut config, "[browsers]\nshow = [\"Netscape\"]").unwrap_err();
        assert_eq!(
            error.to_string(),
            "[browsers] 'Netscape' is not the name of a browser"
        );

        let error = load(&mut config, "[search_engines]\ndefault = \"AltaVista\"").unwrap_err();
        assert_eq!(
            error.to_string(),
            "[search_engines] 'AltaVista' is not the name of a search engine"
        );
    }

    #[test]
    fn test_unknown_settings_ignored() {
        let mut config = Configuration::default();
        load(&mut config, "[main]\ncolour = \"red\"\n[plugins]\nx = 1").unwrap();
        assert_eq!(config.main, crate::config::MainConfig::default());
    }

    #[test]
    fn test_lists_accumulate_and_clear() {
        let mut config = Configuration::default();
        load(&mut config, "[browsers]\nhide = [\"Opera\"]\npreferred = [\"Firefox\"]").unwrap();
        load(&mut config, "[browsers]\nhide = [\"Vivaldi\", \"Opera\"]\npreferred = [\"Brave\"]").unwrap();

        assert_eq!(
            browser_names(&config, &config.browsers.hide),
            vec!["Opera", "Vivaldi"]
        );
        assert_eq!(
            browser_names(&config, &config.browsers.preferred),
            vec!["Brave", "Firefox"]
        );

        load(&mut config, "[browsers]\nhide = []").unwrap();
        assert!(config.browsers.hide.is_empty());
        assert_eq!(config.browsers.preferred.len(), 2);
    }

    #[test]
    fn test_custom_entries() {
        let mut config = Configuration::default();
        load(
            &mut config,
            r#"
            [search_engine.Searx]
            url = "https://searx.example/search"
            private = true
            aliases = ["sx"]

            [browser."Firefox Dev"]
            executable = "firefox-developer-edition"
            arguments = ["-P", "dev"]
            base = "Firefox"
            search_engine = "Searx"
            private_arguments = ["--private-window"]

            [browsers]
            preferred = ["Firefox Dev"]

            [search_engines]
            show = ["Searx"]
            "#,
        )
        .unwrap();

        let searx = config.catalog.search_engines.find("Searx").unwrap();
        let engine = config.catalog.search_engine(searx);
        assert!(engine.is_private());
        assert!(engine.escapes());
        assert_eq!(engine.aliases(), ["searx", "sx"]);

        let dev = config.catalog.browsers.lookup("Firefox Dev").unwrap();
        assert_eq!(dev.executable(), "firefox-developer-edition");
        assert_eq!(dev.arguments(), ["-P", "dev"]);
        assert_eq!(dev.base(), config.catalog.browsers.find("Firefox"));
        assert_eq!(dev.search_engine(), Some(searx));
        assert_eq!(
            browser_names(&config, &config.browsers.preferred),
            vec!["Firefox Dev"]
        );
    }

    #[test]
    fn test_custom_browser_requires_arguments() {
        let mut config = Configuration::default();
        let error = load(&mut config, "[browser.Mine]\nexecutable = \"mine\"").unwrap_err();
        match error {
            ConfigError::InvalidDeclaration { section, name, reason } => {
                assert_eq!(section, "browser");
                assert_eq!(name, "Mine");
                assert!(reason.contains("arguments"));
            }
            other => panic!("expected InvalidDeclaration, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_search_engine_requires_url() {
        let mut config = Configuration::default();
        let error = load(&mut config, "[search_engine.Mine]\nprivate = true").unwrap_err();
        assert!(matches!(error, ConfigError::InvalidDeclaration { ref reason, .. } if reason.contains("url")));
    }

    #[test]
    fn test_custom_browser_unknown_base() {
        let mut config = Configuration::default();
        let error = load(
            &mut config,
            "[browser.Mine]\narguments = []\nbase = \"Netscape\"",
        )
        .unwrap_err();
        assert!(error.to_string().contains("'Netscape' is not the name of a browser"));
    }

    #[test]
    fn test_custom_browser_based_on_custom_browser() {
        let mut config = Configuration::default();
        load(
            &mut config,
            r#"
            [browser.Alpha]
            arguments = []
            base = "Zeta"

            [browser.Zeta]
            arguments = []
            base = "Firefox"
            "#,
        )
        .unwrap();

        let zeta = config.catalog.browsers.find("Zeta").unwrap();
        let alpha = config.catalog.browsers.lookup("Alpha").unwrap();
        assert_eq!(alpha.base(), Some(zeta));
    }

    #[test]
    fn test_custom_browser_base_cycle() {
        let mut config = Configuration::default();
        let error = load(
            &mut config,
            "[browser.A]\narguments = []\nbase = \"B\"\n[browser.B]\narguments = []\nbase = \"A\"",
        )
        .unwrap_err();
        assert!(error.to_string().contains("cycle"));
    }

    #[test]
    fn test_redeclared_browser_cannot_close_base_cycle() {
        let mut config = Configuration::default();
        let error = load(&mut config, "[browser.Chromium]\narguments = []\nbase = \"Brave\"").unwrap_err();
        assert!(matches!(
            error,
            ConfigError::InvalidDeclaration { ref name, ref reason, .. }
                if name == "Chromium" && reason.contains("'Brave' is already based on 'Chromium'")
        ));

        let error = load(&mut config, "[browser.Firefox]\narguments = []\nbase = \"Firefox\"").unwrap_err();
        assert!(matches!(error, ConfigError::InvalidDeclaration { .. }));

        let chromium = config.catalog.browsers.find("Chromium").unwrap();
        assert_eq!(config.catalog.browser(chromium).base(), None);
    }

    #[test]
    fn test_redeclared_browser_with_unrelated_base() {
        let mut config = Configuration::default();
        load(&mut config, "[browser.Brave]\narguments = [\"--new-window\"]\nbase = \"Firefox\"").unwrap();

        let firefox = config.catalog.browsers.find("Firefox").unwrap();
        let brave = config.catalog.browsers.lookup("Brave").unwrap();
        assert_eq!(brave.base(), Some(firefox));
        assert_eq!(brave.arguments(), ["--new-window"]);
    }

    #[test]
    fn test_sources_loaded_once() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_config(
            dir.path(),
            "first.toml",
            "[main]\nsources = [\"second.toml\"]\n[browsers]\nhide = [\"Opera\"]",
        );
        write_config(
            dir.path(),
            "second.toml",
            "[main]\nsources = [\"first.toml\"]\n[browsers]\npreferred = [\"Brave\"]",
        );

        let mut config = Configuration::default();
        let mut parser = ConfigParser::new(&mut config);
        assert!(parser.load_file(&first).unwrap());
        assert!(!parser.load_file(&first).unwrap());

        assert_eq!(config.loaded_files().count(), 2);
        assert_eq!(browser_names(&config, &config.browsers.hide), vec!["Opera"]);
        assert_eq!(browser_names(&config, &config.browsers.preferred), vec!["Brave"]);
    }

    #[test]
    fn test_sources_override_including_file() {
        let dir = tempfile::tempdir().unwrap();
        let main = write_config(
            dir.path(),
            "main.toml",
            "[main]\nlang = \"de\"\nsources = [\"extra.toml\"]",
        );
        write_config(dir.path(), "extra.toml", "[main]\nlang = \"it\"");

        let mut config = Configuration::default();
        ConfigParser::new(&mut config).load_file(&main).unwrap();
        assert_eq!(config.main.language.as_deref(), Some("it"));

        let dir = fs::canonicalize(dir.path()).unwrap();
        assert_eq!(config.main.sources, vec![dir.join("extra.toml")]);
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let main = write_config(dir.path(), "main.toml", "[main]\nsources = [\"gone.toml\"]");

        let mut config = Configuration::default();
        let error = ConfigParser::new(&mut config).load_file(&main).unwrap_err();
        assert!(error.is_location_error());
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write_config(dir.path(), "broken.toml", "[main\nlang = ");

        let mut config = Configuration::default();
        let error = ConfigParser::new(&mut config).load_file(&broken).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }
}
