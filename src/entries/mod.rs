//! Browsers, search engines and the registries holding them
//!
//! An entry is anything the user can pick from a menu: it has a display
//! name, a utility (an executable for browsers, a URL for search engines)
//! and a list of aliases shown next to the name to help fuzzy matching.

mod browser;
mod catalog;
mod registry;
mod search_engine;

pub use browser::Browser;
pub use catalog::{Catalog, DEFAULT_BROWSER, DEFAULT_SEARCH_ENGINE};
pub use registry::{Id, Registry};
pub use search_engine::{DEFAULT_SEARCH_FIELD, SearchEngine};

/// Id of a registered browser
pub type BrowserId = Id<Browser>;

/// Id of a registered search engine
pub type EngineId = Id<SearchEngine>;

/// Shared shape of browsers and search engines
pub trait Entry {
    /// Display name, also the registry key
    fn name(&self) -> &str;

    /// Executable name or URL
    fn utility(&self) -> &str;

    /// Aliases, utility and lower-cased name first
    fn aliases(&self) -> &[String];

    /// Render the entry as a markup row for the menu
    ///
    /// The aliases are dimmed with `aliases_color` using Pango markup, which
    /// the menu interprets when started with `-markup-rows`.
    fn menu_line(&self, aliases_color: &str) -> String {
        format!(
            "{} <span color=\"{}\">{}</span>",
            escape_markup(self.name()),
            aliases_color,
            escape_markup(&self.aliases().join(" "))
        )
    }
}

/// Build the alias list of an entry
///
/// Leading aliases are added in the order given, each only if not already
/// present, so `leading = [utility, lower_name]` yields
/// `[utility, lower_name, extra...]`.
fn with_leading_aliases(mut aliases: Vec<String>, leading: &[&str]) -> Vec<String> {
    for alias in leading.iter().rev() {
        if !aliases.iter().any(|a| a == alias) {
            aliases.insert(0, (*alias).to_string());
        }
    }
    aliases
}

fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
