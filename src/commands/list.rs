//! List commands - print the known browsers or search engines

use crate::config::Configuration;
use crate::output;
use crate::system::InstallCheck;

/// Print every registered browser, including custom ones
pub fn browsers(config: &Configuration, installed: &dyn InstallCheck) {
    print!("{}", output::browsers_table(config, installed));
}

/// Print every registered search engine, including custom ones
pub fn search_engines(config: &Configuration) {
    print!("{}", output::search_engines_table(config));
}
