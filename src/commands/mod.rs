//! Command implementations
//!
//! Each command is a module with an execute function run instead of the
//! interactive menu.

pub mod init;
pub mod list;

// Re-export execute functions for convenience
pub use init::execute as init;
pub use list::browsers as list_browsers;
pub use list::search_engines as list_search_engines;
