//! Menu abstraction layer
//!
//! The interactive part of rofi-search is an external dmenu-style program.
//! Each screen is described by a [`MenuRequest`] and handed to a [`Menu`],
//! which answers with the program's exit status and output. The exit status
//! decides the next screen through [`Transition::from_code`].
//!
//! # Backends
//!
//! - **`RofiMenu`** - spawns `rofi`, or `wofi` under Wayland
//! - **`ScriptedMenu`** - replays canned responses, for tests and dry runs
//!
//! # Implementing a Custom Menu
//!
//! ```
//! use rofi_search::menu::{Menu, MenuRequest, MenuResponse, Result};
//!
//! struct AlwaysCancel;
//!
//! impl Menu for AlwaysCancel {
//!     fn show(&self, _request: &MenuRequest) -> Result<MenuResponse> {
//!         Ok(MenuResponse::new(1, ""))
//!     }
//! }
//! ```

mod error;
mod mock;
mod rofi;
mod state;
mod traits;

pub use error::{MenuError, Result};
pub use mock::ScriptedMenu;
pub use rofi::RofiMenu;
pub use state::{MenuState, Transition};
pub use traits::{Menu, MenuRequest, MenuResponse, SelectionFormat};
