//! rofi-search application entry point
//!
//! Opens a rofi (or wofi) prompt, lets the user switch browser, search
//! engine, language and privacy with custom keybindings, then opens the
//! search in the chosen browser.
//!
//! # Usage
//!
//! ```bash
//! # Interactive search
//! rofi-search
//!
//! # Search right away, privately, with a given browser
//! rofi-search -p --use-browser Librewolf rust borrow checker
//!
//! # Print what would be opened instead of opening it
//! rofi-search -d rust
//!
//! # Inspect the known browsers and search engines
//! rofi-search --list-browsers
//! rofi-search --list-search-engines
//!
//! # Write a commented configuration file
//! rofi-search --make-init-config
//! ```
//!
//! # Exit codes
//!
//! `0` success, `1` invalid configuration path, `2` invalid configuration,
//! `3` menu failure.

use rofi_search::{
    AppError, ExitCode,
    cli::Cli,
    commands,
    config::{ConfigLocation, Configuration, user_config},
    launcher::{DryRunLauncher, Launcher, ProcessLauncher},
    menu::RofiMenu,
    session::Session,
    system::{Environment, PathLookup, SystemLocales},
};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, AppError>;

/// Log to stderr; `RUST_LOG` wins over the `--debug` default
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<Configuration> {
    let user = user_config();
    let file = cli.configuration_file.as_ref().map(ConfigLocation::new);

    let config = Configuration::load(
        Environment::capture(),
        user.as_ref(),
        file.as_ref(),
        &cli.overrides_document(),
    )?;
    Ok(config.with_debug(cli.debug))
}

fn run(cli: &Cli) -> Result<ExitCode> {
    if cli.make_init_config {
        commands::init()?;
        return Ok(ExitCode::Success);
    }

    let config = load_config(cli)?;
    let installed = PathLookup;

    if cli.list_browsers {
        commands::list_browsers(&config, &installed);
        return Ok(ExitCode::Success);
    }
    if cli.list_search_engines {
        commands::list_search_engines(&config);
        return Ok(ExitCode::Success);
    }

    let launcher: &dyn Launcher = if config.debug {
        &DryRunLauncher
    } else {
        &ProcessLauncher
    };
    let locales = SystemLocales::new();
    let mut session = Session::new(&config, &installed, &locales);

    if let Some(terms) = cli.search_terms() {
        session.search(terms, launcher)?;
        return Ok(ExitCode::Success);
    }

    let menu = RofiMenu::from_config(&config);
    session.run(&menu, launcher)
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    match run(&cli) {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code().into()
        }
    }
}
