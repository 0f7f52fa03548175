use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let table_color = table_color(
        flags,
        std::io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
    );

    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    let _ = UI_PREFS.set(UiPrefs {
        table_color,
        term_width,
    });
}

/// Color only ever applies to table output; `auto` also needs a quiet-free tty
/// and no `NO_COLOR`.
fn table_color(flags: &GlobalFlags, is_tty: bool, no_color: bool) -> bool {
    if flags.format != OutputFormat::Table {
        return false;
    }
    match flags.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => is_tty && !flags.quiet && !no_color,
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        term_width: None,
    })
}
