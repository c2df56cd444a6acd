use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

/// Narrowest `COLUMNS` value honoured for table layout.
const MIN_TERM_WIDTH: usize = 40;

/// Terminal-dependent rendering choices, fixed once per process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    /// Colour status cells (`active`, `inactive`) in table output.
    pub table_color: bool,
    /// Show spinners on stderr during uploads and imports.
    pub progress: bool,
    pub term_width: Option<usize>,
}

/// What the process could observe about its terminal.
#[derive(Clone, Copy, Debug, Default)]
struct Terminal<'a> {
    stdout_tty: bool,
    stderr_tty: bool,
    no_color: bool,
    columns: Option<&'a str>,
}

impl UiPrefs {
    fn from_terminal(flags: &GlobalFlags, terminal: Terminal<'_>) -> Self {
        Self {
            table_color: terminal.stdout_tty
                && flags.format == OutputFormat::Table
                && !flags.quiet
                && !terminal.no_color,
            progress: terminal.stderr_tty && !flags.quiet,
            term_width: terminal
                .columns
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|width| *width >= MIN_TERM_WIDTH),
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let columns = std::env::var("COLUMNS").ok();
    let prefs = UiPrefs::from_terminal(
        flags,
        Terminal {
            stdout_tty: std::io::stdout().is_terminal(),
            stderr_tty: std::io::stderr().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            columns: columns.as_deref(),
        },
    );
    if UI_PREFS.set(prefs).is_err() {
        tracing::debug!("ui preferences already initialized");
    }
}

/// Preferences set by [`init`]; plain output when `init` never ran.
#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{Terminal, UiPrefs};
    use crate::cli::{GlobalFlags, OutputFormat};

    fn flags(format: OutputFormat, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            format,
            limit: None,
            quiet,
            verbose: false,
            project: None,
        }
    }

    fn tty(columns: Option<&str>) -> Terminal<'_> {
        Terminal {
            stdout_tty: true,
            stderr_tty: true,
            no_color: false,
            columns,
        }
    }

    #[test]
    fn tables_on_a_terminal_are_coloured() {
        let prefs = UiPrefs::from_terminal(&flags(OutputFormat::Table, false), tty(Some("120")));
        assert!(prefs.table_color);
        assert!(prefs.progress);
        assert_eq!(prefs.term_width, Some(120));
    }

    #[test]
    fn quiet_and_no_color_turn_decoration_off() {
        let quiet = UiPrefs::from_terminal(&flags(OutputFormat::Table, true), tty(None));
        assert!(!quiet.table_color);
        assert!(!quiet.progress);

        let no_color = UiPrefs::from_terminal(
            &flags(OutputFormat::Table, false),
            Terminal {
                no_color: true,
                ..tty(None)
            },
        );
        assert!(!no_color.table_color);
    }

    #[test]
    fn json_output_is_never_coloured_and_narrow_widths_are_ignored() {
        let prefs = UiPrefs::from_terminal(&flags(OutputFormat::Json, false), tty(Some("20")));
        assert!(!prefs.table_color);
        assert_eq!(prefs.term_width, None);
    }
}
