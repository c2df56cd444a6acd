use clap::ValueEnum;

/// How command responses are printed on stdout.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Key/value and column tables for people at a terminal.
    Table,
    /// Single-line JSON for piping.
    Raw,
}

/// Flags accepted by every subcommand, copied out of [`super::Cli`] once
/// parsing is done.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    /// Row cap for list commands; `general.default_limit` applies when absent.
    pub limit: Option<u32>,
    pub quiet: bool,
    pub verbose: bool,
    pub project: Option<String>,
}
