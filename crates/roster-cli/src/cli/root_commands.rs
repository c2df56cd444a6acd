use clap::{Args, Subcommand};

use crate::cli::subcommands::{PairingCommands, StaffCommands, StudentCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Initialize roster state (.roster directory and database) for a project.
    Init(InitArgs),
    /// Upload a class roster: upsert students, then allocate mentors when the
    /// batch is a first-year first-semester upload.
    Upload(UploadArgs),
    /// Show score statistics and the allocation an upload would produce,
    /// without writing anything.
    Preview(PreviewArgs),
    /// Staff directory.
    Staff {
        #[command(subcommand)]
        action: StaffCommands,
    },
    /// Student records.
    Student {
        #[command(subcommand)]
        action: StudentCommands,
    },
    /// Mentor assignments.
    Pairing {
        #[command(subcommand)]
        action: PairingCommands,
    },
    /// Dump JSON schema for a registered type.
    Schema(SchemaArgs),
}

/// Arguments for `roster init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to the current directory).
    #[arg(default_value = ".")]
    pub path: String,
}

/// Arguments for `roster upload`.
#[derive(Clone, Debug, Args)]
pub struct UploadArgs {
    /// Roster file: a JSON array of rows, or JSON Lines (`.jsonl`).
    pub file: String,
    /// Admission year for rows that omit it; also decides the trigger.
    #[arg(long)]
    pub year: Option<u16>,
    /// Semester for rows that omit it; also decides the trigger.
    #[arg(long)]
    pub semester: Option<u8>,
    /// Department for rows that omit it; allocators are drawn from it.
    #[arg(long)]
    pub department: Option<String>,
    /// Validate rows and report, without writing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `roster preview`.
#[derive(Clone, Debug, Args)]
pub struct PreviewArgs {
    pub file: String,
    #[arg(long)]
    pub department: String,
}

/// Arguments for `roster schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name; lists the registered names when omitted.
    pub type_name: Option<String>,
}
