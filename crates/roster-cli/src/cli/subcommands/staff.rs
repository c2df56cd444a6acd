use clap::Subcommand;

/// Staff directory commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StaffCommands {
    /// Add a staff member.
    Add {
        #[arg(long)]
        given_name: String,
        #[arg(long)]
        family_name: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        email: Option<String>,
        /// Add as inactive (receives no mentees until activated).
        #[arg(long)]
        inactive: bool,
    },
    /// Import staff from a JSON array or JSON Lines file.
    Import { file: String },
    /// List staff.
    List {
        #[arg(long)]
        department: Option<String>,
        /// Only staff who can receive mentees.
        #[arg(long)]
        active: bool,
    },
    /// Make a staff member eligible for allocation.
    Activate { id: String },
    /// Stop allocating mentees to a staff member.
    Deactivate { id: String },
}
