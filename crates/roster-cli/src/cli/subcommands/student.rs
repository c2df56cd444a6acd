use clap::Subcommand;

/// Student record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StudentCommands {
    /// List students ordered by index number, with their mentor.
    List {
        #[arg(long)]
        department: Option<String>,
        /// Only students with no active mentor.
        #[arg(long, conflicts_with = "mentor")]
        unassigned: bool,
        /// Only active mentees of this staff id.
        #[arg(long, value_name = "STAFF_ID")]
        mentor: Option<String>,
    },
    /// Get a student and their active mentor.
    Get { index: String },
}
