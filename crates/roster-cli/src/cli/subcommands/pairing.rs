use clap::Subcommand;

/// Mentor assignment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PairingCommands {
    /// Report which of the given students already have a mentor.
    Check {
        indexes: Vec<String>,
        /// Read index numbers from a roster file instead.
        #[arg(long, conflicts_with = "indexes")]
        file: Option<String>,
    },
    /// Assign students to one staff member, replacing any current mentor.
    Assign {
        staff_id: String,
        indexes: Vec<String>,
        /// Read index numbers from a roster file instead.
        #[arg(long, conflicts_with = "indexes")]
        file: Option<String>,
    },
    /// List a staff member's active mentees, oldest first.
    Mentees { staff_id: String },
    /// End a student's current assignment.
    Release { index: String },
}
