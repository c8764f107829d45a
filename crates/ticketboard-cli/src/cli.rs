use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ticketboard")]
#[command(about = "A kanban ticket board with drag-and-drop ordering", long_about = None)]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    /// Path to the board state file (or set TICKETBOARD_FILE env var)
    #[arg(value_name = "FILE", env = "TICKETBOARD_FILE")]
    pub file: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the board columns, fetching sample tickets on first run
    Show(ShowArgs),
    /// Apply a drop: onto a column id (TODO/IN_PROGRESS/DONE) or a ticket id
    Move(MoveArgs),
    /// Set or clear a ticket's priority
    SetPriority(SetPriorityArgs),
    /// List the tags available for filtering
    Tags,
    /// Reset the board to its initial empty state
    Reset,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Filter by name/description substring (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by tags, comma-separated, OR-combined
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    /// Filter by priority (low, medium, high)
    #[arg(long)]
    pub priority: Option<String>,

    /// Clear all stored filters first
    #[arg(long)]
    pub clear_filters: bool,
}

#[derive(Args)]
pub struct MoveArgs {
    /// The dragged ticket
    #[arg(long)]
    pub id: String,

    /// The drop target: a column id or another ticket id
    #[arg(long)]
    pub onto: String,
}

#[derive(Args)]
pub struct SetPriorityArgs {
    #[arg(long)]
    pub id: String,

    /// New priority (low, medium, high); omit to clear
    #[arg(long)]
    pub priority: Option<String>,
}
