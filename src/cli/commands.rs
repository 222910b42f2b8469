use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "taxon", about = concat!("taxon v", env!("CARGO_PKG_VERSION"), " - reorder and reparent category trees"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./taxon.toml when present)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the catalog as an indented tree in display order
    Tree(FileArgs),
    /// Validate catalog integrity
    Check(FileArgs),
    /// Report duplicate names among siblings
    Names(FileArgs),
    /// Check whether a move would be accepted, without applying it
    Validate(MoveArgs),
    /// Move a category to a position in the display list
    Mv(MvArgs),
    /// Renumber every sibling group to 1..N
    Tidy(TidyArgs),
}

#[derive(Args)]
pub struct FileArgs {
    /// Catalog JSON file
    pub file: String,
}

#[derive(Args)]
pub struct MoveArgs {
    /// Catalog JSON file
    pub file: String,
    /// Category id (or temporary id)
    pub key: String,
    /// Drop position in the display list (0-indexed)
    pub index: usize,
}

#[derive(Args)]
pub struct MvArgs {
    #[command(flatten)]
    pub target: MoveArgs,
    /// Save the result back to the file
    #[arg(long)]
    pub write: bool,
}

#[derive(Args)]
pub struct TidyArgs {
    /// Catalog JSON file
    pub file: String,
    /// Save the result back to the file
    #[arg(long)]
    pub write: bool,
}
