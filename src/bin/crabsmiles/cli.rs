use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "crabsmiles",
    about = "Tokenize, parse and inspect SMILES strings",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the scanned tokens
    #[command(visible_alias = "t")]
    Tokens(InputArgs),

    /// Show the parse tree with resolved ring closures
    #[command(visible_alias = "p")]
    Tree(InputArgs),

    /// Summarize the molecular graph
    #[command(visible_alias = "g")]
    Graph(InputArgs),

    /// Parse and write back normalized SMILES
    #[command(visible_alias = "w")]
    Write(InputArgs),
}

/// Input and output options shared by all commands.
#[derive(Args)]
pub struct InputArgs {
    /// SMILES string (read one per line from stdin if omitted)
    #[arg(value_name = "SMILES")]
    pub smiles: Option<String>,

    /// Emit one JSON document per input instead of text
    #[arg(long)]
    pub json: bool,

    /// Reject inputs longer than this many bytes
    #[arg(long, value_name = "BYTES", default_value_t = 4096)]
    pub max_len: usize,
}

pub fn parse() -> Cli {
    Cli::parse()
}
