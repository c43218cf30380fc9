use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dotbundle",
    about = "Install an agent configuration bundle into ~/.claude",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Bundle source passed to `git clone` [default: built-in bundle URL]
    pub source: Option<String>,

    /// Installation directory [default: ~/.claude]
    #[arg(long, env = "DOTBUNDLE_TARGET", global = true)]
    pub target: Option<String>,

    /// Home file copied aside before the bundle shadows it [default: ~/CLAUDE.md]
    #[arg(long)]
    pub home_file: Option<String>,

    /// Replace an existing installation without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Print what would happen and exit without touching anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check an existing installation without fetching anything
    Verify,

    /// List installed role names
    Roles,
}
