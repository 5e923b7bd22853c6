//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod logging;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// notegraph - links, backlinks, graphs and search over a markdown vault
#[derive(Parser, Debug)]
#[command(name = "notegraph", version, about, long_about = None)]
pub struct Cli {
    /// Vault directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Recompute and store backlinks for every note
    Index(IndexArgs),

    /// List a note's outgoing links
    Links(LinksArgs),

    /// Show notes linking to a note
    Backlinks(BacklinksArgs),

    /// Show derived metadata and frontmatter of a note
    Meta(MetaArgs),

    /// Build the link graph of the vault or around one note
    Graph(GraphArgs),

    /// Full-text search across notes
    Search(SearchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `index` command
#[derive(Parser, Debug)]
pub struct IndexArgs {
    /// Characters of surrounding line kept per backlink (overrides config)
    #[arg(long)]
    pub context_length: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `links` command
#[derive(Parser, Debug)]
pub struct LinksArgs {
    /// Note ID, title or path
    pub note: String,

    /// Only show links whose target does not match any note title
    #[arg(long)]
    pub unresolved: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `backlinks` command
#[derive(Parser, Debug)]
pub struct BacklinksArgs {
    /// Note ID, title or path
    pub note: String,

    /// List every link occurrence instead of one line per source note
    #[arg(short, long)]
    pub all: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `meta` command
#[derive(Parser, Debug)]
pub struct MetaArgs {
    /// Note ID, title or path
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `graph` command
#[derive(Parser, Debug)]
pub struct GraphArgs {
    /// Restrict the graph to the neighbourhood of this note
    #[arg(short, long)]
    pub local: Option<String>,

    /// Hops to follow from the local note (overrides config)
    #[arg(long, requires = "local")]
    pub depth: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query (supports tag:NAME and path:FRAGMENT filters)
    pub query: String,

    /// Maximum number of results (overrides config)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_dir_after_subcommand() {
        let cli = Cli::try_parse_from(["notegraph", "links", "Home", "--dir", "/tmp/vault"])
            .expect("valid arguments");
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/vault")));
        match cli.command {
            Command::Links(args) => assert_eq!(args.note, "Home"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn counts_verbosity() {
        let cli = Cli::try_parse_from(["notegraph", "-vv", "index"]).expect("valid arguments");
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn depth_requires_local() {
        assert!(Cli::try_parse_from(["notegraph", "graph", "--depth", "2"]).is_err());
        assert!(Cli::try_parse_from(["notegraph", "graph", "--local", "A", "--depth", "2"]).is_ok());
    }

    #[test]
    fn format_defaults_to_human() {
        let cli = Cli::try_parse_from(["notegraph", "search", "rust"]).expect("valid arguments");
        match cli.command {
            Command::Search(args) => {
                assert!(matches!(args.format, OutputFormat::Human));
                assert_eq!(args.limit, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
