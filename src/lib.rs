//! notegraph - link extraction, backlinks, graphs and search for markdown vaults

pub mod backlinks;
pub mod cli;
pub mod domain;
pub mod graph;
pub mod infra;
pub mod parser;
pub mod search;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_backlinks, handle_graph, handle_index, handle_links, handle_meta, handle_search,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    cli::logging::init(cli.verbose);

    let config = Config::load()?;
    let notes_dir = config.notes_dir(cli.dir.as_ref());

    match &cli.command {
        Command::Index(args) => handle_index(args, &notes_dir, &config),
        Command::Links(args) => handle_links(args, &notes_dir),
        Command::Backlinks(args) => handle_backlinks(args, &notes_dir),
        Command::Meta(args) => handle_meta(args, &notes_dir),
        Command::Graph(args) => handle_graph(args, &notes_dir, &config),
        Command::Search(args) => handle_search(args, &notes_dir, &config),
        Command::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "notegraph",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
