//! CLI entry point for mdfolio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mdfolio::commands;

#[derive(Parser)]
#[command(name = "mdfolio")]
#[command(version)]
#[command(about = "Index markdown blog posts and navigate their outlines", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Only posts carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a single post
    Show {
        slug: String,

        #[arg(long)]
        json: bool,
    },

    /// List tags with post counts
    Tags,

    /// Search post titles and excerpts
    Search {
        query: String,

        #[arg(long)]
        json: bool,
    },

    /// Print the heading outline of a post
    #[command(alias = "toc")]
    Outline {
        slug: String,

        #[arg(long)]
        json: bool,
    },

    /// Render a post body to HTML
    Render {
        slug: String,

        /// Prepend the outline as a nav block
        #[arg(long)]
        toc: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdfolio=debug,info"
    } else {
        "mdfolio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let load = || mdfolio::Folio::new(&base_dir);

    match cli.command {
        Commands::List { tag, json } => commands::list::run(&load()?, tag.as_deref(), json)?,
        Commands::Show { slug, json } => commands::show::run(&load()?, &slug, json)?,
        Commands::Tags => commands::tags::run(&load()?)?,
        Commands::Search { query, json } => commands::search::run(&load()?, &query, json)?,
        Commands::Outline { slug, json } => commands::outline::run(&load()?, &slug, json)?,
        Commands::Render { slug, toc } => commands::render::run(&load()?, &slug, toc)?,
        Commands::Version => {
            println!("mdfolio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
