//! CLI entry point for garden-rs

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use garden_rs::{commands, server, Garden};

#[derive(Parser)]
#[command(name = "garden-rs")]
#[command(version)]
#[command(about = "Render a digital garden of markdown posts linked with [[wiki links]]", long_about = None)]
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
    /// Create a new markdown post
    New {
        /// Title of the new post
        title: String,

        /// Slug for the new post (derived from the title otherwise)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Start a development server that renders on every request
    #[command(alias = "s")]
    Server {
        /// Port to listen on (defaults to server.port in _config.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.ip in _config.yml)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Report wiki links that point at no post
    Check {
        /// Exit with an error when any dead link is found
        #[arg(long)]
        strict: bool,
    },

    /// Clean the public folder
    Clean,

    /// List garden content (posts, topics, links)
    List {
        #[arg(default_value = "posts")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "garden_rs=debug,info"
    } else {
        "garden_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::New { title, slug } => {
            let garden = Garden::new(&base_dir)?;
            let path = commands::new::create_post(&garden, &title, slug.as_deref())?;
            println!("Created: {}", path.display());
        }

        Commands::Generate => {
            let garden = Garden::new(&base_dir)?;
            tracing::info!("Generating static files...");
            garden.generate()?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let garden = Garden::new(&base_dir)?;
            let port = port.unwrap_or(garden.config.server.port);
            let ip = ip.unwrap_or_else(|| garden.config.server.ip.clone());
            tracing::info!("Starting server at http://{}:{}", ip, port);
            server::start(&garden, &ip, port).await?;
        }

        Commands::Check { strict } => {
            let garden = Garden::new(&base_dir)?;
            let dead = commands::check::run(garden.content_source().as_ref())?;
            if strict && dead > 0 {
                bail!("{} dead link(s) found", dead);
            }
        }

        Commands::Clean => {
            let garden = Garden::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            garden.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let garden = Garden::new(&base_dir)?;
            commands::list::run(garden.content_source().as_ref(), &r#type)?;
        }

        Commands::Version => {
            println!("garden-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
