//! CLI entry point for mdxblog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mdxblog::commands::list::ListKind;
use mdxblog::content::Projection;

#[derive(Parser)]
#[command(name = "mdxblog")]
#[command(author = "Hasan Kharouf")]
#[command(version)]
#[command(about = "A static blog generator for categorised MDX posts", long_about = None)]
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
    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Clean the public folder
    Clean,

    /// List posts or categories
    List {
        /// Type of content to list (post, category)
        #[arg(default_value = "post")]
        r#type: ListKind,

        /// Only list posts in this category
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Comma-separated fields to show
        #[arg(short, long, default_value = "slug,date,title")]
        fields: Projection,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a single post by `category/slug`
    Show {
        slug: String,

        /// Comma-separated fields to show
        #[arg(short, long, default_value = "slug,title,date,description,image")]
        fields: Projection,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdxblog=debug,info"
    } else {
        "mdxblog=info"
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
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Generate => {
            let blog = mdxblog::Blog::new(&base_dir)?;
            tracing::info!("Generating static files from {:?}", blog.posts_dir);
            blog.generate()?;
            println!("Generated successfully!");
        }

        Commands::Clean => {
            let blog = mdxblog::Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List {
            r#type,
            category,
            fields,
            json,
        } => {
            let blog = mdxblog::Blog::new(&base_dir)?;
            mdxblog::commands::list::run(&blog, r#type, category.as_deref(), &fields, json)?;
        }

        Commands::Show { slug, fields, json } => {
            let blog = mdxblog::Blog::new(&base_dir)?;
            mdxblog::commands::show::run(&blog, &slug, &fields, json)?;
        }

        Commands::Version => {
            println!("mdxblog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
