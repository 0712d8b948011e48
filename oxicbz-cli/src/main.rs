//! OxiCBZ CLI - comic book archive utility
//!
//! Inspect, pack, list and verify CBZ archives with ComicInfo.xml metadata.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{PackOptions, cmd_info, cmd_list, cmd_pack, cmd_verify};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "oxicbz")]
#[command(author, version, about = "Comic book archive (CBZ) utility")]
#[command(long_about = "
OxiCBZ packs page images and ComicInfo.xml metadata into CBZ archives and
reads them back.

Examples:
  oxicbz info book.cbz
  oxicbz info book.cbz --json
  oxicbz pack book.cbz 'pages/*.jpg' --title \"The Long Night\" --writer \"A. Writer\"
  oxicbz pack book.cbz cover.png 'pages/*.jpg' --metadata info.json
  oxicbz list book.cbz
  oxicbz verify book.cbz
")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the metadata of an archive
    #[command(alias = "i")]
    Info {
        /// Archive to inspect
        archive: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Create an archive from page images
    #[command(alias = "p")]
    Pack {
        /// Output archive
        output: PathBuf,

        /// Page images or glob patterns, in page order
        #[arg(required = true)]
        images: Vec<String>,

        /// Metadata as JSON, used as the starting point
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        /// Title
        #[arg(long)]
        title: Option<String>,

        /// Series name
        #[arg(long)]
        series: Option<String>,

        /// Issue number
        #[arg(long)]
        number: Option<String>,

        /// Writer (repeatable)
        #[arg(long)]
        writer: Vec<String>,

        /// Keep page metadata as given instead of describing each image
        #[arg(long)]
        no_pages: bool,
    },

    /// List the entries of an archive
    #[command(alias = "l")]
    List {
        /// Archive to list
        archive: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Check every entry's CRC-32 and the metadata
    #[command(alias = "t")]
    Verify {
        /// Archive to verify
        archive: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Info { archive, json } => cmd_info(&archive, json),
        Commands::Pack {
            output,
            images,
            metadata,
            title,
            series,
            number,
            writer,
            no_pages,
        } => cmd_pack(&PackOptions {
            output: &output,
            images: &images,
            metadata: metadata.as_deref(),
            title,
            series,
            number,
            writer,
            describe_pages: !no_pages,
            progress: !cli.verbose,
        }),
        Commands::List { archive, json } => cmd_list(&archive, json),
        Commands::Verify { archive } => cmd_verify(&archive, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
