//! OxiPack CLI - Huffman, LZW and `.zl` archives
//!
//! A Pure Rust compression utility with three formats: `.hh` (Huffman),
//! `.ll` (LZW) and `.zl` (LZW-compressed multi-file archives).

mod commands;
mod utils;

use clap::{Args, Parser, Subcommand};
use commands::{CompressOptions, Method};
use oxipack_core::OverwritePolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxipack")]
#[command(
    author,
    version,
    about = "Pure Rust Huffman/LZW compression and archiving"
)]
#[command(long_about = "
OxiPack compresses files with static Huffman coding (.hh) or LZW (.ll),
and bundles files into LZW-compressed archives (.zl).

Examples:
  oxipack huff notes.txt            # -> notes.txt.hh
  oxipack lzw 'logs/*.log'          # -> one .ll per matching file
  oxipack arc bundle a.txt b.txt    # -> bundle.zl
  oxipack extract notes.txt.hh bundle.zl -o out
  oxipack list bundle.zl --json
")]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress files with Huffman coding (appends .hh)
    Huff {
        /// Files or glob patterns to compress
        #[arg(required = true)]
        files: Vec<String>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Compress files with LZW (appends .ll)
    Lzw {
        /// Files or glob patterns to compress
        #[arg(required = true)]
        files: Vec<String>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Create an LZW-compressed archive (appends .zl)
    #[command(alias = "a")]
    Arc {
        /// Archive to create
        archive: PathBuf,

        /// Files or glob patterns to add, stored by the path given
        #[arg(required = true)]
        files: Vec<String>,

        /// Replace an existing archive
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress .hh/.ll files and unpack .zl archives
    #[command(alias = "x")]
    Extract {
        /// Files or glob patterns to extract
        #[arg(required = true)]
        files: Vec<String>,

        /// Output directory (defaults to next to each .hh/.ll, `.` for archives)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// List the contents of a .zl archive
    #[command(alias = "l")]
    List {
        /// Archive to list
        archive: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

/// Flags shared by the multi-file commands.
#[derive(Args)]
struct CommonArgs {
    /// Overwrite existing output files (not allowed when extracting .zl archives)
    #[arg(short, long)]
    force: bool,

    /// Show progress bar
    #[arg(short = 'P', long)]
    progress: bool,
}

impl CommonArgs {
    fn options(&self) -> CompressOptions {
        CompressOptions {
            policy: overwrite_policy(self.force),
            progress: self.progress,
        }
    }
}

fn overwrite_policy(force: bool) -> OverwritePolicy {
    if force {
        OverwritePolicy::Truncate
    } else {
        OverwritePolicy::FailIfExists
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Huff { files, common } => {
            commands::cmd_compress(Method::Huffman, &files, &common.options())
        }
        Commands::Lzw { files, common } => {
            commands::cmd_compress(Method::Lzw, &files, &common.options())
        }
        Commands::Arc {
            archive,
            files,
            force,
        } => commands::cmd_archive(&archive, &files, overwrite_policy(force)),
        Commands::Extract {
            files,
            output,
            common,
        } => commands::cmd_extract(&files, output.as_deref(), &common.options()),
        Commands::List { archive, json } => commands::cmd_list(&archive, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
