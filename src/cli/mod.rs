//! Command-line interface for chapter-reconciler.
//!
//! - **reconcile**: match TXT chapters against EPUB chapters and write the canonical corpus
//! - **compare**: show how two headers normalize and score against each other
//!
//! ## Usage
//!
//! ```text
//! # Reconcile using the default directory layout
//! chapter-reconciler reconcile
//!
//! # Custom directories, JSON summary for scripting
//! chapter-reconciler --format json reconcile --epub-dir epub/ --txt-dir txt/ --output-dir out/
//!
//! # Settings from a file, one flag overridden
//! chapter-reconciler reconcile --config book.toml --output-dir out/
//!
//! # Why did these two not line up?
//! chapter-reconciler compare "Chapter 1: Intro" "CHAPTER ONE - INTRO"
//! ```

use clap::{Parser, Subcommand};

pub mod compare;
pub mod reconcile;

#[derive(Parser)]
#[command(name = "chapter-reconciler")]
#[command(version)]
#[command(about = "Reconcile EPUB and TXT chapter splits into one verified chapter set")]
#[command(
    long_about = "chapter-reconciler takes two directories of chapter text files, one split from an EPUB and one split from a plain-text edition, and produces a single ordered set of chapter_NNNN.txt files.\n\nChapters are matched by normalized header. Every decision is logged:\n- merge_log.json for merged pairs\n- rename_log.json for TXT chapters copied under their canonical name\n- rename_errors.log for empty headers and header mismatches"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile the EPUB and TXT chapter directories
    Reconcile(reconcile::ReconcileArgs),

    /// Compare two chapter headers
    Compare(compare::CompareArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
