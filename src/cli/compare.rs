use std::path::Path;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::header::extract_header;
use crate::matching::scoring::HeaderComparison;

#[derive(Args)]
pub struct CompareArgs {
    /// First header text, or a chapter file with --files
    #[arg(required = true)]
    pub header_a: String,

    /// Second header text, or a chapter file with --files
    #[arg(required = true)]
    pub header_b: String,

    /// Treat both arguments as chapter files and compare their headers
    #[arg(long)]
    pub files: bool,
}

/// Execute the compare command
///
/// # Errors
///
/// Returns an error if `--files` is given and either file cannot be read.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (header_a, header_b) = if args.files {
        (
            read_header(Path::new(&args.header_a))?,
            read_header(Path::new(&args.header_b))?,
        )
    } else {
        (args.header_a.clone(), args.header_b.clone())
    };

    if verbose && args.files {
        eprintln!("Header A: {header_a:?}");
        eprintln!("Header B: {header_b:?}");
    }

    let comparison = HeaderComparison::calculate(&header_a, &header_b);

    match format {
        OutputFormat::Text => print_text_comparison(&comparison),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        OutputFormat::Tsv => print_tsv_comparison(&comparison),
    }

    Ok(())
}

fn read_header(path: &Path) -> anyhow::Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(extract_header(&text).to_string())
}

fn print_text_comparison(cmp: &HeaderComparison) {
    println!("Header Comparison");
    println!("{}", "=".repeat(60));

    println!("\nHeader A: {}", cmp.header_a);
    println!("  Normalized: {}", display_key(&cmp.normalized_a));
    println!("\nHeader B: {}", cmp.header_b);
    println!("  Normalized: {}", display_key(&cmp.normalized_b));

    println!("\nSimilarity: {:.1}%", cmp.score * 100.0);
    println!("Same index key: {}", if cmp.same_key { "yes" } else { "no" });
}

fn print_tsv_comparison(cmp: &HeaderComparison) {
    println!("normalized_a\tnormalized_b\tscore\tsame_key");
    println!(
        "{}\t{}\t{:.4}\t{}",
        cmp.normalized_a, cmp.normalized_b, cmp.score, cmp.same_key
    );
}

fn display_key(normalized: &str) -> &str {
    if normalized.is_empty() {
        "(empty)"
    } else {
        normalized
    }
}
