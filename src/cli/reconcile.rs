use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::config::ReconcileSettings;
use crate::core::types::DecisionKind;
use crate::matching::engine::{Reconciliation, ReconciliationEngine};
use crate::output::writer::{OutputWriter, WriteSummary};
use crate::parsing::source::load_sources;

#[derive(Args)]
pub struct ReconcileArgs {
    /// TOML settings file; the flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory of chapters split from the EPUB [default: chapters_txt(epub)]
    #[arg(long)]
    pub epub_dir: Option<PathBuf>,

    /// Directory of chapters split from the plain-text book [default: chapters_txt(txt)]
    #[arg(long)]
    pub txt_dir: Option<PathBuf>,

    /// Where canonical chapter files are written [default: chapters_txt]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Merge log path [default: merge_log.json]
    #[arg(long)]
    pub merge_log: Option<PathBuf>,

    /// Rename log path [default: rename_log.json]
    #[arg(long)]
    pub rename_log: Option<PathBuf>,

    /// Error log path, only written when there are errors [default: rename_errors.log]
    #[arg(long)]
    pub error_log: Option<PathBuf>,

    /// Merge a matched pair only when its header score is strictly above this (0.0-1.0)
    /// [default: 1.0]
    #[arg(long)]
    pub merge_threshold: Option<f64>,
}

/// Counts and locations reported after a run
#[derive(Debug, Serialize)]
struct RunReport {
    epub_dir: String,
    txt_dir: String,
    epub_chapters: usize,
    txt_chapters: usize,
    merged: usize,
    unmatched: usize,
    mismatched: usize,
    empty_headers: usize,
    chapters_written: usize,
    output_dir: String,
    merge_log: String,
    rename_log: String,
    error_log: Option<String>,
}

impl RunReport {
    fn new(
        settings: &ReconcileSettings,
        epub_chapters: usize,
        txt_chapters: usize,
        result: &Reconciliation<'_>,
        summary: &WriteSummary,
    ) -> Self {
        Self {
            epub_dir: settings.epub_dir.display().to_string(),
            txt_dir: settings.txt_dir.display().to_string(),
            epub_chapters,
            txt_chapters,
            merged: result.count(DecisionKind::Merged),
            unmatched: result.count(DecisionKind::Unmatched),
            mismatched: result.count(DecisionKind::Mismatched),
            empty_headers: result.empty_header_count(),
            chapters_written: summary.chapters_written,
            output_dir: settings.output_dir.display().to_string(),
            merge_log: settings.merge_log.display().to_string(),
            rename_log: settings.rename_log.display().to_string(),
            error_log: summary.error_log.as_ref().map(|p| p.display().to_string()),
        }
    }
}

/// Execute the reconcile command
///
/// # Errors
///
/// Returns an error if the settings are invalid, either input directory is
/// missing, or any chapter or log cannot be read or written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ReconcileArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let settings = resolve_settings(&args)?;

    if verbose {
        eprintln!(
            "EPUB: {}  TXT: {}  output: {}  merge threshold: {}",
            settings.epub_dir.display(),
            settings.txt_dir.display(),
            settings.output_dir.display(),
            settings.merge_threshold
        );
    }

    let sources = load_sources(&settings.epub_dir, &settings.txt_dir)?;

    if verbose {
        eprintln!(
            "Loaded {} EPUB and {} TXT chapters",
            sources.epub.len(),
            sources.txt.len()
        );
    }

    let engine = ReconciliationEngine::with_config(settings.engine_config());
    let result = engine.reconcile(&sources.epub, &sources.txt);

    let summary = OutputWriter::new(settings.output_paths())
        .write(&result)
        .context("Failed to write reconciled chapters")?;

    let report = RunReport::new(
        &settings,
        sources.epub.len(),
        sources.txt.len(),
        &result,
        &summary,
    );

    match format {
        OutputFormat::Text => print_text_report(&report),
        OutputFormat::Json => print_json_report(&report)?,
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    Ok(())
}

/// Start from the config file (or defaults) and apply command-line overrides
fn resolve_settings(args: &ReconcileArgs) -> anyhow::Result<ReconcileSettings> {
    let mut settings = match &args.config {
        Some(path) => ReconcileSettings::load_from_file(path)?,
        None => ReconcileSettings::default(),
    };

    if let Some(dir) = &args.epub_dir {
        settings.epub_dir.clone_from(dir);
    }
    if let Some(dir) = &args.txt_dir {
        settings.txt_dir.clone_from(dir);
    }
    if let Some(dir) = &args.output_dir {
        settings.output_dir.clone_from(dir);
    }
    if let Some(path) = &args.merge_log {
        settings.merge_log.clone_from(path);
    }
    if let Some(path) = &args.rename_log {
        settings.rename_log.clone_from(path);
    }
    if let Some(path) = &args.error_log {
        settings.error_log.clone_from(path);
    }
    if let Some(threshold) = args.merge_threshold {
        settings.merge_threshold = threshold;
    }

    settings.validate()?;
    Ok(settings)
}

fn print_text_report(report: &RunReport) {
    println!("Reconciliation Results");
    println!("{}", "=".repeat(60));

    println!("\nEPUB chapters: {} ({})", report.epub_chapters, report.epub_dir);
    println!("TXT chapters:  {} ({})", report.txt_chapters, report.txt_dir);

    println!("\nDecisions:");
    println!("  Merged: {}", report.merged);
    println!("  Unmatched (copied): {}", report.unmatched);
    println!("  Mismatched (index skipped): {}", report.mismatched);
    println!("  Empty headers (excluded): {}", report.empty_headers);

    println!(
        "\nDone. {} verified chapters saved to: {}",
        report.chapters_written, report.output_dir
    );
    println!("Merge events: {}", report.merge_log);
    println!("Renames: {}", report.rename_log);
    if let Some(error_log) = &report.error_log {
        println!("Errors logged in: {error_log}");
    }
}

fn print_json_report(report: &RunReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn print_tsv_report(report: &RunReport) {
    println!("merged\tunmatched\tmismatched\tempty_headers\tchapters_written\toutput_dir\terror_log");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        report.merged,
        report.unmatched,
        report.mismatched,
        report.empty_headers,
        report.chapters_written,
        report.output_dir,
        report.error_log.as_deref().unwrap_or(""),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> ReconcileArgs {
        ReconcileArgs {
            config: None,
            epub_dir: None,
            txt_dir: None,
            output_dir: None,
            merge_log: None,
            rename_log: None,
            error_log: None,
            merge_threshold: None,
        }
    }

    #[test]
    fn test_resolve_settings_defaults() {
        let settings = resolve_settings(&empty_args()).unwrap();
        assert_eq!(settings, ReconcileSettings::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("book.toml");
        std::fs::write(&config, "output_dir = \"from_file\"\ntxt_dir = \"txt_from_file\"\n").unwrap();

        let args = ReconcileArgs {
            config: Some(config),
            output_dir: Some(PathBuf::from("from_flag")),
            ..empty_args()
        };
        let settings = resolve_settings(&args).unwrap();

        assert_eq!(settings.output_dir, PathBuf::from("from_flag"));
        assert_eq!(settings.txt_dir, PathBuf::from("txt_from_file"));
    }

    #[test]
    fn test_invalid_threshold_flag() {
        let args = ReconcileArgs {
            merge_threshold: Some(2.0),
            ..empty_args()
        };
        assert!(resolve_settings(&args).is_err());
    }
}
