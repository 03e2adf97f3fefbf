//! Lint command - Lint JSX files

use crate::config::load_config_or_exit;
use clap::{Args, ValueEnum};
use glob::glob;
use ignore::Walk;
use lacquer_patina::{format_results, format_summary, LintResult, Linter, OutputFormat};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// File extensions that may contain JSX or element factory calls
const EXTENSIONS: &[&str] = &["jsx", "tsx", "js", "mjs", "cjs", "ts", "mts", "cts"];

#[derive(Args)]
pub struct LintArgs {
    /// Files, directories or glob patterns to lint
    #[arg(default_value = ".")]
    pub patterns: Vec<String>,

    /// Automatically fix problems and write the files back
    #[arg(long)]
    pub fix: bool,

    /// Config file path (defaults to ./lacquer.config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Maximum number of warnings before failing
    #[arg(long)]
    pub max_warnings: Option<usize>,

    /// Quiet mode - report errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl Default for LintArgs {
    fn default() -> Self {
        Self {
            patterns: vec![".".to_string()],
            fix: false,
            config: None,
            format: Format::Text,
            max_warnings: None,
            quiet: false,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn is_lintable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.contains(&ext))
}

fn in_node_modules(path: &Path) -> bool {
    path.components().any(|c| c.as_os_str() == "node_modules")
}

/// Expand patterns into the files to lint
fn collect_files(patterns: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = patterns
        .iter()
        .flat_map(|pattern| {
            if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
                glob(pattern)
                    .ok()
                    .into_iter()
                    .flatten()
                    .filter_map(|r| r.ok())
                    .filter(|p| is_lintable(p) && !in_node_modules(p))
                    .collect::<Vec<_>>()
            } else {
                // Respects .gitignore
                Walk::new(pattern)
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_some_and(|t| t.is_file()))
                    .map(|e| e.into_path())
                    .filter(|p| is_lintable(p) && !in_node_modules(p))
                    .collect::<Vec<_>>()
            }
        })
        .collect();
    files.sort();
    files.dedup();
    files
}

/// Lint one file, fixing it in place when asked
fn lint_file(linter: &Linter, path: &Path, fix: bool) -> Option<(String, String, LintResult)> {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };
    let filename = path.to_string_lossy().to_string();

    if !fix {
        let result = linter.lint_source(&source, &filename);
        return Some((filename, source, result));
    }

    let fixed = linter.fix_source(&source, &filename);
    if fixed.applied > 0 {
        if let Err(e) = fs::write(path, &fixed.output) {
            eprintln!("Failed to write {}: {}", path.display(), e);
            let result = linter.lint_source(&source, &filename);
            return Some((filename, source, result));
        }
        tracing::debug!(filename, applied = fixed.applied, "fixed");
    }
    Some((filename, fixed.output, fixed.result))
}

pub fn run(args: LintArgs) {
    let start = Instant::now();

    let config = load_config_or_exit(args.config.as_deref());
    let linter = match Linter::from_config(&config) {
        Ok(linter) => linter,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    let files = collect_files(&args.patterns);
    if files.is_empty() {
        eprintln!("No JSX files found matching patterns: {:?}", args.patterns);
        return;
    }
    tracing::debug!(files = files.len(), rules = linter.registry().len(), "linting");

    let error_count = AtomicUsize::new(0);
    let warning_count = AtomicUsize::new(0);

    // Lint all files in parallel and collect results
    let results: Vec<_> = files
        .par_iter()
        .filter_map(|path| {
            let (filename, source, mut result) = lint_file(&linter, path, args.fix)?;
            if args.quiet {
                result.retain_errors();
            }

            error_count.fetch_add(result.error_count, Ordering::Relaxed);
            warning_count.fetch_add(result.warning_count, Ordering::Relaxed);

            Some((filename, source, result))
        })
        .collect();

    let total_errors = error_count.load(Ordering::Relaxed);
    let total_warnings = warning_count.load(Ordering::Relaxed);
    let format = OutputFormat::from(args.format);

    let (lint_results, sources): (Vec<_>, Vec<_>) = results
        .into_iter()
        .map(|(filename, source, result)| (result, (filename, source)))
        .unzip();

    let output = format_results(&lint_results, &sources, format);
    if !output.trim().is_empty() {
        if format == OutputFormat::Json {
            println!("{}", output);
        } else {
            print!("{}", output);
        }
    }

    // Print summary
    if format == OutputFormat::Text {
        let elapsed = start.elapsed();
        println!(
            "\n{}",
            format_summary(total_errors, total_warnings, files.len())
        );
        println!("Linted {} files in {:.4?}", files.len(), elapsed);
    }

    // Exit with appropriate code
    if total_errors > 0 {
        std::process::exit(1);
    }

    if let Some(max) = args.max_warnings {
        if total_warnings > max {
            eprintln!("\nToo many warnings ({} > max {})", total_warnings, max);
            std::process::exit(1);
        }
    }
}
