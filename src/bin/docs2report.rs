//! CLI binary for docs2report.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `AssemblyConfig`, loads the checklist and base documents, and prints the
//! validation outcome.

use anyhow::{Context, Result};
use clap::Parser;
use docs2report::{
    assemble_to_file, populate_structure, validate, AssemblyConfig, BaseDocuments, ReportError,
};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Assemble a report from a checklist and two base documents
  docs2report checklist.json --doc q3_financials.pdf --doc site_photo.png

  # Custom output path
  docs2report checklist.json --doc audit.pdf -o reports/audit_packet.pdf

  # Checklist from stdin
  cat checklist.json | docs2report - --doc audit.pdf

  # Check completeness without rendering a PDF
  docs2report checklist.json --doc audit.pdf --dry-run

  # Machine-readable structure dump
  docs2report checklist.json --doc audit.pdf --dry-run --json

  # German OCR with a non-PATH tesseract
  docs2report checklist.json --doc scan.jpg \
      --tesseract-cmd /opt/tesseract/bin/tesseract --ocr-lang deu

CHECKLIST FORMAT:
  {
    "sections": [
      {
        "title": "Financials",
        "ExtractPages": [
          {"file": "q3_financials.pdf", "type": "pdf", "pages": [2, 1]}
        ]
      },
      {"title": "Site Photos", "ExtractPages": [{"file": "site_photo.png", "type": "png"}]},
      {"title": "Appendix", "GeneratePlaceholder": "To be provided by legal."}
    ]
  }

  Pages are 1-based and extracted in the order listed. Omitting "pages"
  extracts the whole document. Omitting "type" assumes "pdf". Directives that
  fail (missing file, unsupported type, unreadable content) appear as notes
  inside the report; only a section with no content at all fails the run.

ENVIRONMENT VARIABLES:
  DOCS2REPORT_OUTPUT         Output path (same as -o)
  DOCS2REPORT_TESSERACT_CMD  Tesseract command (same as --tesseract-cmd)
  DOCS2REPORT_OCR_LANG       OCR language code (same as --ocr-lang)
  RUST_LOG                   Tracing filter, overrides -v/-q

EXIT STATUS:
  0  report assembled (or dry run passed validation)
  1  validation failed or any hard error
"#;

/// Assemble a PDF report from a JSON checklist and base documents.
#[derive(Parser, Debug)]
#[command(
    name = "docs2report",
    version,
    about = "Assemble a navigable PDF report from a JSON checklist and base documents",
    long_about = "Assemble a PDF report from a JSON checklist. Each checklist section pulls \
pages out of uploaded PDF documents, runs OCR over uploaded images, or inserts placeholder \
text; the result is validated for completeness and rendered as a single bookmarked PDF.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Checklist JSON file, or '-' to read it from stdin.
    checklist: String,

    /// Base document to make available to the checklist (repeatable).
    /// Directives reference documents by file name, not by path.
    #[arg(short = 'd', long = "doc", value_name = "PATH")]
    docs: Vec<PathBuf>,

    /// Write the report PDF to this path.
    #[arg(short, long, env = "DOCS2REPORT_OUTPUT",
          default_value = docs2report::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Command used to invoke tesseract for image OCR.
    #[arg(long, env = "DOCS2REPORT_TESSERACT_CMD", default_value = "tesseract")]
    tesseract_cmd: String,

    /// Tesseract language code (passed as -l).
    #[arg(long, env = "DOCS2REPORT_OCR_LANG", default_value = "eng")]
    ocr_lang: String,

    /// Skip the PDF outline (bookmark sidebar).
    #[arg(long)]
    no_outline: bool,

    /// Populate and validate only; print the structure, render nothing.
    #[arg(long)]
    dry_run: bool,

    /// Output the populated structure as JSON (implies no summary lines).
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DOCS2REPORT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "DOCS2REPORT_QUIET")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Validation failures get the bare message, matching what the
            // report itself would have said; everything else gets the full
            // error chain.
            if e.downcast_ref::<ReportError>()
                .is_some_and(|r| matches!(r, ReportError::Validation { .. }))
            {
                eprintln!("{} {}", red("✘"), bold(&e.to_string()));
            } else {
                eprintln!("{} {:#}", red("✘"), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let checklist_json = read_checklist(&cli.checklist)?;

    let documents = BaseDocuments::from_paths(&cli.docs).context("Failed to load base documents")?;

    let config = AssemblyConfig::builder()
        .output_path(&cli.output)
        .tesseract_cmd(&cli.tesseract_cmd)
        .ocr_language(&cli.ocr_lang)
        .outline(!cli.no_outline)
        .build()
        .context("Invalid configuration")?;

    // ── Dry run: populate + validate, no PDF ─────────────────────────────
    if cli.dry_run {
        let (structure, checklist, stats) =
            populate_structure(&checklist_json, &documents, &config)?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&structure).context("Failed to serialise structure")?
            );
        } else if !cli.quiet {
            for section in structure.iter() {
                println!("{}", bold(&section.title));
                for item in &section.items {
                    let first_line = item.lines().next().unwrap_or("");
                    println!("  {} {}", dim("·"), truncate(first_line, 96));
                }
            }
        }

        let validation = validate(&structure, &checklist);
        if !validation.passed {
            return Err(ReportError::Validation {
                message: validation.message,
            }
            .into());
        }
        if !cli.quiet && !cli.json {
            eprintln!(
                "{} {}  {}",
                green("✔"),
                bold(&validation.message),
                dim(&format!(
                    "{} sections, {} items, {} soft failures",
                    structure.len(),
                    structure.item_count(),
                    stats.soft_failures
                )),
            );
        }
        return Ok(());
    }

    // ── Full assembly ────────────────────────────────────────────────────
    let output = assemble_to_file(&checklist_json, &documents, &config)?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output.structure)
                .context("Failed to serialise structure")?
        );
    }
    if !cli.quiet {
        eprintln!(
            "{} {}  →  {}",
            green("✔"),
            bold(&output.validation_message),
            bold(&cli.output.display().to_string()),
        );
        eprintln!(
            "   {}",
            dim(&format!(
                "{} sections, {} items, {} soft failures, {} bytes, {}ms",
                output.stats.sections,
                output.stats.content_items,
                output.stats.soft_failures,
                output.stats.pdf_bytes,
                output.stats.total_duration_ms
            )),
        );
    }
    Ok(())
}

/// Read the checklist JSON from a file or, for `-`, from stdin.
fn read_checklist(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read checklist from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read checklist file '{source}'"))
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}\u{2026}")
    }
}
