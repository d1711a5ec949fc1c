// src/main.rs
use std::path::{Path, PathBuf};

use clap::Parser;

use siv_extractor::fragment::NormalizedFragment;
use siv_extractor::ingest;
use siv_extractor::record::DocumentRecord;
use siv_extractor::reference::ReferenceTables;
use siv_extractor::storage::StorageManager;
use siv_extractor::utils::error::AppError;
use siv_extractor::utils::logging;
use siv_extractor::walkers;

/// Command Line Interface for the SIV table extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input documents: saved HTML pages (*.html) or PDF text-span dumps (*.json)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory for extracted records
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Minimum number of varieties a document must resolve
    #[arg(long, default_value_t = 3)]
    min_varieties: usize,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Load and validate the reference tables
    let mut tables = ReferenceTables::builtin()?;
    tables.min_varieties = args.min_varieties;

    // 4. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 5. Process each document
    let mut success_count = 0;
    let mut failure_count = 0;
    let mut review_count = 0;

    for path in &args.inputs {
        let doc_id = document_id(path);
        tracing::info!("Processing {} ({})", doc_id, path.display());

        match process_document(path, &doc_id, &tables) {
            Ok(record) => {
                tracing::info!(
                    "Extracted {} varieties from {} (journal date {})",
                    record.varieties.len(),
                    doc_id,
                    record.journal_date.as_deref().unwrap_or("unknown")
                );
                match storage.save_record(&record) {
                    Ok(saved) => {
                        tracing::info!("Saved record to: {}", saved.display());
                        success_count += 1;
                    }
                    Err(e) => {
                        tracing::error!("Failed to save record for {}: {}", doc_id, e);
                        failure_count += 1;
                    }
                }
            }
            Err(AppError::Parse(e)) if e.is_recoverable() => {
                tracing::warn!("{} needs manual review: {}", doc_id, e);
                review_count += 1;
            }
            Err(e) => {
                tracing::error!("Failed to process {}: {}", doc_id, e);
                failure_count += 1;
            }
        }
    }

    tracing::info!(
        "Processing finished. Success: {}, Failures: {}, Manual review: {}",
        success_count,
        failure_count,
        review_count
    );

    if success_count == 0 && failure_count > 0 {
        return Err(AppError::Processing(format!(
            "Failed to extract SIV records from all {} documents",
            failure_count
        )));
    }

    Ok(())
}

/// The document ID is the input file's stem (e.g. `31996R0500.html`).
fn document_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn process_document(
    path: &Path,
    doc_id: &str,
    tables: &ReferenceTables,
) -> Result<DocumentRecord, AppError> {
    let content = std::fs::read_to_string(path)?;
    let is_span_dump = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_span_dump {
        let fragments = ingest::ingest_span_dump(&content)?;
        Ok(walkers::parse_pdf_document(&fragments, tables, doc_id)?)
    } else {
        let html = ingest::ingest_html(&content)?;
        let fragments: Vec<NormalizedFragment> = html
            .fragments
            .iter()
            .map(NormalizedFragment::from_raw)
            .collect();
        let mut record =
            walkers::parse_html_document(&fragments, tables, doc_id, html.is_correction)?;
        // the journal date lives outside the table on the HTML rendering
        record.journal_date = html.journal_date;
        Ok(record)
    }
}
