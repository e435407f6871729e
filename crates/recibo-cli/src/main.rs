//! Recibo CLI — local harness for the receipt upload lifecycle.
//!
//! Drives the full loop in one process: drop-zone batch upload into blob
//! storage plus the in-memory document backend, a stand-in extraction
//! completion, and an optional watch of each document to its terminal state.
//! Set RECIBO_STORAGE_BACKEND / RECIBO_STORAGE_PATH to control where blobs go.

use anyhow::Context;
use clap::{Parser, Subcommand};
use recibo_backend::{ExtractionOutcome, InMemoryBackend, ReceiptBackend};
use recibo_cli::init_tracing;
use recibo_client::{
    DisplayState, DropZone, Navigator, Notifier, ReceiptDetailView, UploadGateway,
};
use recibo_core::models::{FileUpload, UserContext};
use recibo_core::Config;
use recibo_storage::create_storage;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "recibo", about = "Recibo receipt lifecycle CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload one or more PDF receipts through the drop-zone flow
    Upload {
        /// Paths of the files to upload
        files: Vec<std::path::PathBuf>,
        /// Follow each uploaded document to its terminal status
        #[arg(long)]
        watch: bool,
        /// Let the stand-in extraction job fail instead of succeed
        #[arg(long)]
        fail_extraction: bool,
        /// Run without an authenticated identity (demonstrates the auth gate)
        #[arg(long)]
        anonymous: bool,
    },
}

/// Notifier that mirrors toast messages onto stderr.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        eprintln!("ok: {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("error: {}", message);
    }
}

struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn goto_receipt_list(&self) {
        eprintln!("-> receipts");
    }
}

#[derive(Serialize)]
struct UploadSummary {
    succeeded: Vec<UploadedEntry>,
    failed: Vec<FailedEntry>,
}

#[derive(Serialize)]
struct UploadedEntry {
    file_name: String,
    document_id: Uuid,
}

#[derive(Serialize)]
struct FailedEntry {
    file_name: String,
    error: String,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn guess_mimetype(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

async fn read_uploads(paths: &[std::path::PathBuf]) -> anyhow::Result<Vec<FileUpload>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Read {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed.pdf")
            .to_string();
        let mimetype = guess_mimetype(path);
        files.push(FileUpload::new(name, mimetype, bytes));
    }
    Ok(files)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            files,
            watch,
            fail_extraction,
            anonymous,
        } => {
            if files.is_empty() {
                anyhow::bail!("No files given");
            }

            let config = Config::from_env()?;
            let storage = create_storage(&config)
                .await
                .context("Create blob storage")?;
            let backend = Arc::new(InMemoryBackend::new(
                storage.clone(),
                Duration::from_secs(config.download_url_ttl_secs),
            ));
            let gateway = UploadGateway::new(storage, backend.clone());
            let mut dropzone = DropZone::new(
                gateway,
                Arc::new(ConsoleNotifier),
                Arc::new(ConsoleNavigator),
                Duration::from_secs(config.recent_uploads_window_secs),
            );

            let uploads = read_uploads(&files).await?;
            let user = if anonymous {
                None
            } else {
                Some(UserContext::new(Uuid::new_v4()))
            };

            let outcome = dropzone
                .handle_batch(user.as_ref(), uploads, Instant::now())
                .await;

            // Stand-in for the hosted AI extraction job: drive each pending
            // document to a terminal state shortly after creation.
            for uploaded in &outcome.succeeded {
                let backend = backend.clone();
                let document_id = uploaded.document_id;
                let outcome = if fail_extraction {
                    ExtractionOutcome::Failed("extraction disabled".to_string())
                } else {
                    ExtractionOutcome::Extracted(Default::default())
                };
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    if let Err(e) = backend.apply_extraction(document_id, outcome).await {
                        tracing::warn!(document_id = %document_id, error = %e, "Stub extraction failed");
                    }
                });
            }

            if watch {
                for uploaded in &outcome.succeeded {
                    let mut view =
                        ReceiptDetailView::open(backend.clone(), uploaded.document_id).await;
                    match view.wait_for_terminal().await {
                        DisplayState::Present(detail) => print_json(&detail.document)?,
                        DisplayState::NotFound => {
                            eprintln!("not found: {}", uploaded.document_id)
                        }
                        DisplayState::Loading => {}
                    }
                }
            }

            let summary = UploadSummary {
                succeeded: outcome
                    .succeeded
                    .iter()
                    .map(|f| UploadedEntry {
                        file_name: f.file_name.clone(),
                        document_id: f.document_id,
                    })
                    .collect(),
                failed: outcome
                    .failed
                    .iter()
                    .map(|(file_name, error)| FailedEntry {
                        file_name: file_name.clone(),
                        error: error.clone(),
                    })
                    .collect(),
            };
            print_json(&summary)?;
        }
    }

    Ok(())
}
