//! Folio command-line viewer
//!
//! Browses the catalog served by folio-server and drives the viewer state
//! machine against a headless renderer.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_viewer::format::format_bytes;
use folio_viewer::{
    CategoryFilter, DocumentRecord, FetchOutcome, HeadlessRenderer, HttpDocumentSource,
    MemoryHandleStore, Viewer, ViewerConfig, ViewerEvents, ViewerSession,
};

#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(about = "Browse and open documents from a Folio server")]
struct Cli {
    /// Server base URL (defaults to FOLIO_BASE_URL or http://localhost:3001)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List documents, optionally filtered.
    List {
        /// Case-insensitive match against name or author
        #[arg(long, default_value = "")]
        search: String,
        /// Category to show, or "all"
        #[arg(long, default_value = CategoryFilter::ALL)]
        category: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the category filter choices.
    Categories,
    /// Fetch a document and navigate it.
    Open {
        #[arg(value_name = "ID")]
        id: u64,
        #[arg(long, default_value_t = 1)]
        page: i64,
        /// Number of zoom-in steps
        #[arg(long, default_value_t = 0)]
        zoom_in: u32,
        /// Number of zoom-out steps
        #[arg(long, default_value_t = 0)]
        zoom_out: u32,
        /// Write the fetched PDF here
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Logs consumer callbacks
struct LogEvents;

impl ViewerEvents for LogEvents {
    fn on_document_load(&self, record: &DocumentRecord) {
        tracing::info!("Loaded {} by {}", record.name, record.author);
    }

    fn on_page_change(&self, page: u32) {
        tracing::info!("Page {}", page);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "folio_viewer=info,folio=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match cli.base_url {
        Some(url) => ViewerConfig::new(url),
        None => ViewerConfig::from_env(),
    };

    let renderer = Arc::new(HeadlessRenderer::new());
    let viewer = Viewer::new(
        Arc::new(MemoryHandleStore::new()),
        renderer.clone(),
        Arc::new(LogEvents),
    );
    let source = Arc::new(HttpDocumentSource::new(&config.base_url));
    let session = ViewerSession::new(viewer, source);

    session
        .load_catalog()
        .await
        .with_context(|| format!("catalog at {}", config.base_url))?;

    let result = match cli.command {
        Commands::List {
            search,
            category,
            json,
        } => run_list(&session, search, &category, json).await,
        Commands::Categories => run_categories(&session).await,
        Commands::Open {
            id,
            page,
            zoom_in,
            zoom_out,
            output,
        } => run_open(&session, &renderer, id, page, zoom_in, zoom_out, output).await,
    };

    session.teardown().await;
    result
}

async fn run_list(
    session: &ViewerSession,
    search: String,
    category: &str,
    json: bool,
) -> Result<()> {
    let documents = {
        let mut viewer = session.lock().await;
        viewer.set_search_text(search);
        viewer.set_category_filter(CategoryFilter::parse(category));
        viewer.visible_documents()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&documents)?);
        return Ok(());
    }

    for doc in &documents {
        println!(
            "{:>4}  {:<40}  {:<24}  {:<12}  {:>10}  {:>4}p",
            doc.id,
            doc.name,
            doc.author,
            doc.category,
            format_bytes(doc.size),
            doc.pages
        );
    }
    println!("{} document(s)", documents.len());
    Ok(())
}

async fn run_categories(session: &ViewerSession) -> Result<()> {
    for category in session.lock().await.categories() {
        println!("{}", category);
    }
    Ok(())
}

async fn run_open(
    session: &ViewerSession,
    renderer: &HeadlessRenderer,
    id: u64,
    page: i64,
    zoom_in: u32,
    zoom_out: u32,
    output: Option<PathBuf>,
) -> Result<()> {
    match session.select_by_id(id).await? {
        FetchOutcome::Displaying => {}
        FetchOutcome::Errored(err) => bail!(err),
        other => bail!("document {} was not displayed: {:?}", id, other),
    }

    let bytes = {
        let mut viewer = session.lock().await;
        if let Some(pages) = renderer.declared_page_count().filter(|p| *p > 0) {
            viewer.report_page_count(pages);
        }
        viewer.go_to_page(page);
        for _ in 0..zoom_in {
            viewer.zoom_in();
        }
        for _ in 0..zoom_out {
            viewer.zoom_out();
        }

        let state = viewer.state();
        if let Some(record) = state.selected() {
            println!("{} ({})", record.name, format_bytes(record.size));
        }
        println!(
            "page {}/{}  zoom {:.0}%",
            state.current_page(),
            state.last_page(),
            state.zoom() * 100.0
        );

        state.active_handle().and_then(|handle| handle.bytes())
    };

    if let Some(path) = output {
        let bytes = bytes.context("no document bytes available")?;
        tokio::fs::write(&path, bytes.as_slice())
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("saved {}", path.display());
    }

    Ok(())
}
