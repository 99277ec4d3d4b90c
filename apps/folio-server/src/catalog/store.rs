//! On-disk catalog store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::DataConfig;
use crate::error::{AppError, Result};

use super::record::{DocumentRecord, StoredFile, UNCATEGORIZED};

/// Reads the catalog file and the PDF directory on every request, so edits
/// on disk show up on the next catalog query.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    catalog_path: PathBuf,
    pdf_dir: PathBuf,
}

impl CatalogStore {
    /// Create a store over the configured data locations
    pub fn new(config: &DataConfig) -> Self {
        Self {
            catalog_path: config.catalog_path.clone(),
            pdf_dir: config.pdf_dir.clone(),
        }
    }

    /// List all documents in catalog order
    pub async fn list(&self) -> Result<Vec<DocumentRecord>> {
        match tokio::fs::read(&self.catalog_path).await {
            Ok(bytes) => {
                let records: Vec<DocumentRecord> = serde_json::from_slice(&bytes)?;
                tracing::debug!(
                    "Loaded {} records from {}",
                    records.len(),
                    self.catalog_path.display()
                );
                Ok(records)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    "Catalog file {} not found, scanning {}",
                    self.catalog_path.display(),
                    self.pdf_dir.display()
                );
                self.scan_pdf_dir().await
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a single record by id
    pub async fn get(&self, id: u64) -> Result<DocumentRecord> {
        self.list()
            .await?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Document not found: {}", id)))
    }

    /// Read a stored file by its catalog filename
    pub async fn read_file(&self, filename: &str) -> Result<StoredFile> {
        validate_filename(filename)?;

        let path = self.pdf_dir.join(filename);
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!("File not found: {}", filename)));
            }
            Err(e) => return Err(e.into()),
        };

        let content_type = mime_guess::from_path(&path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(StoredFile {
            filename: filename.to_string(),
            content_type,
            data,
        })
    }

    /// Synthesize records from the `.pdf` files in the PDF directory
    async fn scan_pdf_dir(&self) -> Result<Vec<DocumentRecord>> {
        let mut entries = match tokio::fs::read_dir(&self.pdf_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("PDF directory {} does not exist", self.pdf_dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !is_pdf(&path) {
                continue;
            }
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let modified: DateTime<Utc> = metadata
                .modified()
                .map(DateTime::from)
                .unwrap_or_else(|_| Utc::now());
            files.push((path, metadata.len(), modified));
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));

        let records = files
            .into_iter()
            .enumerate()
            .filter_map(|(index, (path, size, modified))| {
                let filename = path.file_name()?.to_str()?.to_string();
                let name = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or(&filename)
                    .replace(['_', '-'], " ");
                Some(DocumentRecord {
                    id: index as u64 + 1,
                    name,
                    filename,
                    size,
                    pages: 0,
                    upload_date: modified,
                    author: String::new(),
                    category: UNCATEGORIZED.to_string(),
                    description: String::new(),
                    downloads: 0,
                })
            })
            .collect::<Vec<_>>();

        tracing::info!("Directory scan found {} PDFs", records.len());
        Ok(records)
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Reject filenames that could escape the PDF directory
fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
    {
        return Err(AppError::BadRequest(format!("Invalid filename: {}", filename)));
    }
    Ok(())
}
