//! Document sources
//!
//! Defines the transport trait the catalog client and the viewer fetch
//! through, and the HTTP implementation backed by `reqwest`.

use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::DocumentRecord;

/// The only binary content type the viewer accepts
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Transport-level failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Decode(String),
}

/// Raw binary response
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryPayload {
    /// Declared `Content-Type`, if the response carried one
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl BinaryPayload {
    pub fn new(content_type: Option<&str>, data: Vec<u8>) -> Self {
        Self {
            content_type: content_type.map(str::to_string),
            data,
        }
    }

    pub fn pdf(data: Vec<u8>) -> Self {
        Self::new(Some(PDF_CONTENT_TYPE), data)
    }

    /// True when the declared content type is exactly `application/pdf`
    pub fn is_pdf(&self) -> bool {
        self.content_type.as_deref() == Some(PDF_CONTENT_TYPE)
    }
}

/// Where catalog records and PDF binaries come from
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the full document list
    async fn fetch_catalog(&self) -> Result<Vec<DocumentRecord>, SourceError>;

    /// Fetch the raw bytes stored for a record
    async fn fetch_binary(&self, record: &DocumentRecord) -> Result<BinaryPayload, SourceError>;
}

/// HTTP source for `GET {base}/documents` and `GET {base}/pdfs/{filename}`
pub struct HttpDocumentSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDocumentSource {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn catalog_url(&self) -> String {
        format!("{}/documents", self.base_url)
    }

    fn binary_url(&self, filename: &str) -> String {
        format!("{}/pdfs/{}", self.base_url, urlencoding::encode(filename))
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn fetch_catalog(&self) -> Result<Vec<DocumentRecord>, SourceError> {
        let url = self.catalog_url();
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        response
            .json::<Vec<DocumentRecord>>()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))
    }

    async fn fetch_binary(&self, record: &DocumentRecord) -> Result<BinaryPayload, SourceError> {
        let url = self.binary_url(&record.filename);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let data = response
            .bytes()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        Ok(BinaryPayload {
            content_type,
            data: data.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let source = HttpDocumentSource::new("http://localhost:3001/");
        assert_eq!(source.base_url(), "http://localhost:3001");
        assert_eq!(source.catalog_url(), "http://localhost:3001/documents");
        assert_eq!(
            source.binary_url("annual report.pdf"),
            "http://localhost:3001/pdfs/annual%20report.pdf"
        );
    }

    #[test]
    fn test_pdf_content_type_is_exact() {
        assert!(BinaryPayload::pdf(vec![]).is_pdf());
        assert!(!BinaryPayload::new(Some("text/html"), vec![]).is_pdf());
        assert!(!BinaryPayload::new(Some("application/pdf; charset=binary"), vec![]).is_pdf());
        assert!(!BinaryPayload::new(None, vec![]).is_pdf());
    }
}
