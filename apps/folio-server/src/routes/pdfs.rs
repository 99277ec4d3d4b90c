//! Stored PDF serving routes

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Router,
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the PDF router
pub fn router() -> Router<AppState> {
    Router::new().route("/:filename", get(serve_pdf))
}

/// Serve a stored file's raw bytes
async fn serve_pdf(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let file = state.catalog().read_file(&filename).await?;
    tracing::debug!(
        "Serving {} ({} bytes, {})",
        file.filename,
        file.data.len(),
        file.content_type
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.content_type)
        .header(header::CONTENT_LENGTH, file.data.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", file.filename),
        )
        .body(Body::from(file.data))
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support;

    #[tokio::test]
    async fn test_serve_pdf() {
        let (server, _dir) = test_support::server();
        let response = server.get("/pdfs/annual.pdf").await;
        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/pdf");
        assert_eq!(response.as_bytes().as_ref(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_serve_non_pdf_keeps_real_type() {
        let (server, _dir) = test_support::server();
        let response = server.get("/pdfs/guide.html").await;
        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "text/html");
    }

    #[tokio::test]
    async fn test_missing_pdf() {
        let (server, _dir) = test_support::server();
        server
            .get("/pdfs/nope.pdf")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_traversal_rejected() {
        let (server, _dir) = test_support::server();
        server
            .get("/pdfs/..%5Cdocuments.json")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
