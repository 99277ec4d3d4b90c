//! Document catalog API routes

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::catalog::DocumentRecord;
use crate::error::Result;
use crate::state::AppState;

/// Create the documents router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_documents))
        .route("/:id", get(get_document))
}

/// List every document in catalog order
async fn list_documents(State(state): State<AppState>) -> Result<Json<Vec<DocumentRecord>>> {
    let records = state.catalog().list().await?;
    Ok(Json(records))
}

/// Get one document by id
async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DocumentRecord>> {
    let record = state.catalog().get(id).await?;
    Ok(Json(record))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::catalog::DocumentRecord;
    use crate::routes::test_support;

    #[tokio::test]
    async fn test_list_documents_preserves_order() {
        let (server, _dir) = test_support::server();
        let response = server.get("/documents").await;
        response.assert_status_ok();

        let records: Vec<DocumentRecord> = response.json();
        let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(records[0].author, "Jane Smith");
    }

    #[tokio::test]
    async fn test_list_documents_camel_case() {
        let (server, _dir) = test_support::server();
        let body: serde_json::Value = server.get("/documents").await.json();
        assert_eq!(body[0]["uploadDate"], "2024-01-15T10:30:00Z");
    }

    #[tokio::test]
    async fn test_get_document() {
        let (server, _dir) = test_support::server();
        let record: DocumentRecord = server.get("/documents/2").await.json();
        assert_eq!(record.name, "Setup Guide");

        server
            .get("/documents/42")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_catalog_is_server_error() {
        let (server, dir) = test_support::server();
        std::fs::write(dir.path().join("documents.json"), "{not json").unwrap();

        server
            .get("/documents")
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
