//! Data administration endpoints: reload, status, upload.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::config;
use crate::ingest::workbook;
use crate::store::{CollectionCounts, DataSource};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadResponse {
    pub message: &'static str,
    pub timestamp: String,
    pub data_status: CollectionCounts,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub data_status: CollectionCounts,
    pub last_updated: String,
    pub source: DataSource,
    pub generation: u64,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub timestamp: String,
}

/// `POST /api/reload-data` — run the ingestion fallback chain and swap in
/// the new snapshot.
pub async fn reload(State(ctx): State<ApiContext>) -> Result<Json<ReloadResponse>, ApiError> {
    tracing::info!("Manual data reload requested");
    let snap = ctx.store.reload(ctx.loader.clone()).await?;

    Ok(Json(ReloadResponse {
        message: "Data reloaded successfully",
        timestamp: chrono::Utc::now().to_rfc3339(),
        data_status: snap.data.counts(),
    }))
}

/// `GET /api/data-status` — collection counts and provenance of the current
/// snapshot.
pub async fn status(State(ctx): State<ApiContext>) -> Result<Json<StatusResponse>, ApiError> {
    let snap = ctx.store.snapshot()?;

    Ok(Json(StatusResponse {
        data_status: snap.data.counts(),
        last_updated: snap.loaded_at.to_rfc3339(),
        source: snap.source,
        generation: snap.generation,
    }))
}

/// `POST /api/upload-excel` — multipart workbook upload.
///
/// The file must arrive in the `excelFile` field with an `.xlsx`/`.xls`
/// name, fit the upload cap, and parse as a workbook before it replaces the
/// remote source; anything else is a 400 and the stored workbook is left
/// untouched.
pub async fn upload(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::UploadRejected(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("excelFile") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::UploadRejected(format!("Failed to read upload: {e}")))?;
        upload = Some((file_name, bytes.to_vec()));
        break;
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| ApiError::UploadRejected("No file uploaded".into()))?;

    if !has_workbook_extension(&file_name) {
        return Err(ApiError::UploadRejected(
            "Only .xlsx and .xls files are accepted".into(),
        ));
    }
    if bytes.is_empty() {
        return Err(ApiError::UploadRejected("Uploaded file is empty".into()));
    }
    if bytes.len() > config::MAX_UPLOAD_BYTES {
        return Err(ApiError::UploadRejected(format!(
            "File exceeds the {} MB upload limit",
            config::MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    // Parse before persisting so a bad file never replaces the remote source.
    workbook::parse_workbook(&bytes)
        .map_err(|e| ApiError::UploadRejected(format!("Not a readable workbook: {e}")))?;

    tracing::info!(file_name, size = bytes.len(), "Uploading workbook to blob store");
    ctx.loader.blob().upload(config::DATA_KEY, &bytes)?;
    ctx.store.reload(ctx.loader.clone()).await?;

    Ok(Json(UploadResponse {
        message: "File uploaded and data reloaded successfully",
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

fn has_workbook_extension(file_name: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("xlsx") || e.eq_ignore_ascii_case("xls"))
        .unwrap_or(false)
}
