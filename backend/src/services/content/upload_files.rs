//! # File Upload Service
//!
//! Backend logic for `POST /api/files`. Handles multipart/form-data with one
//! or more file fields, spools each file to a temp location, and turns every
//! file into its own pending content item.
//!
//! Files are processed independently and concurrently: a failure for one
//! (for example the ZIP rejection rule) is collected as a per-file error
//! entry and never aborts the remaining files. Fragment callers always get
//! the refreshed listing back; when some files failed they also get an
//! out-of-band error toast with the failure count. Structured callers get
//! counts plus separate success/error item lists.

use std::io::Write;

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use futures_util::future::join_all;
use futures_util::StreamExt;
use serde_json::json;
use tempfile::NamedTempFile;

use crate::error::{ContentError, StorageError};
use crate::model::{ContentModel, UploadedFile};

use super::respond::{self, ResponseStyle, Toast};

pub async fn process(
    req: HttpRequest,
    model: web::Data<ContentModel>,
    payload: Multipart,
) -> impl Responder {
    let style = ResponseStyle::from_request(&req);
    let files = match collect_files(payload).await {
        Ok(files) => files,
        Err(err) => return respond::model_error(style, &err),
    };
    upload_files(style, model.get_ref(), files).await
}

/// Drains the multipart stream, keeping every field that carries a filename.
/// The browser submits under `files`, but single-file clients often use
/// `file` or an arbitrary name, so the filename is what identifies a file
/// part. Other fields are ignored.
async fn collect_files(mut payload: Multipart) -> Result<Vec<UploadedFile>, ContentError> {
    let mut files = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item
            .map_err(|e| ContentError::InvalidInput(format!("Malformed multipart payload: {e}")))?;

        let Some(name) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
        else {
            continue;
        };
        let mime_type = field.content_type().map(|m| m.to_string());

        let mut temp = NamedTempFile::new()
            .map_err(|e| StorageError::Backend(format!("Failed to create temp file: {e}")))?;
        let mut size: i64 = 0;
        while let Some(chunk) = field.next().await {
            let chunk = chunk
                .map_err(|e| ContentError::InvalidInput(format!("Failed to read upload: {e}")))?;
            size += chunk.len() as i64;
            temp.write_all(&chunk)
                .map_err(|e| StorageError::Backend(format!("Failed to spool upload: {e}")))?;
        }

        files.push(UploadedFile {
            name,
            size,
            mime_type,
            temp: Some(temp),
        });
    }

    Ok(files)
}

async fn upload_files(
    style: ResponseStyle,
    model: &ContentModel,
    files: Vec<UploadedFile>,
) -> HttpResponse {
    if files.is_empty() {
        log::info!("No files were uploaded");
        return match style {
            ResponseStyle::Fragment => respond::current_table(model, None).await,
            ResponseStyle::Json => respond::json_error("No files were uploaded"),
        };
    }

    log::info!("Processing {} files", files.len());

    let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
    let results = join_all(files.into_iter().map(|file| model.process_file(file))).await;

    let mut added = Vec::new();
    let mut errors = Vec::new();
    for (name, result) in names.into_iter().zip(results) {
        match result {
            Ok(item) => added.push(item),
            Err(err) => {
                log::error!("Error processing file {name}: {err}");
                errors.push(json!({ "name": name, "error": err.to_string() }));
            }
        }
    }

    match style {
        ResponseStyle::Fragment => {
            // Partial success is not an overall failure; the listing comes
            // back regardless, with a toast summarizing what was dropped.
            let toast = (!errors.is_empty())
                .then(|| Toast::error(format!("{} files could not be processed", errors.len())));
            respond::current_table(model, toast).await
        }
        ResponseStyle::Json => HttpResponse::Ok().json(json!({
            "success": true,
            "message": format!("Processed {} files, {} errors", added.len(), errors.len()),
            "successItems": added,
            "errorItems": errors,
        })),
    }
}
