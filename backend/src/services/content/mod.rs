//! # Content Service Module
//!
//! Aggregates every API endpoint operating on content items and acts as the
//! router for the `/api` path. The listing page itself (`GET /`) lives in the
//! `page` sub-module and is registered separately in `main.rs`.
//!
//! ## Registered Routes:
//!
//! *   **`POST /api/urls`**:
//!     - **Handler**: `add_urls::process`
//!     - **Description**: Accepts free text, extracts every `http(s)://`
//!       URL from it and creates one pending content item per URL.
//!
//! *   **`POST /api/files`**:
//!     - **Handler**: `upload_files::process`
//!     - **Description**: Accepts multipart file uploads, stores the bytes
//!       through the blob seam and creates one pending content item per
//!       file. ZIP archives are rejected per file without aborting the rest.
//!
//! *   **`DELETE /api/content/{id}`**:
//!     - **Handler**: `delete::process`
//!     - **Description**: Deletes one item; for file items the stored blob
//!       is removed before the metadata record.
//!
//! *   **`PUT /api/content/{id}/anonymize`**:
//!     - **Handler**: `anonymize::process`
//!     - **Description**: Toggles the stored anonymize flag and returns the
//!       updated item.
//!
//! *   **`POST /api/process-all`**:
//!     - **Handler**: `process_all::process`
//!     - **Description**: Moves every pending item into `processing` and
//!       schedules the deferred transition to `completed`.
//!
//! Every handler answers in one of two representations, decided once per
//! request: an HTML fragment for HTMX callers, JSON for everyone else (see
//! `respond`).

mod add_urls;
mod anonymize;
mod delete;
pub mod page;
mod process_all;
mod respond;
mod upload_files;

use actix_web::web;
use actix_web::Scope;

const API_PATH: &str = "/api";

/// Configures and returns the Actix scope for the content API routes.
pub fn configure_routes() -> Scope {
    web::scope(API_PATH)
        .route("/urls", web::post().to(add_urls::process))
        .route("/files", web::post().to(upload_files::process))
        .route("/content/{id}", web::delete().to(delete::process))
        .route("/content/{id}/anonymize", web::put().to(anonymize::process))
        .route("/process-all", web::post().to(process_all::process))
}
