//! # Bulk Processing Service
//!
//! Backend logic for `POST /api/process-all`. Every pending item is moved to
//! `processing` before the response goes out; the same set is handed to the
//! completion worker, which marks it `completed` after a fixed delay. The
//! reported count reflects the state at the initial read.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use futures_util::future::try_join_all;
use serde_json::json;

use common::model::content::ContentStatus;

use crate::error::ContentError;
use crate::model::ContentModel;
use crate::processing::ProcessingQueue;

use super::respond::{self, ResponseStyle};

pub async fn process(
    req: HttpRequest,
    model: web::Data<ContentModel>,
    queue: web::Data<ProcessingQueue>,
) -> impl Responder {
    let style = ResponseStyle::from_request(&req);

    match process_pending(model.get_ref(), queue.get_ref()).await {
        Ok(count) => match style {
            ResponseStyle::Fragment => respond::current_table(model.get_ref(), None).await,
            ResponseStyle::Json => HttpResponse::Ok().json(json!({
                "success": true,
                "message": format!("Processing {count} items"),
            })),
        },
        Err(err) => respond::model_error(style, &err),
    }
}

/// Transitions every pending item to `processing`, jointly awaited, then
/// schedules the deferred completion for the same ids. Returns how many items
/// were picked up.
async fn process_pending(
    model: &ContentModel,
    queue: &ProcessingQueue,
) -> Result<usize, ContentError> {
    let pending: Vec<String> = model
        .get_all_content()
        .await?
        .into_iter()
        .filter(|item| item.status == ContentStatus::Pending)
        .map(|item| item.id)
        .collect();

    try_join_all(
        pending
            .iter()
            .map(|id| model.update_content_status(id, ContentStatus::Processing)),
    )
    .await?;

    queue.schedule(pending.clone()).await;

    Ok(pending.len())
}
