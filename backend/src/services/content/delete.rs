use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use crate::model::ContentModel;

use super::respond::{self, ResponseStyle};

/// Handler for `DELETE /api/content/{id}`. For file items the model removes
/// the stored blob before the metadata record.
pub async fn process(
    req: HttpRequest,
    model: web::Data<ContentModel>,
    id: web::Path<String>,
) -> impl Responder {
    let style = ResponseStyle::from_request(&req);

    if let Err(err) = model.delete_content(&id).await {
        return respond::model_error(style, &err);
    }

    match style {
        ResponseStyle::Fragment => respond::current_table(model.get_ref(), None).await,
        ResponseStyle::Json => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Content deleted successfully",
        })),
    }
}
