use actix_web::{web, Either, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use common::model::content::ContentItem;
use common::requests::AnonymizeRequest;

use crate::error::ContentError;
use crate::model::ContentModel;

use super::respond::{self, ResponseStyle};

type Payload = Either<web::Form<AnonymizeRequest>, web::Json<AnonymizeRequest>>;

/// Handler for `PUT /api/content/{id}/anonymize`. Responds with just the
/// updated item: a row fragment for HTMX callers, the item as JSON otherwise.
pub async fn process(
    req: HttpRequest,
    model: web::Data<ContentModel>,
    id: web::Path<String>,
    payload: Payload,
) -> impl Responder {
    let style = ResponseStyle::from_request(&req);
    let flag = match payload {
        Either::Left(form) => form.flag(),
        Either::Right(json) => json.flag(),
    };

    match toggle(model.get_ref(), &id, flag).await {
        Ok(item) => match style {
            ResponseStyle::Fragment => respond::row_fragment(&item),
            ResponseStyle::Json => HttpResponse::Ok().json(json!({
                "success": true,
                "item": item,
            })),
        },
        Err(err) => respond::model_error(style, &err),
    }
}

async fn toggle(model: &ContentModel, id: &str, flag: bool) -> Result<ContentItem, ContentError> {
    model.toggle_anonymize(id, flag).await?;
    model
        .get_content_by_id(id)
        .await?
        .ok_or_else(|| ContentError::NotFound(id.to_string()))
}
