//! # URL Submission Service
//!
//! Backend logic for `POST /api/urls`. The request body carries free text;
//! every URL extracted from it becomes its own pending content item.
//!
//! ## Workflow
//!
//! 1. The `process` handler decides the response representation once, from
//!    the `HX-Request` header, and unwraps the form or JSON body.
//! 2. Empty input short-circuits: fragment callers get the current listing
//!    back unchanged with 200 (they must always receive a renderable
//!    fragment), structured callers get a 400 error envelope.
//! 3. When extraction finds no usable URL, fragment callers additionally get
//!    an out-of-band error toast alongside the unchanged listing.
//! 4. Otherwise every extracted URL is processed concurrently; a failure for
//!    one never blocks the others. The refreshed listing (or a JSON summary
//!    of the successes) is returned.

use actix_web::{web, Either, HttpRequest, HttpResponse, Responder};
use futures_util::future::join_all;
use serde_json::json;

use common::requests::AddUrlsRequest;
use common::util::url::extract_urls;

use crate::model::ContentModel;

use super::respond::{self, ResponseStyle, Toast};

type Payload = Either<web::Form<AddUrlsRequest>, web::Json<AddUrlsRequest>>;

pub async fn process(
    req: HttpRequest,
    model: web::Data<ContentModel>,
    payload: Payload,
) -> impl Responder {
    let style = ResponseStyle::from_request(&req);
    let urls_text = match payload {
        Either::Left(form) => form.into_inner().urls,
        Either::Right(json) => json.into_inner().urls,
    };
    add_urls(style, model.get_ref(), &urls_text).await
}

async fn add_urls(style: ResponseStyle, model: &ContentModel, urls_text: &str) -> HttpResponse {
    if urls_text.trim().is_empty() {
        return match style {
            ResponseStyle::Fragment => respond::current_table(model, None).await,
            ResponseStyle::Json => respond::json_error("No URLs provided"),
        };
    }

    let urls = extract_urls(urls_text);
    if urls.is_empty() {
        return match style {
            ResponseStyle::Fragment => {
                let toast = Toast::error(
                    "No valid URLs found. URLs must start with http:// or https://",
                );
                respond::current_table(model, Some(toast)).await
            }
            ResponseStyle::Json => respond::json_error("No valid URLs found"),
        };
    }

    // Each URL is processed in isolation; one failure never blocks the rest.
    let results = join_all(urls.iter().map(|url| model.process_url(url))).await;
    let added: Vec<_> = results.into_iter().filter_map(Result::ok).collect();

    match style {
        ResponseStyle::Fragment => respond::current_table(model, None).await,
        ResponseStyle::Json => HttpResponse::Ok().json(json!({
            "success": true,
            "message": format!("Added {} URLs", added.len()),
            "items": added,
        })),
    }
}
