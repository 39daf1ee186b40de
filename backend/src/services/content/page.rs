use actix_web::{web, HttpResponse, Responder};

use crate::model::ContentModel;
use crate::views;

/// Renders the full listing page for `GET /`.
///
/// The only endpoint that answers 500 on a fetch failure; every other
/// operation surfaces model errors as 400.
pub async fn process(model: web::Data<ContentModel>) -> impl Responder {
    match model.get_all_content().await {
        Ok(items) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(views::page(&items)),
        Err(err) => {
            log::error!("Error rendering main page: {err}");
            HttpResponse::InternalServerError()
                .content_type("text/html; charset=utf-8")
                .body(views::error_page(&err.to_string()))
        }
    }
}
