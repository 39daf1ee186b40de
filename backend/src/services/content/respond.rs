//! Response shaping shared by every content handler.
//!
//! Each request picks its representation exactly once: HTMX callers (the
//! `HX-Request` header) receive rendered fragments, everyone else receives
//! JSON. Transient toast notifications ride the `HX-Trigger` response header
//! as `{"showToast": {"message", "type"}}` so they never displace the
//! fragment payload.

use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;

use common::model::content::ContentItem;

use crate::error::ContentError;
use crate::model::ContentModel;
use crate::views;

const HTML: &str = "text/html; charset=utf-8";

/// Representation chosen for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStyle {
    Fragment,
    Json,
}

impl ResponseStyle {
    pub fn from_request(req: &HttpRequest) -> Self {
        if req.headers().contains_key("HX-Request") {
            ResponseStyle::Fragment
        } else {
            ResponseStyle::Json
        }
    }
}

/// Severity carried by a transient notification.
#[derive(Debug, Clone, Copy)]
pub enum ToastKind {
    Error,
}

impl ToastKind {
    fn as_str(self) -> &'static str {
        match self {
            ToastKind::Error => "error",
        }
    }
}

/// An out-of-band notification shown by the browser without altering the
/// primary payload.
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
        }
    }

    fn hx_trigger(&self) -> String {
        json!({
            "showToast": {
                "message": self.message,
                "type": self.kind.as_str(),
            }
        })
        .to_string()
    }
}

/// 200 with the listing fragment, optionally carrying a toast.
pub fn table_fragment(items: &[ContentItem], toast: Option<&Toast>) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    response.content_type(HTML);
    if let Some(toast) = toast {
        response.insert_header(("HX-Trigger", toast.hx_trigger()));
    }
    response.body(views::content_table(items))
}

/// 200 with a single row fragment.
pub fn row_fragment(item: &ContentItem) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(HTML)
        .body(views::content_row(item))
}

/// Re-fetches the canonical listing and renders it as a fragment. Fragment
/// callers always get something renderable, so a listing fetch failure
/// becomes an error fragment rather than a bare JSON error.
pub async fn current_table(model: &ContentModel, toast: Option<Toast>) -> HttpResponse {
    match model.get_all_content().await {
        Ok(items) => table_fragment(&items, toast.as_ref()),
        Err(err) => model_error(ResponseStyle::Fragment, &err),
    }
}

/// 400 with the structured error envelope.
pub fn json_error(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "success": false,
        "message": message,
    }))
}

/// Maps a model failure to the caller's chosen representation.
pub fn model_error(style: ResponseStyle, err: &ContentError) -> HttpResponse {
    log::error!("content operation failed: {err}");
    match style {
        ResponseStyle::Fragment => HttpResponse::BadRequest()
            .content_type(HTML)
            .body(views::error_toast(&err.to_string())),
        ResponseStyle::Json => json_error(&err.to_string()),
    }
}
