mod config;
mod error;
mod model;
mod processing;
mod services;
mod storage;
mod views;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::info;
use mime_guess::from_path;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::model::ContentModel;
use crate::processing::ProcessingQueue;
use crate::storage::memory::{MemoryBlobStore, MemoryContentStore};

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static");

async fn serve_static(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches("/static/");

    match STATIC_DIR.get_file(path) {
        Some(file) => {
            let mime = from_path(path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => HttpResponse::NotFound().body("Not Found"),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Arc::new(AppConfig::from_env());
    let url = format!("http://{}:{}", config.host, config.port);

    // The persistence pair is constructed once here and handed to the model.
    // A managed document/blob backend plugs in through the same traits.
    let store = Arc::new(MemoryContentStore::new());
    let blobs = Arc::new(MemoryBlobStore::new());
    let model = ContentModel::new(store, blobs, config.clone());

    // Completion worker for the bulk processing endpoint. Keeping the handle
    // here ties its timers to the lifetime of the server below.
    let (tx, rx) = mpsc::channel(100);
    let queue = ProcessingQueue::new(tx);
    let worker = tokio::spawn(processing::start_completion_worker(model.clone(), rx));

    if !config.is_production() {
        let _url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&_url_clone);
        });
    }

    info!("Content Harvester server running at {}", url);

    let bind_addr = (config.host.clone(), config.port);
    let result = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(model.clone()))
            .app_data(web::Data::new(queue.clone()))
            .route("/", web::get().to(services::content::page::process))
            .service(services::content::configure_routes())
            .route("/static/{path:.*}", web::get().to(serve_static))
    })
    .bind(bind_addr)?
    .run()
    .await;

    worker.abort();
    result
}
