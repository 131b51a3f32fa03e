use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{web, App, HttpResponse, HttpServer};
use log::{error, info};
use serde_json::json;

use llm_gateway::LlmClient;
use settings_manager::{FileSettingsStorage, SettingsManager};

use crate::controllers::{chat_controller, session_controller, settings_controller};
use crate::sessions::SessionRegistry;

pub struct AppState {
    pub gateway: Arc<LlmClient>,
    pub settings: SettingsManager<FileSettingsStorage>,
    pub sessions: SessionRegistry,
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// API route tree, shared between the server and the test harness.
pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(chat_controller::config)
        .configure(session_controller::config)
        .configure(settings_controller::config)
        .route("/health", web::get().to(health));
}

pub async fn run(data_dir: PathBuf, static_dir: PathBuf, port: u16) -> Result<(), String> {
    info!("Starting web service...");

    let settings = SettingsManager::new(FileSettingsStorage::new(&data_dir))
        .await
        .map_err(|e| format!("Failed to load settings: {e}"))?;

    let app_state = web::Data::new(AppState {
        gateway: Arc::new(LlmClient::new()),
        settings,
        sessions: SessionRegistry::new(),
    });

    let serve_static = static_dir.is_dir();
    if !serve_static {
        info!(
            "Static directory {} not found; serving API only",
            static_dir.display()
        );
    }

    let server = HttpServer::new(move || {
        let mut app = App::new()
            .app_data(app_state.clone())
            .wrap(Cors::permissive())
            .configure(app_config);
        if serve_static {
            app = app.service(Files::new("/", static_dir.clone()).index_file("index.html"));
        }
        app
    })
    .bind(format!("127.0.0.1:{port}"))
    .map_err(|e| format!("Failed to bind server: {e}"))?
    .run();

    info!("Web service listening at http://127.0.0.1:{port}");

    if let Err(e) = server.await {
        error!("Web server error: {e}");
        return Err(format!("Web server error: {e}"));
    }

    Ok(())
}
