//! Persisted settings endpoints.

use actix_web::{web, HttpResponse};
use log::info;

use settings_manager::Settings;

use crate::error::Result;
use crate::server::AppState;

pub async fn get_settings(app_state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(app_state.settings.get().await))
}

/// Replace the stored settings. Omitted fields fall back to defaults.
pub async fn update_settings(
    app_state: web::Data<AppState>,
    body: web::Json<Settings>,
) -> Result<HttpResponse> {
    let saved = app_state.settings.update(body.into_inner()).await?;
    info!("Settings saved (endpoint {})", saved.llm_base_url);
    Ok(HttpResponse::Ok().json(saved))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/settings")
            .route(web::get().to(get_settings))
            .route(web::put().to(update_settings)),
    );
}
