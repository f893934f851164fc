use axum::{http::StatusCode, response::Json};
use motion::LoaderConfig;
use serde_json::{Value, json};

pub async fn health_handler() -> Result<Json<Value>, StatusCode> {
    Ok(Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "trail-loader-demo",
        "version": env!("CARGO_PKG_VERSION")
    })))
}

/// Serves the built-in loader tunings so hosts can start from them.
pub async fn presets_handler() -> Result<Json<Value>, StatusCode> {
    let presets = json!({
        "default": LoaderConfig::default(),
        "classic": LoaderConfig::classic(),
    });
    Ok(Json(presets))
}
