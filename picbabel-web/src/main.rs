use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use picbabel::{DeepLProvider, FieldSet, Language, Reconciler, TranslateError};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub tags_to_translate: FieldSet,
    #[serde(default)]
    pub array_keys: Vec<String>,
    pub target_lang: String,
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone)]
pub struct AppState {
    pub reconciler: Arc<Reconciler>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().unwrap()),
        )
        .init();

    // Initialize the DeepL-backed reconciler
    let provider = DeepLProvider::from_env()
        .map_err(|e| format!("Failed to initialize translation provider: {}", e))?;
    let state = AppState {
        reconciler: Arc::new(Reconciler::new(Arc::new(provider))),
    };

    info!("Starting picbabel web server");

    // Build router
    let app = Router::new()
        .route("/api/translate", post(translate_fields))
        .route("/api/languages", get(list_languages))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    info!("Server running at http://127.0.0.1:3000");

    axum::serve(listener, app).await?;

    Ok(())
}

fn status_for(err: &TranslateError) -> StatusCode {
    match err {
        TranslateError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        TranslateError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        TranslateError::ProviderResponse(_) | TranslateError::ProviderTransport(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

fn error_reply(err: TranslateError) -> (StatusCode, Json<ErrorResponse>) {
    (
        status_for(&err),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

async fn translate_fields(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<FieldSet>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        fields = request.tags_to_translate.len(),
        target = %request.target_lang,
        "translate request"
    );

    let list_fields: HashSet<String> = request.array_keys.iter().cloned().collect();

    let translated = state
        .reconciler
        .translate(&request.tags_to_translate, &list_fields, &request.target_lang)
        .await
        .map_err(error_reply)?;

    info!(fields = translated.len(), "translate request done");
    Ok(Json(translated))
}

async fn list_languages(
    State(state): State<AppState>,
) -> Result<Json<Vec<Language>>, (StatusCode, Json<ErrorResponse>)> {
    let languages = state
        .reconciler
        .list_target_languages()
        .await
        .map_err(error_reply)?;

    info!(count = languages.len(), "language catalog served");
    Ok(Json(languages))
}
