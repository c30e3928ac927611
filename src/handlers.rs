//! Stateless HTTP façade: each handler maps one route onto the aggregator,
//! the analytics engine or a direct store passthrough. No shared mutable
//! state exists between requests; every read is a fresh store round trip.

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tower_http::trace::TraceLayer;

use crate::aggregator;
use crate::analytics::{self, CompletionReport};
use crate::error::ApiError;
use crate::models::{
    BulkUpdateRequest, CreateTranslationKey, Language, Project, TranslationKey,
    UpdateTranslationKey,
};
use crate::store::{columns, order, Store};

#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Store,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/localizations/:project_id/:locale", get(get_localizations))
        .route(
            "/translation-keys",
            get(list_translation_keys).post(create_translation_key),
        )
        .route("/translation-keys/bulk-update", post(bulk_update_translations))
        .route(
            "/translation-keys/:key_id",
            get(get_translation_key)
                .put(update_translation_key)
                .delete(delete_translation_key),
        )
        .route("/projects", get(list_projects))
        .route("/languages", get(list_languages))
        .route("/analytics/completion", get(completion_analytics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ==================== Response / Query Types ====================

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct LocalizationsResponse {
    project_id: String,
    locale: String,
    localizations: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ProjectFilter {
    project_id: Option<String>,
}

// ==================== Handlers ====================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Flat key -> value map for one project and locale. Keys untranslated in
/// the locale are omitted (contrast with the nested view, which keeps them
/// with an empty translations map).
async fn get_localizations(
    State(state): State<AppState>,
    Path((project_id, locale)): Path<(String, String)>,
) -> Result<Json<LocalizationsResponse>, ApiError> {
    let localizations = aggregator::locale_view(&state.store, &project_id, &locale).await?;
    Ok(Json(LocalizationsResponse {
        project_id,
        locale,
        localizations,
    }))
}

async fn list_translation_keys(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> Result<Json<Vec<TranslationKey>>, ApiError> {
    let keys =
        aggregator::list_translation_keys(&state.store, filter.project_id.as_deref()).await?;
    Ok(Json(keys))
}

async fn get_translation_key(
    State(state): State<AppState>,
    Path(key_id): Path<String>,
) -> Result<Json<TranslationKey>, ApiError> {
    let key = aggregator::get_translation_key(&state.store, &key_id).await?;
    Ok(Json(key))
}

async fn create_translation_key(
    State(state): State<AppState>,
    Json(request): Json<CreateTranslationKey>,
) -> Result<Json<TranslationKey>, ApiError> {
    let created = aggregator::create_translation_key(&state.store, request).await?;
    Ok(Json(created))
}

async fn update_translation_key(
    State(state): State<AppState>,
    Path(key_id): Path<String>,
    Json(updates): Json<UpdateTranslationKey>,
) -> Result<Json<MessageResponse>, ApiError> {
    aggregator::update_translation_key(&state.store, &key_id, updates).await?;
    Ok(Json(MessageResponse {
        message: "Translation key updated successfully".to_string(),
    }))
}

async fn delete_translation_key(
    State(state): State<AppState>,
    Path(key_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    aggregator::delete_translation_key(&state.store, &key_id).await?;
    Ok(Json(MessageResponse {
        message: "Translation key deleted successfully".to_string(),
    }))
}

async fn bulk_update_translations(
    State(state): State<AppState>,
    Json(request): Json<BulkUpdateRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let count = aggregator::bulk_update(&state.store, request.updates).await?;
    Ok(Json(MessageResponse {
        message: format!("Successfully updated {} translations", count),
    }))
}

async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let projects: Vec<Project> = state
        .store
        .select("projects", &[columns("*"), order("name")])
        .await?;
    Ok(Json(projects))
}

async fn list_languages(
    State(state): State<AppState>,
) -> Result<Json<Vec<Language>>, ApiError> {
    let languages: Vec<Language> = state
        .store
        .select("languages", &[columns("*"), order("name")])
        .await?;
    Ok(Json(languages))
}

async fn completion_analytics(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> Result<Json<CompletionReport>, ApiError> {
    let report =
        analytics::completion_report(&state.store, filter.project_id.as_deref()).await?;
    Ok(Json(report))
}
