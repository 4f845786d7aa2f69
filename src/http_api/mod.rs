use std::{
    net::SocketAddr,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    AggregatedPlan, ExportFormat, LaborCategory, PersistenceError, PlanError, PlanRequest,
    ProjectType, export_plan,
};

/// The most recent successful generation, kept so an export can be retried.
#[derive(Debug, Clone)]
struct LatestPlan {
    plan: AggregatedPlan,
    conversion_factor: f64,
}

#[derive(Clone)]
pub struct AppState {
    latest: Arc<RwLock<Option<LatestPlan>>>,
    export_dir: Arc<PathBuf>,
}

impl AppState {
    /// Exports requested over HTTP are written below `export_dir`.
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            latest: Arc::default(),
            export_dir: Arc::new(export_dir.into()),
        }
    }

    fn latest(&self) -> Arc<RwLock<Option<LatestPlan>>> {
        self.latest.clone()
    }

    /// Resolve a client path under the export directory. Only plain relative
    /// paths are accepted.
    fn export_path(&self, requested: &Path) -> Result<PathBuf, ApiError> {
        let mut components = requested.components().peekable();
        if components.peek().is_none() {
            return Err(ApiError::Invalid("export path is empty".into()));
        }
        if !components.all(|component| matches!(component, Component::Normal(_))) {
            return Err(ApiError::Invalid(format!(
                "export path '{}' must be relative to the export directory",
                requested.display()
            )));
        }
        Ok(self.export_dir.join(requested))
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Unprocessable(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl From<PlanError> for ApiError {
    fn from(value: PlanError) -> Self {
        match value {
            PlanError::Invalid(_) | PlanError::Calendar(_) => ApiError::Invalid(value.to_string()),
            PlanError::NothingToGenerate => ApiError::Unprocessable(value.to_string()),
            PlanError::Curve(_) | PlanError::Series(_) => ApiError::Internal(value.to_string()),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(value: PersistenceError) -> Self {
        match value {
            PersistenceError::InvalidData(_) => ApiError::Invalid(value.to_string()),
            _ => ApiError::Internal(value.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Unprocessable(message) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "nothing_to_generate", message)
            }
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ProjectTypeInfo {
    project_type: ProjectType,
    name: &'static str,
    modules: &'static [&'static str],
    categories: &'static [LaborCategory],
    supports_winter_break: bool,
}

#[derive(Debug, Deserialize)]
struct ExportPayload {
    format: ExportFormat,
    path: PathBuf,
}

#[derive(Debug, Serialize)]
struct ExportSummary {
    format: ExportFormat,
    path: PathBuf,
    months: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/project-types", get(project_types))
        .route("/plans", post(generate_plan))
        .route("/plans/latest", get(latest_plan))
        .route("/plans/latest/export", post(export_latest))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, export_dir: PathBuf) -> std::io::Result<()> {
    std::fs::create_dir_all(&export_dir)?;
    info!(%addr, export_dir = %export_dir.display(), "http api listening");
    let app = router(AppState::new(export_dir));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn project_types() -> Json<Vec<ProjectTypeInfo>> {
    let types = ProjectType::ALL
        .iter()
        .map(|project_type| ProjectTypeInfo {
            project_type: *project_type,
            name: project_type.name_zh(),
            modules: project_type.modules(),
            categories: project_type.categories(),
            supports_winter_break: project_type.supports_winter_break(),
        })
        .collect();
    Json(types)
}

async fn generate_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<AggregatedPlan>, ApiError> {
    let plan = request.generate().map_err(|err| {
        warn!(error = %err, "plan generation rejected");
        ApiError::from(err)
    })?;
    let latest = state.latest();
    {
        let mut guard = latest.write();
        *guard = Some(LatestPlan {
            plan: plan.clone(),
            conversion_factor: request.metadata.conversion_factor,
        });
    }
    Ok(Json(plan))
}

async fn latest_plan(State(state): State<AppState>) -> Result<Json<AggregatedPlan>, ApiError> {
    let latest = state.latest();
    let plan = {
        let guard = latest.read();
        guard.as_ref().map(|latest| latest.plan.clone())
    };
    plan.map(Json)
        .ok_or_else(|| ApiError::not_found("no plan has been generated yet"))
}

async fn export_latest(
    State(state): State<AppState>,
    Json(payload): Json<ExportPayload>,
) -> Result<Json<ExportSummary>, ApiError> {
    let latest = state.latest();
    let current = {
        let guard = latest.read();
        guard.clone()
    };
    let current = current.ok_or_else(|| ApiError::not_found("no plan has been generated yet"))?;
    let path = state.export_path(&payload.path)?;
    export_plan(&current.plan, current.conversion_factor, payload.format, &path).map_err(|err| {
        warn!(error = %err, path = %path.display(), "export failed");
        ApiError::from(err)
    })?;
    Ok(Json(ExportSummary {
        format: payload.format,
        path,
        months: current.plan.months().len(),
    }))
}
