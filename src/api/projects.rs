//! Project API endpoints.
//!
//! Projects are returned as views with their agent and workflow members
//! resolved through the owning registries at read time.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::registry::types::{NewProject, ProjectView};

use super::routes::AppState;

/// Create project routes (nested at `/api/projects`).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_project))
        .route("/", get(list_projects))
        .route("/:id", get(get_project))
        .route("/:id/agents/:agent_id", post(add_agent))
        .route("/:id/workflows/:workflow_id", post(add_workflow))
}

fn project_not_found(id: Uuid) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("Project {} not found", id))
}

/// POST /api/projects - Create a new project.
async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(params): Json<NewProject>,
) -> Json<ProjectView> {
    let project = state.workflows.create_project(params).await;
    Json(state.workflows.project_view(project).await)
}

/// GET /api/projects - List all projects.
async fn list_projects(State(state): State<Arc<AppState>>) -> Json<Vec<ProjectView>> {
    let mut views = Vec::new();
    for project in state.workflows.list_projects().await {
        views.push(state.workflows.project_view(project).await);
    }
    Json(views)
}

/// GET /api/projects/:id - Get a project by ID.
async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectView>, (StatusCode, String)> {
    let project = state
        .workflows
        .get_project(id)
        .await
        .ok_or_else(|| project_not_found(id))?;
    Ok(Json(state.workflows.project_view(project).await))
}

/// POST /api/projects/:id/agents/:agent_id - Attach an agent to a project.
async fn add_agent(
    State(state): State<Arc<AppState>>,
    Path((id, agent_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ProjectView>, (StatusCode, String)> {
    let project = state
        .workflows
        .add_agent_to_project(id, agent_id)
        .await
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!("Project {} or agent {} not found", id, agent_id),
            )
        })?;
    Ok(Json(state.workflows.project_view(project).await))
}

/// POST /api/projects/:id/workflows/:workflow_id - Attach a workflow to a project.
async fn add_workflow(
    State(state): State<Arc<AppState>>,
    Path((id, workflow_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ProjectView>, (StatusCode, String)> {
    let project = state
        .workflows
        .add_workflow_to_project(id, workflow_id)
        .await
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!("Project {} or workflow {} not found", id, workflow_id),
            )
        })?;
    Ok(Json(state.workflows.project_view(project).await))
}
