//! Workflow API endpoints, including the placeholder execute operation.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::registry::types::{ExecutionResult, NewWorkflow, Workflow};

use super::routes::AppState;
use super::types::DeletedResponse;

/// Create workflow routes (nested at `/api/workflows`).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_workflow))
        .route("/", get(list_workflows))
        .route("/:id", get(get_workflow))
        .route("/:id", put(update_workflow))
        .route("/:id", delete(delete_workflow))
        .route("/:id/execute", post(execute_workflow))
}

fn workflow_not_found(id: Uuid) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("Workflow {} not found", id))
}

/// POST /api/workflows - Create a new workflow.
async fn create_workflow(
    State(state): State<Arc<AppState>>,
    Json(params): Json<NewWorkflow>,
) -> Json<Workflow> {
    Json(state.workflows.create_workflow(params).await)
}

/// GET /api/workflows - List all workflows.
async fn list_workflows(State(state): State<Arc<AppState>>) -> Json<Vec<Workflow>> {
    Json(state.workflows.list_workflows().await)
}

/// GET /api/workflows/:id - Get a workflow by ID.
async fn get_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Workflow>, (StatusCode, String)> {
    state
        .workflows
        .get_workflow(id)
        .await
        .map(Json)
        .ok_or_else(|| workflow_not_found(id))
}

/// PUT /api/workflows/:id - Partially update a workflow's attributes.
async fn update_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<Workflow>, (StatusCode, String)> {
    state
        .workflows
        .update_workflow(id, &fields)
        .await
        .map(Json)
        .ok_or_else(|| workflow_not_found(id))
}

/// DELETE /api/workflows/:id - Delete a workflow.
async fn delete_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, (StatusCode, String)> {
    if state.workflows.delete_workflow(id).await {
        Ok(Json(DeletedResponse {
            message: format!("Workflow {} deleted", id),
        }))
    } else {
        Err(workflow_not_found(id))
    }
}

/// POST /api/workflows/:id/execute - Execute a workflow (placeholder).
async fn execute_workflow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input_data): Json<Map<String, Value>>,
) -> Result<Json<ExecutionResult>, (StatusCode, String)> {
    state
        .workflows
        .execute_workflow(id, input_data)
        .await
        .map(Json)
        .ok_or_else(|| workflow_not_found(id))
}
