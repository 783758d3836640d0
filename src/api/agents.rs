//! Agent, task, and metrics API endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::registry::types::{Agent, AgentTask, NewAgent, NewTask, PerformanceMetrics, TaskOutcome};

use super::routes::AppState;
use super::types::{DeletedResponse, UpdateTaskRequest};

/// Create agent routes (nested at `/api/agents`).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_agent))
        .route("/", get(list_agents))
        .route("/:id", get(get_agent))
        .route("/:id", put(update_agent))
        .route("/:id", delete(delete_agent))
        .route("/:id/tasks", post(create_task))
        .route("/:id/tasks", get(list_agent_tasks))
        .route("/:id/metrics", get(get_metrics))
        .route("/:id/metrics", post(record_task_outcome))
}

/// Create task routes (nested at `/api/tasks`).
pub fn task_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/:id", get(get_task))
        .route("/:id", put(update_task))
}

fn agent_not_found(id: Uuid) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("Agent {} not found", id))
}

/// POST /api/agents - Create a new agent.
async fn create_agent(
    State(state): State<Arc<AppState>>,
    Json(params): Json<NewAgent>,
) -> Json<Agent> {
    Json(state.agents.create_agent(params).await)
}

/// GET /api/agents - List all agents.
async fn list_agents(State(state): State<Arc<AppState>>) -> Json<Vec<Agent>> {
    Json(state.agents.list_agents().await)
}

/// GET /api/agents/:id - Get an agent by ID.
async fn get_agent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Agent>, (StatusCode, String)> {
    state
        .agents
        .get_agent(id)
        .await
        .map(Json)
        .ok_or_else(|| agent_not_found(id))
}

/// PUT /api/agents/:id - Partially update an agent's attributes.
async fn update_agent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<Agent>, (StatusCode, String)> {
    state
        .agents
        .update_agent(id, &fields)
        .await
        .map(Json)
        .ok_or_else(|| agent_not_found(id))
}

/// DELETE /api/agents/:id - Delete an agent and its metrics.
async fn delete_agent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, (StatusCode, String)> {
    if state.agents.delete_agent(id).await {
        Ok(Json(DeletedResponse {
            message: format!("Agent {} deleted", id),
        }))
    } else {
        Err(agent_not_found(id))
    }
}

/// POST /api/agents/:id/tasks - Create a task for an agent.
async fn create_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(params): Json<NewTask>,
) -> Result<Json<AgentTask>, (StatusCode, String)> {
    state
        .agents
        .create_task(id, params)
        .await
        .map(Json)
        .ok_or_else(|| agent_not_found(id))
}

/// GET /api/agents/:id/tasks - List an agent's tasks.
async fn list_agent_tasks(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AgentTask>>, (StatusCode, String)> {
    if state.agents.get_agent(id).await.is_none() {
        return Err(agent_not_found(id));
    }
    Ok(Json(state.agents.agent_tasks(id).await))
}

/// GET /api/tasks/:id - Get a task by ID.
async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AgentTask>, (StatusCode, String)> {
    state
        .agents
        .get_task(id)
        .await
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Task {} not found", id)))
}

/// PUT /api/tasks/:id - Update a task's status and result.
async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<AgentTask>, (StatusCode, String)> {
    state
        .agents
        .update_task(id, req.status, req.result)
        .await
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Task {} not found", id)))
}

/// GET /api/agents/:id/metrics - Get an agent's performance metrics.
async fn get_metrics(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PerformanceMetrics>, (StatusCode, String)> {
    state
        .agents
        .metrics(id)
        .await
        .map(Json)
        .ok_or_else(|| agent_not_found(id))
}

/// POST /api/agents/:id/metrics - Record a task outcome for an agent.
async fn record_task_outcome(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(outcome): Json<TaskOutcome>,
) -> Result<Json<PerformanceMetrics>, (StatusCode, String)> {
    state
        .agents
        .record_task_outcome(id, &outcome)
        .await
        .map(Json)
        .ok_or_else(|| agent_not_found(id))
}
