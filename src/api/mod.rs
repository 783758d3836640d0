//! HTTP API for ARCHITECT.
//!
//! ## Endpoints
//!
//! - `POST /api/agents` - Create an agent (with an all-zero metrics record)
//! - `GET /api/agents` - List agents
//! - `GET /api/agents/{id}` - Get an agent
//! - `PUT /api/agents/{id}` - Partially update an agent
//! - `DELETE /api/agents/{id}` - Delete an agent and its metrics
//! - `POST /api/agents/{id}/tasks` - Create a task for an agent
//! - `GET /api/agents/{id}/tasks` - List an agent's tasks
//! - `GET /api/agents/{id}/metrics` - Get an agent's performance metrics
//! - `POST /api/agents/{id}/metrics` - Record a task outcome
//! - `GET /api/tasks/{id}` - Get a task
//! - `PUT /api/tasks/{id}` - Update a task's status/result
//! - `POST /api/workflows` - Create a workflow
//! - `GET /api/workflows` - List workflows
//! - `GET /api/workflows/{id}` - Get a workflow
//! - `PUT /api/workflows/{id}` - Partially update a workflow
//! - `DELETE /api/workflows/{id}` - Delete a workflow
//! - `POST /api/workflows/{id}/execute` - Execute a workflow (placeholder)
//! - `POST /api/projects` - Create a project
//! - `GET /api/projects` - List projects
//! - `GET /api/projects/{id}` - Get a project
//! - `POST /api/projects/{id}/agents/{agent_id}` - Attach an agent
//! - `POST /api/projects/{id}/workflows/{workflow_id}` - Attach a workflow
//! - `POST /api/generate` - Generate text via the external model
//! - `GET /api/health` - Health check
//!
//! Not-found conditions map to 404 with a message naming the offending id;
//! text-generation failures map to 500 with the underlying message.

mod agents;
mod generate;
mod projects;
mod routes;
pub mod types;
mod workflows;

pub use routes::{serve, AppState};
