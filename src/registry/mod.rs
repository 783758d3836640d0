//! In-memory registries backing the ARCHITECT API.
//!
//! Two registries compose the whole data layer:
//! - [`AgentRegistry`]: agents, their tasks, and per-agent performance metrics
//! - [`WorkflowRegistry`]: workflow definitions and projects
//!
//! Storage is process-local and non-durable. Absent records surface as
//! `None`/`false`; the API layer translates absence into 404 responses.

mod agents;
pub mod types;
mod workflows;

pub use agents::AgentRegistry;
pub use workflows::WorkflowRegistry;
