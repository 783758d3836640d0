//! Domain types for the agent and workflow registries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A named configuration record representing a conceptual AI worker.
///
/// Agents do not execute anything themselves; they describe a specialist
/// (domain, capabilities, personality) that tasks can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier
    pub id: Uuid,

    /// Human-readable name
    pub name: String,

    /// Purpose and capabilities of the agent
    pub description: String,

    /// Primary domain of expertise
    pub domain: String,

    /// Agent capabilities
    pub capabilities: Vec<String>,

    /// Personality traits
    pub personality: Map<String, Value>,

    /// Knowledge sources the agent has access to
    pub knowledge_base: Vec<String>,

    /// IDs of agents this agent depends on (not validated against the registry)
    pub dependencies: Vec<Uuid>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// Apply a partial field update.
    ///
    /// Only declared mutable fields are touched; unknown keys and values that
    /// do not match the field's shape are silently ignored. `id` and
    /// `created_at` are never updatable.
    pub fn apply_update(&mut self, fields: &Map<String, Value>) {
        for (key, value) in fields {
            match key.as_str() {
                "name" => set(&mut self.name, value),
                "description" => set(&mut self.description, value),
                "domain" => set(&mut self.domain, value),
                "capabilities" => set(&mut self.capabilities, value),
                "personality" => set(&mut self.personality, value),
                "knowledge_base" => set(&mut self.knowledge_base, value),
                "dependencies" => set(&mut self.dependencies, value),
                _ => {}
            }
        }
    }
}

/// Assign a JSON value into a typed field, ignoring shape mismatches.
fn set<T: serde::de::DeserializeOwned>(field: &mut T, value: &Value) {
    if let Ok(v) = serde_json::from_value(value.clone()) {
        *field = v;
    }
}

/// Parameters for creating a new agent.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAgent {
    pub name: String,
    pub description: String,
    pub domain: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub personality: Map<String, Value>,
    #[serde(default)]
    pub knowledge_base: Vec<String>,
}

/// A task assigned to an agent.
///
/// Tasks are bound to their agent at creation time and are never deleted;
/// only their status and result change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentTask {
    /// Unique identifier
    pub id: Uuid,

    /// Owning agent (validated at creation time only)
    pub agent_id: Uuid,

    /// What the task asks the agent to do
    pub description: String,

    /// Input data for the task
    pub input_data: Map<String, Value>,

    /// Free-form status string, "pending" on creation
    pub status: String,

    /// Result of the task execution, if any
    pub result: Option<Map<String, Value>>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub description: String,
    #[serde(default)]
    pub input_data: Map<String, Value>,
}

/// Per-agent performance counters maintained as running means.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Agent being measured
    pub agent_id: Uuid,

    /// Number of recorded task outcomes
    pub task_count: u64,

    /// Fraction of successful outcomes (0.0 - 1.0)
    pub success_rate: f64,

    /// Mean task response time in seconds
    pub average_response_time: f64,

    /// Mean quality score (0.0 - 1.0)
    pub quality_score: f64,

    /// Mean user satisfaction (0.0 - 1.0); no operation updates this yet
    pub user_satisfaction: f64,
}

impl PerformanceMetrics {
    /// All-zero metrics for a freshly created agent.
    pub fn new(agent_id: Uuid) -> Self {
        Self {
            agent_id,
            task_count: 0,
            success_rate: 0.0,
            average_response_time: 0.0,
            quality_score: 0.0,
            user_satisfaction: 0.0,
        }
    }

    /// Fold one task outcome into the running means.
    ///
    /// Each metric is recomputed as `(old * (n-1) + sample) / n` where `n`
    /// is the incremented task count. On the first call the `(n-1)` term is
    /// zero, so each metric becomes the sample itself.
    pub fn record(&mut self, task_success: bool, response_time: f64, quality_score: f64) {
        self.task_count += 1;
        let n = self.task_count as f64;

        let success = if task_success { 1.0 } else { 0.0 };
        self.success_rate = (self.success_rate * (n - 1.0) + success) / n;
        self.average_response_time = (self.average_response_time * (n - 1.0) + response_time) / n;
        self.quality_score = (self.quality_score * (n - 1.0) + quality_score) / n;
    }
}

/// A recorded task outcome, the input to a metrics update.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskOutcome {
    pub task_success: bool,
    pub response_time: f64,
    pub quality_score: f64,
}

/// A named, ordered list of step descriptors with declared input/output
/// shapes. Steps are opaque to the registry; nothing executes them yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    /// Unique identifier
    pub id: Uuid,

    /// Human-readable name
    pub name: String,

    /// Purpose of the workflow
    pub description: String,

    /// Ordered step descriptors
    pub steps: Vec<Value>,

    /// Schema for the workflow input
    pub input_schema: Map<String, Value>,

    /// Schema for the workflow output
    pub output_schema: Map<String, Value>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Workflow {
    /// Apply a partial field update; same leniency rules as [`Agent::apply_update`].
    pub fn apply_update(&mut self, fields: &Map<String, Value>) {
        for (key, value) in fields {
            match key.as_str() {
                "name" => set(&mut self.name, value),
                "description" => set(&mut self.description, value),
                "steps" => set(&mut self.steps, value),
                "input_schema" => set(&mut self.input_schema, value),
                "output_schema" => set(&mut self.output_schema, value),
                _ => {}
            }
        }
    }
}

/// Parameters for creating a new workflow.
#[derive(Debug, Clone, Deserialize)]
pub struct NewWorkflow {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub steps: Vec<Value>,
    #[serde(default)]
    pub input_schema: Map<String, Value>,
    #[serde(default)]
    pub output_schema: Map<String, Value>,
}

/// A grouping of agents and workflows plus metadata.
///
/// Projects hold identifiers only; members are resolved through the owning
/// registries at read time, so a deleted member simply drops out of the view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: Uuid,

    /// Human-readable name
    pub name: String,

    /// Purpose of the project
    pub description: String,

    /// Attached agents
    pub agent_ids: Vec<Uuid>,

    /// Attached workflows
    pub workflow_ids: Vec<Uuid>,

    /// Additional project metadata
    pub metadata: Map<String, Value>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// A project with its members resolved to full records.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub agents: Vec<Agent>,
    pub workflows: Vec<Workflow>,
    pub metadata: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

/// Result of a workflow execution.
///
/// Execution is a placeholder: no steps run, the input is echoed verbatim
/// and the output carries a human-readable message naming the workflow.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub workflow_id: Uuid,
    pub status: String,
    pub input: Map<String, Value>,
    pub output: ExecutionOutput,
}

/// Output section of an [`ExecutionResult`].
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionOutput {
    pub message: String,
}
