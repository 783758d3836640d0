//! In-memory registry for agents, their tasks, and performance metrics.

use std::collections::HashMap;

use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::types::{Agent, AgentTask, NewAgent, NewTask, PerformanceMetrics, TaskOutcome};

/// Owns agent records, their tasks, and per-agent performance metrics.
///
/// All storage is process-local and non-durable. Each method takes the
/// relevant lock for its whole read-modify-write, so single calls are
/// atomic; there are no transactions across calls.
pub struct AgentRegistry {
    agents: RwLock<HashMap<Uuid, Agent>>,
    tasks: RwLock<HashMap<Uuid, AgentTask>>,
    metrics: RwLock<HashMap<Uuid, PerformanceMetrics>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            agents: RwLock::new(HashMap::new()),
            tasks: RwLock::new(HashMap::new()),
            metrics: RwLock::new(HashMap::new()),
        }
    }

    /// Create an agent along with its all-zero metrics record.
    pub async fn create_agent(&self, params: NewAgent) -> Agent {
        let agent = Agent {
            id: Uuid::new_v4(),
            name: params.name,
            description: params.description,
            domain: params.domain,
            capabilities: params.capabilities,
            personality: params.personality,
            knowledge_base: params.knowledge_base,
            dependencies: Vec::new(),
            created_at: Utc::now(),
        };

        self.agents.write().await.insert(agent.id, agent.clone());
        self.metrics
            .write()
            .await
            .insert(agent.id, PerformanceMetrics::new(agent.id));

        tracing::debug!("Created agent {} ({})", agent.id, agent.name);
        agent
    }

    pub async fn get_agent(&self, id: Uuid) -> Option<Agent> {
        self.agents.read().await.get(&id).cloned()
    }

    pub async fn list_agents(&self) -> Vec<Agent> {
        self.agents.read().await.values().cloned().collect()
    }

    /// Apply a lenient partial update to an agent.
    ///
    /// Unknown field names are ignored; the (possibly unchanged) record is
    /// returned. `None` when the agent does not exist.
    pub async fn update_agent(&self, id: Uuid, fields: &Map<String, Value>) -> Option<Agent> {
        let mut agents = self.agents.write().await;
        let agent = agents.get_mut(&id)?;
        agent.apply_update(fields);
        Some(agent.clone())
    }

    /// Delete an agent, cascading removal of its metrics record.
    ///
    /// Tasks are not cascaded; they keep referencing the deleted agent.
    pub async fn delete_agent(&self, id: Uuid) -> bool {
        let removed = self.agents.write().await.remove(&id).is_some();
        if removed {
            self.metrics.write().await.remove(&id);
            tracing::debug!("Deleted agent {} and its metrics", id);
        }
        removed
    }

    /// Create a task bound to an existing agent.
    ///
    /// Returns `None` when the agent does not exist; the reference is not
    /// re-validated after creation.
    pub async fn create_task(&self, agent_id: Uuid, params: NewTask) -> Option<AgentTask> {
        if !self.agents.read().await.contains_key(&agent_id) {
            return None;
        }

        let task = AgentTask {
            id: Uuid::new_v4(),
            agent_id,
            description: params.description,
            input_data: params.input_data,
            status: "pending".to_string(),
            result: None,
            created_at: Utc::now(),
        };

        self.tasks.write().await.insert(task.id, task.clone());
        Some(task)
    }

    pub async fn get_task(&self, id: Uuid) -> Option<AgentTask> {
        self.tasks.read().await.get(&id).cloned()
    }

    /// Update a task's status and, when provided, its result.
    pub async fn update_task(
        &self,
        id: Uuid,
        status: String,
        result: Option<Map<String, Value>>,
    ) -> Option<AgentTask> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id)?;
        task.status = status;
        if result.is_some() {
            task.result = result;
        }
        Some(task.clone())
    }

    /// All tasks assigned to the given agent.
    pub async fn agent_tasks(&self, agent_id: Uuid) -> Vec<AgentTask> {
        self.tasks
            .read()
            .await
            .values()
            .filter(|t| t.agent_id == agent_id)
            .cloned()
            .collect()
    }

    pub async fn metrics(&self, agent_id: Uuid) -> Option<PerformanceMetrics> {
        self.metrics.read().await.get(&agent_id).cloned()
    }

    /// Fold a task outcome into the agent's running metrics.
    ///
    /// No-op returning `None` when no metrics record exists for the agent.
    /// Callers invoke this explicitly; nothing records outcomes automatically
    /// on task completion.
    pub async fn record_task_outcome(
        &self,
        agent_id: Uuid,
        outcome: &TaskOutcome,
    ) -> Option<PerformanceMetrics> {
        let mut metrics = self.metrics.write().await;
        let record = metrics.get_mut(&agent_id)?;
        record.record(
            outcome.task_success,
            outcome.response_time,
            outcome.quality_score,
        );
        Some(record.clone())
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn researcher() -> NewAgent {
        NewAgent {
            name: "Researcher".to_string(),
            description: "Finds and summarizes sources".to_string(),
            domain: "research".to_string(),
            capabilities: vec!["search".to_string()],
            personality: Map::new(),
            knowledge_base: Vec::new(),
        }
    }

    fn outcome(success: bool, response_time: f64, quality: f64) -> TaskOutcome {
        TaskOutcome {
            task_success: success,
            response_time,
            quality_score: quality,
        }
    }

    #[tokio::test]
    async fn create_agent_initializes_zero_metrics() {
        let registry = AgentRegistry::new();
        let agent = registry.create_agent(researcher()).await;

        let metrics = registry.metrics(agent.id).await.unwrap();
        assert_eq!(metrics.agent_id, agent.id);
        assert_eq!(metrics.task_count, 0);
        assert_eq!(metrics.success_rate, 0.0);
        assert_eq!(metrics.average_response_time, 0.0);
        assert_eq!(metrics.quality_score, 0.0);
        assert_eq!(metrics.user_satisfaction, 0.0);
    }

    #[tokio::test]
    async fn first_outcome_sets_each_metric_to_the_sample() {
        let registry = AgentRegistry::new();
        let agent = registry.create_agent(researcher()).await;

        let metrics = registry
            .record_task_outcome(agent.id, &outcome(true, 2.0, 0.9))
            .await
            .unwrap();

        assert_eq!(metrics.task_count, 1);
        assert_eq!(metrics.success_rate, 1.0);
        assert_eq!(metrics.average_response_time, 2.0);
        assert_eq!(metrics.quality_score, 0.9);
    }

    #[tokio::test]
    async fn two_outcomes_average_as_specified() {
        let registry = AgentRegistry::new();
        let agent = registry.create_agent(researcher()).await;

        registry
            .record_task_outcome(agent.id, &outcome(true, 2.0, 0.9))
            .await
            .unwrap();
        let metrics = registry
            .record_task_outcome(agent.id, &outcome(false, 4.0, 0.5))
            .await
            .unwrap();

        assert_eq!(metrics.task_count, 2);
        assert!((metrics.success_rate - 0.5).abs() < 1e-12);
        assert!((metrics.average_response_time - 3.0).abs() < 1e-12);
        assert!((metrics.quality_score - 0.7).abs() < 1e-12);
        assert_eq!(metrics.user_satisfaction, 0.0);
    }

    #[tokio::test]
    async fn incremental_means_match_batch_means() {
        let registry = AgentRegistry::new();
        let agent = registry.create_agent(researcher()).await;

        let samples = [
            (true, 1.5, 0.8),
            (false, 3.25, 0.4),
            (true, 0.75, 0.95),
            (true, 2.0, 0.6),
            (false, 5.5, 0.1),
        ];

        let mut last = None;
        for (success, rt, q) in samples {
            last = registry
                .record_task_outcome(agent.id, &outcome(success, rt, q))
                .await;
        }
        let metrics = last.unwrap();

        let n = samples.len() as f64;
        let successes: f64 = samples.iter().filter(|(s, _, _)| *s).count() as f64;
        let rt_mean: f64 = samples.iter().map(|(_, rt, _)| rt).sum::<f64>() / n;
        let q_mean: f64 = samples.iter().map(|(_, _, q)| q).sum::<f64>() / n;

        assert_eq!(metrics.task_count, samples.len() as u64);
        assert!((metrics.success_rate - successes / n).abs() < 1e-9);
        assert!((metrics.average_response_time - rt_mean).abs() < 1e-9);
        assert!((metrics.quality_score - q_mean).abs() < 1e-9);
    }

    #[tokio::test]
    async fn outcome_for_unknown_agent_is_a_noop() {
        let registry = AgentRegistry::new();
        let result = registry
            .record_task_outcome(Uuid::new_v4(), &outcome(true, 1.0, 1.0))
            .await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_agent_cascades_metrics() {
        let registry = AgentRegistry::new();
        let agent = registry.create_agent(researcher()).await;

        assert!(registry.delete_agent(agent.id).await);
        assert!(registry.get_agent(agent.id).await.is_none());
        assert!(registry.metrics(agent.id).await.is_none());

        // Second delete reports absence
        assert!(!registry.delete_agent(agent.id).await);
    }

    #[tokio::test]
    async fn update_ignores_unknown_fields() {
        let registry = AgentRegistry::new();
        let agent = registry.create_agent(researcher()).await;

        let mut fields = Map::new();
        fields.insert("favorite_color".to_string(), json!("teal"));
        fields.insert("name".to_string(), json!("Senior Researcher"));

        let updated = registry.update_agent(agent.id, &fields).await.unwrap();
        assert_eq!(updated.name, "Senior Researcher");
        assert_eq!(updated.domain, agent.domain);
    }

    #[tokio::test]
    async fn update_ignores_mismatched_value_shapes() {
        let registry = AgentRegistry::new();
        let agent = registry.create_agent(researcher()).await;

        let mut fields = Map::new();
        fields.insert("capabilities".to_string(), json!("not-a-list"));

        let updated = registry.update_agent(agent.id, &fields).await.unwrap();
        assert_eq!(updated.capabilities, agent.capabilities);
    }

    #[tokio::test]
    async fn update_missing_agent_returns_none() {
        let registry = AgentRegistry::new();
        assert!(registry
            .update_agent(Uuid::new_v4(), &Map::new())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn tasks_require_an_existing_agent() {
        let registry = AgentRegistry::new();
        let params = NewTask {
            description: "summarize".to_string(),
            input_data: Map::new(),
        };
        assert!(registry
            .create_task(Uuid::new_v4(), params)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn task_lifecycle() {
        let registry = AgentRegistry::new();
        let agent = registry.create_agent(researcher()).await;

        let task = registry
            .create_task(
                agent.id,
                NewTask {
                    description: "summarize".to_string(),
                    input_data: Map::new(),
                },
            )
            .await
            .unwrap();
        assert_eq!(task.status, "pending");
        assert!(task.result.is_none());

        // Status-only update leaves the result untouched
        let updated = registry
            .update_task(task.id, "running".to_string(), None)
            .await
            .unwrap();
        assert_eq!(updated.status, "running");
        assert!(updated.result.is_none());

        let mut result = Map::new();
        result.insert("summary".to_string(), json!("done"));
        let updated = registry
            .update_task(task.id, "completed".to_string(), Some(result))
            .await
            .unwrap();
        assert_eq!(updated.status, "completed");
        assert!(updated.result.is_some());

        let by_agent = registry.agent_tasks(agent.id).await;
        assert_eq!(by_agent.len(), 1);
        assert_eq!(by_agent[0].id, task.id);
    }

    #[tokio::test]
    async fn tasks_survive_agent_deletion() {
        let registry = AgentRegistry::new();
        let agent = registry.create_agent(researcher()).await;
        let task = registry
            .create_task(
                agent.id,
                NewTask {
                    description: "summarize".to_string(),
                    input_data: Map::new(),
                },
            )
            .await
            .unwrap();

        registry.delete_agent(agent.id).await;
        assert!(registry.get_task(task.id).await.is_some());
    }
}
