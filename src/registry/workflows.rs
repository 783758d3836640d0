//! In-memory registry for workflows and projects.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::agents::AgentRegistry;
use super::types::{
    ExecutionOutput, ExecutionResult, NewProject, NewWorkflow, Project, ProjectView, Workflow,
};

/// Owns workflow definitions and projects.
///
/// Depends on the [`AgentRegistry`] only to validate agent references when
/// attaching an agent to a project and to resolve project members at read
/// time.
pub struct WorkflowRegistry {
    workflows: RwLock<HashMap<Uuid, Workflow>>,
    projects: RwLock<HashMap<Uuid, Project>>,
    agents: Arc<AgentRegistry>,
}

impl WorkflowRegistry {
    pub fn new(agents: Arc<AgentRegistry>) -> Self {
        Self {
            workflows: RwLock::new(HashMap::new()),
            projects: RwLock::new(HashMap::new()),
            agents,
        }
    }

    pub async fn create_workflow(&self, params: NewWorkflow) -> Workflow {
        let workflow = Workflow {
            id: Uuid::new_v4(),
            name: params.name,
            description: params.description,
            steps: params.steps,
            input_schema: params.input_schema,
            output_schema: params.output_schema,
            created_at: Utc::now(),
        };

        self.workflows
            .write()
            .await
            .insert(workflow.id, workflow.clone());

        tracing::debug!("Created workflow {} ({})", workflow.id, workflow.name);
        workflow
    }

    pub async fn get_workflow(&self, id: Uuid) -> Option<Workflow> {
        self.workflows.read().await.get(&id).cloned()
    }

    pub async fn list_workflows(&self) -> Vec<Workflow> {
        self.workflows.read().await.values().cloned().collect()
    }

    /// Apply a lenient partial update to a workflow; unknown fields are
    /// ignored. `None` when the workflow does not exist.
    pub async fn update_workflow(&self, id: Uuid, fields: &Map<String, Value>) -> Option<Workflow> {
        let mut workflows = self.workflows.write().await;
        let workflow = workflows.get_mut(&id)?;
        workflow.apply_update(fields);
        Some(workflow.clone())
    }

    /// Delete a workflow. Project memberships are not cascaded; the deleted
    /// workflow simply stops resolving in project views.
    pub async fn delete_workflow(&self, id: Uuid) -> bool {
        self.workflows.write().await.remove(&id).is_some()
    }

    /// Placeholder execution: no steps run. The result echoes the workflow
    /// id and input verbatim with a hardcoded "completed" status and a
    /// message naming the workflow. `None` when the workflow does not exist.
    pub async fn execute_workflow(
        &self,
        id: Uuid,
        input_data: Map<String, Value>,
    ) -> Option<ExecutionResult> {
        let workflow = self.get_workflow(id).await?;

        tracing::info!("Executing workflow {} ({})", workflow.id, workflow.name);
        Some(ExecutionResult {
            workflow_id: workflow.id,
            status: "completed".to_string(),
            input: input_data,
            output: ExecutionOutput {
                message: format!("Executed workflow: {}", workflow.name),
            },
        })
    }

    pub async fn create_project(&self, params: NewProject) -> Project {
        let project = Project {
            id: Uuid::new_v4(),
            name: params.name,
            description: params.description,
            agent_ids: Vec::new(),
            workflow_ids: Vec::new(),
            metadata: params.metadata,
            created_at: Utc::now(),
        };

        self.projects
            .write()
            .await
            .insert(project.id, project.clone());
        project
    }

    pub async fn get_project(&self, id: Uuid) -> Option<Project> {
        self.projects.read().await.get(&id).cloned()
    }

    pub async fn list_projects(&self) -> Vec<Project> {
        self.projects.read().await.values().cloned().collect()
    }

    /// Attach an agent to a project; validates the agent against the agent
    /// registry. Attaching an already-attached agent is a no-op returning
    /// the unchanged project. `None` when project or agent is missing.
    pub async fn add_agent_to_project(
        &self,
        project_id: Uuid,
        agent_id: Uuid,
    ) -> Option<Project> {
        if self.agents.get_agent(agent_id).await.is_none() {
            return None;
        }

        let mut projects = self.projects.write().await;
        let project = projects.get_mut(&project_id)?;
        if !project.agent_ids.contains(&agent_id) {
            project.agent_ids.push(agent_id);
        }
        Some(project.clone())
    }

    /// Attach a workflow to a project; same semantics as
    /// [`Self::add_agent_to_project`].
    pub async fn add_workflow_to_project(
        &self,
        project_id: Uuid,
        workflow_id: Uuid,
    ) -> Option<Project> {
        if !self.workflows.read().await.contains_key(&workflow_id) {
            return None;
        }

        let mut projects = self.projects.write().await;
        let project = projects.get_mut(&project_id)?;
        if !project.workflow_ids.contains(&workflow_id) {
            project.workflow_ids.push(workflow_id);
        }
        Some(project.clone())
    }

    /// Resolve a project's members to full records.
    ///
    /// Members that have been deleted since attachment are skipped rather
    /// than surfaced as stale copies.
    pub async fn project_view(&self, project: Project) -> ProjectView {
        let mut agents = Vec::with_capacity(project.agent_ids.len());
        for agent_id in &project.agent_ids {
            if let Some(agent) = self.agents.get_agent(*agent_id).await {
                agents.push(agent);
            }
        }

        let workflows = {
            let store = self.workflows.read().await;
            project
                .workflow_ids
                .iter()
                .filter_map(|id| store.get(id).cloned())
                .collect()
        };

        ProjectView {
            id: project.id,
            name: project.name,
            description: project.description,
            agents,
            workflows,
            metadata: project.metadata,
            created_at: project.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::types::NewAgent;
    use serde_json::json;

    fn registries() -> (Arc<AgentRegistry>, WorkflowRegistry) {
        let agents = Arc::new(AgentRegistry::new());
        let workflows = WorkflowRegistry::new(Arc::clone(&agents));
        (agents, workflows)
    }

    fn review_workflow() -> NewWorkflow {
        NewWorkflow {
            name: "Review".to_string(),
            description: "Two-pass document review".to_string(),
            steps: vec![json!({"action": "draft"}), json!({"action": "verify"})],
            input_schema: Map::new(),
            output_schema: Map::new(),
        }
    }

    fn planner() -> NewAgent {
        NewAgent {
            name: "Planner".to_string(),
            description: "Plans work".to_string(),
            domain: "planning".to_string(),
            capabilities: Vec::new(),
            personality: Map::new(),
            knowledge_base: Vec::new(),
        }
    }

    #[tokio::test]
    async fn execute_returns_the_placeholder_shape() {
        let (_, registry) = registries();
        let workflow = registry.create_workflow(review_workflow()).await;

        let mut input = Map::new();
        input.insert("x".to_string(), json!(1));

        let result = registry
            .execute_workflow(workflow.id, input)
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "workflow_id": workflow.id,
                "status": "completed",
                "input": {"x": 1},
                "output": {"message": "Executed workflow: Review"}
            })
        );
    }

    #[tokio::test]
    async fn execute_unknown_workflow_is_not_found() {
        let (_, registry) = registries();
        assert!(registry
            .execute_workflow(Uuid::new_v4(), Map::new())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn workflow_update_ignores_unknown_fields() {
        let (_, registry) = registries();
        let workflow = registry.create_workflow(review_workflow()).await;

        let mut fields = Map::new();
        fields.insert("owner".to_string(), json!("nobody"));
        fields.insert("description".to_string(), json!("Single-pass review"));

        let updated = registry
            .update_workflow(workflow.id, &fields)
            .await
            .unwrap();
        assert_eq!(updated.description, "Single-pass review");
        assert_eq!(updated.steps, workflow.steps);
    }

    #[tokio::test]
    async fn workflow_delete() {
        let (_, registry) = registries();
        let workflow = registry.create_workflow(review_workflow()).await;

        assert!(registry.delete_workflow(workflow.id).await);
        assert!(registry.get_workflow(workflow.id).await.is_none());
        assert!(!registry.delete_workflow(workflow.id).await);
    }

    #[tokio::test]
    async fn attaching_the_same_agent_twice_is_a_noop() {
        let (agents, registry) = registries();
        let agent = agents.create_agent(planner()).await;
        let project = registry
            .create_project(NewProject {
                name: "Launch".to_string(),
                description: "Launch planning".to_string(),
                metadata: Map::new(),
            })
            .await;

        registry
            .add_agent_to_project(project.id, agent.id)
            .await
            .unwrap();
        let project = registry
            .add_agent_to_project(project.id, agent.id)
            .await
            .unwrap();

        assert_eq!(project.agent_ids, vec![agent.id]);
    }

    #[tokio::test]
    async fn attaching_requires_both_records() {
        let (agents, registry) = registries();
        let agent = agents.create_agent(planner()).await;
        let project = registry
            .create_project(NewProject {
                name: "Launch".to_string(),
                description: "Launch planning".to_string(),
                metadata: Map::new(),
            })
            .await;

        assert!(registry
            .add_agent_to_project(project.id, Uuid::new_v4())
            .await
            .is_none());
        assert!(registry
            .add_agent_to_project(Uuid::new_v4(), agent.id)
            .await
            .is_none());
        assert!(registry
            .add_workflow_to_project(project.id, Uuid::new_v4())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn project_view_resolves_members_and_drops_deleted_ones() {
        let (agents, registry) = registries();
        let agent = agents.create_agent(planner()).await;
        let workflow = registry.create_workflow(review_workflow()).await;
        let project = registry
            .create_project(NewProject {
                name: "Launch".to_string(),
                description: "Launch planning".to_string(),
                metadata: Map::new(),
            })
            .await;

        registry.add_agent_to_project(project.id, agent.id).await;
        registry
            .add_workflow_to_project(project.id, workflow.id)
            .await;

        let view = registry
            .project_view(registry.get_project(project.id).await.unwrap())
            .await;
        assert_eq!(view.agents.len(), 1);
        assert_eq!(view.workflows.len(), 1);

        agents.delete_agent(agent.id).await;
        let view = registry
            .project_view(registry.get_project(project.id).await.unwrap())
            .await;
        assert!(view.agents.is_empty());
        assert_eq!(view.workflows.len(), 1);
    }

    #[tokio::test]
    async fn agent_updates_are_visible_through_project_views() {
        let (agents, registry) = registries();
        let agent = agents.create_agent(planner()).await;
        let project = registry
            .create_project(NewProject {
                name: "Launch".to_string(),
                description: "Launch planning".to_string(),
                metadata: Map::new(),
            })
            .await;
        registry.add_agent_to_project(project.id, agent.id).await;

        let mut fields = Map::new();
        fields.insert("name".to_string(), json!("Lead Planner"));
        agents.update_agent(agent.id, &fields).await.unwrap();

        let view = registry
            .project_view(registry.get_project(project.id).await.unwrap())
            .await;
        assert_eq!(view.agents[0].name, "Lead Planner");
    }
}
