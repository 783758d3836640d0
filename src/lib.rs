//! # ARCHITECT
//!
//! A meta-level platform for creating, managing, and coordinating
//! specialized AI agents.
//!
//! This library provides:
//! - In-memory registries for agents, tasks, workflows, and projects
//! - Running-mean performance metrics per agent
//! - An HTTP API over the registries plus a text-generation endpoint
//!   backed by OpenRouter
//!
//! Persistence is process-local only: all records live in in-memory maps
//! owned by the registries and vanish on restart.
//!
//! ## Modules
//! - `registry`: the agent and workflow/project registries
//! - `api`: axum routing and request handlers
//! - `llm`: text-generation client (OpenRouter)
//! - `config`: environment-based configuration

pub mod api;
pub mod config;
pub mod llm;
pub mod registry;

pub use config::Config;
pub use registry::{AgentRegistry, WorkflowRegistry};
