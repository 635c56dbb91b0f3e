//! Job nodes and dependency edges.

use serde::{Deserialize, Serialize};

/// Reaction the external scheduler applies when a dependency fails or is
/// cancelled. These are labels on emitted edges, not behavior performed
/// during construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FailureAction {
    Cancel,
    Fail,
    Ignore,
}

/// What a generated job is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// One-off build declared by a stage.
    SpecificBuild,

    /// Coordinator for one declared performance test run.
    PerformanceCoordinator,

    /// Functional test coverage job (aggregate or fan-out).
    FunctionalTest,

    /// Per-stage pass marker depending on the stage's own jobs.
    StageGate,

    /// Pipeline-wide shared performance worker pool.
    WorkerPool,
}

/// A directed dependency edge, owned by the dependent job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    /// Id of the job this edge depends on.
    pub target: String,

    /// Reaction when the target fails.
    pub on_failure: FailureAction,

    /// Reaction when the target is cancelled.
    pub on_cancel: FailureAction,
}

impl Edge {
    /// Create an edge with explicit reactions.
    pub fn new(target: &str, on_failure: FailureAction, on_cancel: FailureAction) -> Self {
        Self {
            target: target.to_string(),
            on_failure,
            on_cancel,
        }
    }

    /// Cancel the dependent on either outcome of the target. The policy
    /// applied to all automatically generated coverage gating edges.
    pub fn cancel_both(target: &str) -> Self {
        Self::new(target, FailureAction::Cancel, FailureAction::Cancel)
    }
}

/// One abstract build job in the generated graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobNode {
    /// Globally unique, deterministic id.
    pub id: String,

    /// Human-readable display name.
    pub display_name: String,

    /// Job kind.
    pub kind: JobKind,

    /// Outgoing dependency edges, in insertion order.
    pub dependencies: Vec<Edge>,
}

impl JobNode {
    /// Create a job with no dependencies.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, kind: JobKind) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            kind,
            dependencies: Vec::new(),
        }
    }

    /// Add a dependency edge. Idempotent per target: a second edge to the
    /// same job id is ignored so parallel wiring paths cannot duplicate.
    pub fn depends_on(&mut self, edge: Edge) {
        if !self.dependencies.iter().any(|e| e.target == edge.target) {
            self.dependencies.push(edge);
        }
    }

    /// Whether this job has an edge targeting `id`.
    pub fn depends_on_id(&self, id: &str) -> bool {
        self.dependencies.iter().any(|e| e.target == id)
    }
}
