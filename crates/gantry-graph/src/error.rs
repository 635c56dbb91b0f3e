//! Error types for graph construction.

use thiserror::Error;

/// Errors produced while constructing a pipeline graph.
///
/// Any of these aborts construction for the whole pipeline; no partial
/// graph is ever returned, since a partial graph could omit gating edges
/// and allow an unsafe execution order.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Two generated jobs collided on the same id.
    #[error("duplicate job id in generated graph: {id}")]
    DuplicateJobId { id: String },

    /// A stage requested a previous-stage sanity check that was never built.
    #[error("stage '{stage}' depends on the previous stage's sanity check, but that stage produced none")]
    MissingSanityCheck { stage: String },

    /// Both gating rules would apply to the same stage's fan-out tests.
    #[error("stage '{stage}' gates its functional tests on both its own specific builds and the previous sanity check; declare a sanity check in the stage or drop one flag")]
    GatingConflict { stage: String },

    /// A dependency edge targets a job absent from the graph.
    #[error("dependency edge targets unknown job: {id}")]
    UnknownJob { id: String },

    /// The generated graph contains a dependency cycle.
    #[error("dependency cycle detected involving jobs: {ids:?}")]
    DependencyCycle { ids: Vec<String> },
}

/// Convenience result alias.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_job_id_displays_id() {
        let err = GraphError::DuplicateJobId {
            id: "Gantry_Stage_QuickChecks_SanityCheck".to_string(),
        };
        assert!(err.to_string().contains("Gantry_Stage_QuickChecks_SanityCheck"));
    }

    #[test]
    fn test_gating_conflict_displays_stage() {
        let err = GraphError::GatingConflict {
            stage: "Full Checks".to_string(),
        };
        assert!(err.to_string().contains("Full Checks"));
    }

    #[test]
    fn test_cycle_error_displays_job_ids() {
        let err = GraphError::DependencyCycle {
            ids: vec!["a".to_string(), "b".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains('a') && msg.contains('b'));
    }
}
