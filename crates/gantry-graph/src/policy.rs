//! Gating policy decision table.
//!
//! A stage's fan-out functional tests receive automatic dependency edges
//! from exactly one source: the stage's own specific builds, or the
//! previous stage's sanity check, or neither. The two sources are mutually
//! exclusive; a flag combination under which both would apply is an
//! authoring mistake and is rejected rather than silently resolved.

use gantry_model::StageDescriptor;

use crate::error::{GraphError, GraphResult};

/// What the previous stage made available to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviousSanityCheck<'a> {
    /// There is no previous stage (first stage of the pipeline).
    NoPreviousStage,

    /// A previous stage exists but produced no sanity-check job.
    Absent,

    /// The previous stage's sanity-check job id.
    Available(&'a str),
}

/// Edge source selected for a stage's fan-out functional tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgePlan {
    /// Edges to each of the stage's own specific builds, gating-class
    /// coverage only.
    SpecificBuilds,

    /// One edge to the previous stage's sanity check, all classes.
    PreviousSanityCheck(String),

    /// No automatic edges.
    NoEdges,
}

/// Resolve the stage's policy flags to an edge plan.
///
/// The full table, over (gates on own builds, stage declares a sanity
/// check, wants the previous sanity check, previous-stage context):
///
/// | on builds | own sanity | wants prev | previous       | result                |
/// |-----------|------------|------------|----------------|-----------------------|
/// | true      | true       | any        | any            | SpecificBuilds        |
/// | true      | false      | false      | any            | SpecificBuilds        |
/// | true      | false      | true       | any            | GatingConflict        |
/// | false     | any        | true       | available      | PreviousSanityCheck   |
/// | false     | any        | true       | absent         | MissingSanityCheck    |
/// | false     | any        | true       | no prev stage  | NoEdges               |
/// | false     | any        | false      | any            | NoEdges               |
pub fn edge_plan(
    stage: &StageDescriptor,
    previous: PreviousSanityCheck<'_>,
) -> GraphResult<EdgePlan> {
    let on_builds = stage.functional_tests_depend_on_specific_builds;
    let own_sanity = stage.has_sanity_check();
    let wants_prev = stage.depends_on_previous_sanity_check;

    match (on_builds, own_sanity, wants_prev, previous) {
        (true, false, true, _) => Err(GraphError::GatingConflict {
            stage: stage.stage_name.name.clone(),
        }),
        (true, _, _, _) => Ok(EdgePlan::SpecificBuilds),
        (false, _, true, PreviousSanityCheck::Available(id)) => {
            Ok(EdgePlan::PreviousSanityCheck(id.to_string()))
        }
        (false, _, true, PreviousSanityCheck::Absent) => Err(GraphError::MissingSanityCheck {
            stage: stage.stage_name.name.clone(),
        }),
        (false, _, true, PreviousSanityCheck::NoPreviousStage) => Ok(EdgePlan::NoEdges),
        (false, _, false, _) => Ok(EdgePlan::NoEdges),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_model::{SpecificBuildKind, StageName};

    fn stage(on_builds: bool, own_sanity: bool, wants_prev: bool) -> StageDescriptor {
        let mut builds = vec![SpecificBuildKind::CompileAll];
        if own_sanity {
            builds.push(SpecificBuildKind::SanityCheck);
        }
        let mut stage = StageDescriptor::new(StageName::new("Table Stage", ""))
            .with_specific_builds(builds);
        if on_builds {
            stage = stage.functional_tests_depend_on_specific_builds();
        }
        if wants_prev {
            stage = stage.depends_on_previous_sanity_check();
        }
        stage
    }

    #[test]
    fn test_own_builds_supersede_previous_sanity() {
        // Invariant: both flags on plus an own sanity check suppresses the
        // previous-sanity edge entirely.
        let plan = edge_plan(
            &stage(true, true, true),
            PreviousSanityCheck::Available("prev_sanity"),
        )
        .unwrap();
        assert_eq!(plan, EdgePlan::SpecificBuilds);
    }

    #[test]
    fn test_own_builds_without_prev_flag() {
        let plan = edge_plan(&stage(true, false, false), PreviousSanityCheck::NoPreviousStage)
            .unwrap();
        assert_eq!(plan, EdgePlan::SpecificBuilds);
    }

    #[test]
    fn test_both_rules_applicable_is_a_conflict() {
        let result = edge_plan(
            &stage(true, false, true),
            PreviousSanityCheck::Available("prev_sanity"),
        );
        assert!(matches!(result, Err(GraphError::GatingConflict { .. })));
    }

    #[test]
    fn test_previous_sanity_edge_when_available() {
        let plan = edge_plan(
            &stage(false, false, true),
            PreviousSanityCheck::Available("prev_sanity"),
        )
        .unwrap();
        assert_eq!(plan, EdgePlan::PreviousSanityCheck("prev_sanity".to_string()));
    }

    #[test]
    fn test_missing_sanity_is_a_configuration_error() {
        let result = edge_plan(&stage(false, false, true), PreviousSanityCheck::Absent);
        assert!(matches!(result, Err(GraphError::MissingSanityCheck { .. })));
    }

    #[test]
    fn test_first_stage_skips_previous_sanity() {
        let plan = edge_plan(&stage(false, false, true), PreviousSanityCheck::NoPreviousStage)
            .unwrap();
        assert_eq!(plan, EdgePlan::NoEdges);
    }

    #[test]
    fn test_no_flags_means_no_edges() {
        let plan = edge_plan(
            &stage(false, true, false),
            PreviousSanityCheck::Available("prev_sanity"),
        )
        .unwrap();
        assert_eq!(plan, EdgePlan::NoEdges);
    }
}
