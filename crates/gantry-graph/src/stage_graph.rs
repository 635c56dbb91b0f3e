//! Per-stage job materialization and edge wiring.

use tracing::debug;

use gantry_model::{PipelineDescriptor, StageDescriptor};

use crate::error::GraphResult;
use crate::factory::{PerformanceCoordinatorFactory, SpecificBuildFactory};
use crate::job::{Edge, JobKind, JobNode};
use crate::policy::{edge_plan, EdgePlan, PreviousSanityCheck};
use crate::splitter::split_coverage;

/// Read-only snapshot of what a stage produced, handed forward to the next
/// stage. Never mutated by later stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSnapshot {
    /// Stage name.
    pub stage: String,

    /// Id of the stage's sanity-check job, if it declared one.
    pub sanity_check_id: Option<String>,

    /// Ids of all the stage's specific-build jobs, in declared order.
    pub specific_build_ids: Vec<String>,
}

/// A stage's generated jobs plus the snapshot threaded to its successor.
#[derive(Debug, Clone)]
pub struct StageJobs {
    /// All jobs the stage contributes, in creation order: specific builds,
    /// performance coordinators, top-level coverage, fan-out coverage.
    pub jobs: Vec<JobNode>,

    /// Snapshot for the next stage.
    pub snapshot: StageSnapshot,
}

/// Builds the job set for one stage.
pub struct StageGraphBuilder<'a> {
    descriptor: &'a PipelineDescriptor,
    build_factory: &'a dyn SpecificBuildFactory,
    perf_factory: &'a dyn PerformanceCoordinatorFactory,
}

impl<'a> StageGraphBuilder<'a> {
    /// Create a stage builder over a pipeline descriptor.
    pub fn new(
        descriptor: &'a PipelineDescriptor,
        build_factory: &'a dyn SpecificBuildFactory,
        perf_factory: &'a dyn PerformanceCoordinatorFactory,
    ) -> Self {
        Self {
            descriptor,
            build_factory,
            perf_factory,
        }
    }

    /// Materialize one stage's jobs.
    ///
    /// `previous` is the immediately preceding stage's snapshot, `None` for
    /// the first stage. Fan-out coverage jobs are wired according to the
    /// gating decision table; top-level (soak) coverage receives no
    /// automatic edges and keeps a stage-independent identity.
    pub fn build(
        &self,
        stage: &StageDescriptor,
        previous: Option<&StageSnapshot>,
    ) -> GraphResult<StageJobs> {
        let previous_sanity = match previous {
            None => PreviousSanityCheck::NoPreviousStage,
            Some(snapshot) => match snapshot.sanity_check_id.as_deref() {
                Some(id) => PreviousSanityCheck::Available(id),
                None => PreviousSanityCheck::Absent,
            },
        };
        let plan = edge_plan(stage, previous_sanity)?;

        let mut jobs = Vec::new();
        let mut sanity_check_id = None;
        let mut specific_build_ids = Vec::new();

        for kind in &stage.specific_builds {
            let job = self.build_factory.create(self.descriptor, stage, *kind);
            if kind.is_sanity_check() {
                sanity_check_id = Some(job.id.clone());
            }
            specific_build_ids.push(job.id.clone());
            jobs.push(job);
        }

        for spec in &stage.performance_tests {
            jobs.push(self.perf_factory.create(self.descriptor, stage, spec));
        }

        let partition = split_coverage(&stage.functional_test_coverage);

        for spec in &partition.top_level {
            // Stage-spanning aggregate: identity from the spec alone.
            jobs.push(JobNode::new(
                spec.aggregate_id(&self.descriptor.prefix),
                spec.name(),
                JobKind::FunctionalTest,
            ));
        }

        for spec in &partition.fan_out {
            let mut job = JobNode::new(
                spec.stage_id(&self.descriptor.prefix, &stage.stage_name),
                spec.name(),
                JobKind::FunctionalTest,
            );
            match &plan {
                EdgePlan::SpecificBuilds => {
                    // Only the gating execution class carries the edges;
                    // other classes omit them rather than add-and-ignore.
                    if spec.execution_class.carries_gating_edges() {
                        for id in &specific_build_ids {
                            job.depends_on(Edge::cancel_both(id));
                        }
                    }
                }
                EdgePlan::PreviousSanityCheck(id) => {
                    job.depends_on(Edge::cancel_both(id));
                }
                EdgePlan::NoEdges => {}
            }
            debug!(
                job = %job.id,
                edges = job.dependencies.len(),
                "created fan-out coverage job"
            );
            jobs.push(job);
        }

        Ok(StageJobs {
            jobs,
            snapshot: StageSnapshot {
                stage: stage.stage_name.name.clone(),
                sanity_check_id,
                specific_build_ids,
            },
        })
    }
}
