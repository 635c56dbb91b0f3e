//! Whole-pipeline graph assembly and validation.
//!
//! Drives the stage builder across the declared stage order, threading
//! each stage's snapshot to its successor, then validates the assembled
//! graph. Construction is single-pass and deterministic: the same
//! descriptor always yields the same jobs, ids, and edge sets.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use gantry_model::{pipeline_digest, PipelineDescriptor};

use crate::error::{GraphError, GraphResult};
use crate::factory::{
    DefaultPerformanceCoordinatorFactory, DefaultSpecificBuildFactory,
    PerformanceCoordinatorFactory, SpecificBuildFactory,
};
use crate::job::{Edge, FailureAction, JobKind, JobNode};
use crate::report::{stage_report_tabs, NullRegistrar, ReportRegistrar};
use crate::stage_graph::{StageGraphBuilder, StageSnapshot};

/// The finalized job graph, in declared-order-preserving form.
///
/// Write-once: consumed by an external renderer/scheduler, never read back
/// by the builder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineGraph {
    /// Pipeline display name.
    pub name: String,

    /// Deterministic digest of the source descriptor.
    pub descriptor_digest: String,

    /// All jobs, stage by stage in declared order, gates after their
    /// stage's jobs, worker pool last.
    pub jobs: Vec<JobNode>,
}

impl PipelineGraph {
    /// Look up a job by id.
    pub fn job(&self, id: &str) -> Option<&JobNode> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// All jobs of one kind, in graph order.
    pub fn jobs_of_kind(&self, kind: JobKind) -> Vec<&JobNode> {
        self.jobs.iter().filter(|j| j.kind == kind).collect()
    }

    /// Return job ids in topological order, dependencies before dependents.
    ///
    /// Kahn's algorithm; ties are released in sorted id order so the
    /// result is deterministic. Returns [`GraphError::DependencyCycle`]
    /// if no complete ordering exists.
    pub fn topological_order(&self) -> GraphResult<Vec<&str>> {
        let mut in_degree: HashMap<&str, usize> = self
            .jobs
            .iter()
            .map(|j| (j.id.as_str(), j.dependencies.len()))
            .collect();

        // dependency id -> dependent ids
        let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
        for job in &self.jobs {
            for edge in &job.dependencies {
                dependents
                    .entry(edge.target.as_str())
                    .or_default()
                    .push(job.id.as_str());
            }
        }

        let mut queue: VecDeque<&str> = self
            .jobs
            .iter()
            .filter(|j| j.dependencies.is_empty())
            .map(|j| j.id.as_str())
            .collect();

        let mut sorted = Vec::with_capacity(self.jobs.len());

        while let Some(id) = queue.pop_front() {
            sorted.push(id);
            if let Some(deps) = dependents.get(id) {
                let mut next: Vec<&str> = Vec::new();
                for &dependent in deps {
                    let degree =
                        in_degree
                            .get_mut(dependent)
                            .ok_or_else(|| GraphError::UnknownJob {
                                id: dependent.to_string(),
                            })?;
                    *degree -= 1;
                    if *degree == 0 {
                        next.push(dependent);
                    }
                }
                next.sort_unstable();
                queue.extend(next);
            }
        }

        if sorted.len() != self.jobs.len() {
            let sorted_set: HashSet<&str> = sorted.iter().copied().collect();
            let remaining = self
                .jobs
                .iter()
                .filter(|j| !sorted_set.contains(j.id.as_str()))
                .map(|j| j.id.clone())
                .collect();
            return Err(GraphError::DependencyCycle { ids: remaining });
        }

        Ok(sorted)
    }

    /// Check the graph is well-formed: every edge targets an existing job
    /// and a topological order exists.
    fn validate(&self) -> GraphResult<()> {
        let ids: HashSet<&str> = self.jobs.iter().map(|j| j.id.as_str()).collect();
        for job in &self.jobs {
            for edge in &job.dependencies {
                if !ids.contains(edge.target.as_str()) {
                    return Err(GraphError::UnknownJob {
                        id: edge.target.clone(),
                    });
                }
            }
        }
        self.topological_order().map(|_| ())
    }
}

/// Assembles the full multi-stage graph from a descriptor.
pub struct PipelineBuilder<'a> {
    descriptor: &'a PipelineDescriptor,
    build_factory: Box<dyn SpecificBuildFactory>,
    perf_factory: Box<dyn PerformanceCoordinatorFactory>,
}

impl<'a> PipelineBuilder<'a> {
    /// Create a builder with the default deterministic factories.
    pub fn new(descriptor: &'a PipelineDescriptor) -> Self {
        Self {
            descriptor,
            build_factory: Box::new(DefaultSpecificBuildFactory),
            perf_factory: Box::new(DefaultPerformanceCoordinatorFactory),
        }
    }

    /// Replace the collaborator factories.
    pub fn with_factories(
        mut self,
        build_factory: Box<dyn SpecificBuildFactory>,
        perf_factory: Box<dyn PerformanceCoordinatorFactory>,
    ) -> Self {
        self.build_factory = build_factory;
        self.perf_factory = perf_factory;
        self
    }

    /// Build the graph, discarding report-tab registrations.
    pub fn build(&self) -> GraphResult<PipelineGraph> {
        let mut registrar = NullRegistrar;
        self.build_with_reports(&mut registrar)
    }

    /// Build the graph, announcing each stage's report tabs to `registrar`.
    ///
    /// Stages are processed in declared order, single-pass. Any error
    /// aborts construction for the whole pipeline; no partial graph is
    /// returned.
    pub fn build_with_reports(
        &self,
        registrar: &mut dyn ReportRegistrar,
    ) -> GraphResult<PipelineGraph> {
        let stage_builder = StageGraphBuilder::new(
            self.descriptor,
            self.build_factory.as_ref(),
            self.perf_factory.as_ref(),
        );

        let mut graph = PipelineGraph {
            name: self.descriptor.name.clone(),
            descriptor_digest: pipeline_digest(self.descriptor),
            jobs: Vec::new(),
        };
        let mut seen_ids: HashSet<String> = HashSet::new();

        let mut previous: Option<StageSnapshot> = None;
        let mut previous_gate: Option<String> = None;
        let mut any_performance_tests = false;

        for stage in &self.descriptor.stages {
            info!(stage = %stage.stage_name.name, "deriving stage jobs");

            let stage_jobs = stage_builder.build(stage, previous.as_ref())?;

            let tabs = stage_report_tabs(stage);
            if !tabs.is_empty() {
                registrar.register_tabs(stage, &tabs);
            }
            any_performance_tests |= !stage.performance_tests.is_empty();

            // Stage gate: the stage's externally observable pass marker.
            let mut gate = JobNode::new(
                format!(
                    "{}Stage_{}_Gate",
                    self.descriptor.prefix,
                    stage.stage_name.id_segment()
                ),
                format!("Stage Gate: {}", stage.stage_name.name),
                JobKind::StageGate,
            );
            for job in &stage_jobs.jobs {
                gate.depends_on(Edge::new(
                    &job.id,
                    FailureAction::Fail,
                    FailureAction::Cancel,
                ));
            }
            if let Some(prev_gate) = &previous_gate {
                gate.depends_on(Edge::new(
                    prev_gate,
                    FailureAction::Fail,
                    FailureAction::Cancel,
                ));
            }

            for job in stage_jobs.jobs {
                push_job(&mut graph, &mut seen_ids, job)?;
            }
            previous_gate = Some(gate.id.clone());
            push_job(&mut graph, &mut seen_ids, gate)?;

            previous = Some(stage_jobs.snapshot);
        }

        // Performance execution is a pipeline-wide shared resource: one
        // pool for the whole pipeline, never one per stage.
        if any_performance_tests {
            debug!("pipeline declares performance tests, adding worker pool");
            let pool = JobNode::new(
                format!("{}Workers", self.descriptor.prefix),
                format!("{} Workers", self.descriptor.name),
                JobKind::WorkerPool,
            );
            push_job(&mut graph, &mut seen_ids, pool)?;
        }

        graph.validate()?;

        info!(
            jobs = graph.jobs.len(),
            digest = %graph.descriptor_digest,
            "pipeline graph assembled"
        );
        Ok(graph)
    }
}

fn push_job(
    graph: &mut PipelineGraph,
    seen_ids: &mut HashSet<String>,
    job: JobNode,
) -> GraphResult<()> {
    if !seen_ids.insert(job.id.clone()) {
        return Err(GraphError::DuplicateJobId { id: job.id });
    }
    graph.jobs.push(job);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_model::{
        CoverageSpec, ExecutionClass, SpecificBuildKind, StageDescriptor, StageName, TestKind,
    };

    fn two_stage_descriptor() -> PipelineDescriptor {
        PipelineDescriptor::new(
            "Gantry",
            "Gantry_",
            vec![
                StageDescriptor::new(StageName::new("Quick Checks", ""))
                    .with_specific_builds(vec![SpecificBuildKind::SanityCheck]),
                StageDescriptor::new(StageName::new("Portability Checks", ""))
                    .with_functional_tests(vec![CoverageSpec::new(
                        TestKind::Quick,
                        ExecutionClass::Windows,
                        "jdk17",
                    )])
                    .depends_on_previous_sanity_check(),
            ],
        )
    }

    #[test]
    fn test_build_threads_previous_stage_snapshot() {
        let descriptor = two_stage_descriptor();
        let graph = PipelineBuilder::new(&descriptor).build().unwrap();
        let fan_out = graph
            .job("Gantry_Stage_PortabilityChecks_QuickJdk17Windows")
            .unwrap();
        assert!(fan_out.depends_on_id("Gantry_Stage_QuickChecks_SanityCheck"));
    }

    #[test]
    fn test_every_stage_gets_a_gate_chained_to_the_previous() {
        let descriptor = two_stage_descriptor();
        let graph = PipelineBuilder::new(&descriptor).build().unwrap();
        let gates = graph.jobs_of_kind(JobKind::StageGate);
        assert_eq!(gates.len(), 2);

        let second = graph.job("Gantry_Stage_PortabilityChecks_Gate").unwrap();
        assert!(second.depends_on_id("Gantry_Stage_QuickChecks_Gate"));
        assert!(second.depends_on_id("Gantry_Stage_PortabilityChecks_QuickJdk17Windows"));
    }

    #[test]
    fn test_no_worker_pool_without_performance_tests() {
        let descriptor = two_stage_descriptor();
        let graph = PipelineBuilder::new(&descriptor).build().unwrap();
        assert!(graph.jobs_of_kind(JobKind::WorkerPool).is_empty());
    }

    #[test]
    fn test_topological_order_puts_dependencies_first() {
        let descriptor = two_stage_descriptor();
        let graph = PipelineBuilder::new(&descriptor).build().unwrap();
        let order = graph.topological_order().unwrap();
        let pos = |id: &str| order.iter().position(|x| *x == id).unwrap();
        assert!(
            pos("Gantry_Stage_QuickChecks_SanityCheck")
                < pos("Gantry_Stage_PortabilityChecks_QuickJdk17Windows")
        );
        assert!(pos("Gantry_Stage_QuickChecks_Gate") < pos("Gantry_Stage_PortabilityChecks_Gate"));
    }

    #[test]
    fn test_topological_order_detects_cycles() {
        let mut a = JobNode::new("a", "A", JobKind::SpecificBuild);
        a.depends_on(Edge::cancel_both("b"));
        let mut b = JobNode::new("b", "B", JobKind::SpecificBuild);
        b.depends_on(Edge::cancel_both("a"));
        let graph = PipelineGraph {
            name: "cyclic".to_string(),
            descriptor_digest: String::new(),
            jobs: vec![a, b],
        };
        assert!(matches!(
            graph.topological_order(),
            Err(GraphError::DependencyCycle { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_edge_target() {
        let mut job = JobNode::new("a", "A", JobKind::SpecificBuild);
        job.depends_on(Edge::cancel_both("ghost"));
        let graph = PipelineGraph {
            name: "broken".to_string(),
            descriptor_digest: String::new(),
            jobs: vec![job],
        };
        assert!(matches!(
            graph.validate(),
            Err(GraphError::UnknownJob { .. })
        ));
    }

    #[test]
    fn test_duplicate_soak_identity_across_stages_is_fatal() {
        // Top-level identity is stage-independent, so the same soak spec
        // declared twice collides.
        let soak = CoverageSpec::new(TestKind::Soak, ExecutionClass::Linux, "jdk17");
        let descriptor = PipelineDescriptor::new(
            "Gantry",
            "Gantry_",
            vec![
                StageDescriptor::new(StageName::new("Stage One", ""))
                    .with_functional_tests(vec![soak.clone()]),
                StageDescriptor::new(StageName::new("Stage Two", ""))
                    .with_functional_tests(vec![soak]),
            ],
        );
        let result = PipelineBuilder::new(&descriptor).build();
        assert!(matches!(result, Err(GraphError::DuplicateJobId { .. })));
    }

    #[test]
    fn test_graph_serializes_in_declared_order() {
        let descriptor = two_stage_descriptor();
        let graph = PipelineBuilder::new(&descriptor).build().unwrap();
        let value = serde_json::to_value(&graph).unwrap();
        let ids: Vec<&str> = value["jobs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            vec![
                "Gantry_Stage_QuickChecks_SanityCheck",
                "Gantry_Stage_QuickChecks_Gate",
                "Gantry_Stage_PortabilityChecks_QuickJdk17Windows",
                "Gantry_Stage_PortabilityChecks_Gate",
            ]
        );
    }
}
