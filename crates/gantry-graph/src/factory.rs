//! Factories for externally defined job kinds.
//!
//! The graph builder never inspects a specific build or performance
//! coordinator beyond its id and kind; what the job actually runs is the
//! collaborator's concern. The defaults derive deterministic ids from
//! (prefix, stage name, kind) so repeated runs on the same descriptor
//! reproduce identical graphs.

use gantry_model::{PerformanceSpec, PipelineDescriptor, SpecificBuildKind, StageDescriptor};

use crate::job::{JobKind, JobNode};

/// Supplies one job per specific-build kind a stage declares.
pub trait SpecificBuildFactory {
    fn create(
        &self,
        descriptor: &PipelineDescriptor,
        stage: &StageDescriptor,
        kind: SpecificBuildKind,
    ) -> JobNode;
}

/// Supplies one coordinator job per declared performance test run.
pub trait PerformanceCoordinatorFactory {
    fn create(
        &self,
        descriptor: &PipelineDescriptor,
        stage: &StageDescriptor,
        spec: &PerformanceSpec,
    ) -> JobNode;
}

/// Default factory: stage-qualified ids, no dependencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSpecificBuildFactory;

impl SpecificBuildFactory for DefaultSpecificBuildFactory {
    fn create(
        &self,
        descriptor: &PipelineDescriptor,
        stage: &StageDescriptor,
        kind: SpecificBuildKind,
    ) -> JobNode {
        let id = format!(
            "{}Stage_{}_{}",
            descriptor.prefix,
            stage.stage_name.id_segment(),
            kind.id_segment()
        );
        JobNode::new(id, kind.display_name(), JobKind::SpecificBuild)
    }
}

/// Default factory: stage-qualified coordinator ids, no dependencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPerformanceCoordinatorFactory;

impl PerformanceCoordinatorFactory for DefaultPerformanceCoordinatorFactory {
    fn create(
        &self,
        descriptor: &PipelineDescriptor,
        stage: &StageDescriptor,
        spec: &PerformanceSpec,
    ) -> JobNode {
        let id = format!(
            "{}Stage_{}_{}",
            descriptor.prefix,
            stage.stage_name.id_segment(),
            spec.kind.id_segment()
        );
        JobNode::new(id, spec.kind.display_name(), JobKind::PerformanceCoordinator)
    }
}
