//! Gantry Graph - CI pipeline topology generation
//!
//! Turns an ordered list of stage descriptors into a deterministic DAG of
//! build jobs:
//! - Partitions functional coverage into aggregate and fan-out groups
//! - Wires gating edges per an explicit decision table
//! - Threads previous-stage context as immutable snapshots
//! - Validates the finished graph (unique ids, no cycles) before emitting
//!
//! Construction is pure and synchronous; Cancel/Fail/Ignore reactions are
//! labels on emitted edges for the external scheduler, not behavior
//! performed here.

pub mod error;
pub mod factory;
pub mod job;
pub mod pipeline;
pub mod policy;
pub mod report;
pub mod splitter;
pub mod stage_graph;

// Re-export key types
pub use error::{GraphError, GraphResult};
pub use factory::{
    DefaultPerformanceCoordinatorFactory, DefaultSpecificBuildFactory,
    PerformanceCoordinatorFactory, SpecificBuildFactory,
};
pub use job::{Edge, FailureAction, JobKind, JobNode};
pub use pipeline::{PipelineBuilder, PipelineGraph};
pub use policy::{EdgePlan, PreviousSanityCheck};
pub use report::{NullRegistrar, RecordingRegistrar, ReportRegistrar, ReportTab};
pub use splitter::{split_coverage, CoveragePartition};
pub use stage_graph::{StageGraphBuilder, StageJobs, StageSnapshot};
