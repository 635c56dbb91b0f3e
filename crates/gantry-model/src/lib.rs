//! Gantry Model - pipeline descriptors
//!
//! Data-only descriptor types consumed by the graph builder:
//! - Ordered stage definitions with gating policy flags
//! - Functional test coverage specs (kind, execution class, runtime)
//! - One-off specific build kinds and performance test kinds
//! - Deterministic pipeline identity digests

pub mod builds;
pub mod coverage;
pub mod defaults;
pub mod digest;
pub mod performance;
pub mod stage;

mod ids;

// Re-export key types
pub use builds::SpecificBuildKind;
pub use coverage::{CoverageSpec, ExecutionClass, TestKind};
pub use digest::pipeline_digest;
pub use performance::{PerformanceSpec, PerformanceTestKind};
pub use stage::{PipelineDescriptor, StageDescriptor, StageName};
