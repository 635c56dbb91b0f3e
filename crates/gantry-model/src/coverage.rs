//! Functional test coverage specs.

use serde::{Deserialize, Serialize};

use crate::ids;
use crate::stage::StageName;

/// Kind of functional test coverage a stage declares.
///
/// `Soak` is the top-level partition: soak coverage runs as one
/// stage-spanning aggregate job and is never fanned out into parallel
/// shards. Everything else is fan-out coverage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TestKind {
    Quick,
    Platform,
    CrossVersion,
    AllVersionsCrossVersion,
    Parallel,
    NoDaemon,
    Soak,
}

impl TestKind {
    /// Stable id segment for this kind.
    pub fn id_segment(&self) -> &'static str {
        match self {
            TestKind::Quick => "Quick",
            TestKind::Platform => "Platform",
            TestKind::CrossVersion => "CrossVersion",
            TestKind::AllVersionsCrossVersion => "AllVersionsCrossVersion",
            TestKind::Parallel => "Parallel",
            TestKind::NoDaemon => "NoDaemon",
            TestKind::Soak => "Soak",
        }
    }

    /// Whether this kind belongs to the top-level (aggregate) partition.
    pub fn is_top_level(&self) -> bool {
        matches!(self, TestKind::Soak)
    }
}

/// Execution class a coverage job is assigned to.
///
/// Exactly one class is the canonical gating class: only coverage running
/// there carries automatically generated specific-build dependency edges,
/// so parallel shards of the same coverage spec on other classes do not
/// duplicate the gate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionClass {
    Linux,
    Windows,
    MacOs,
}

impl ExecutionClass {
    /// Stable id segment for this class.
    pub fn id_segment(&self) -> &'static str {
        match self {
            ExecutionClass::Linux => "Linux",
            ExecutionClass::Windows => "Windows",
            ExecutionClass::MacOs => "MacOs",
        }
    }

    /// True for the canonical gating class.
    pub fn carries_gating_edges(&self) -> bool {
        matches!(self, ExecutionClass::Linux)
    }
}

/// One declared group of functional tests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CoverageSpec {
    /// Coverage kind; determines partition membership.
    pub test_kind: TestKind,

    /// Execution class the coverage runs on.
    pub execution_class: ExecutionClass,

    /// Runtime label, e.g. `"jdk17"`.
    pub runtime: String,
}

impl CoverageSpec {
    /// Create a coverage spec.
    pub fn new(test_kind: TestKind, execution_class: ExecutionClass, runtime: &str) -> Self {
        Self {
            test_kind,
            execution_class,
            runtime: runtime.to_string(),
        }
    }

    /// Display name, e.g. `"Quick Jdk17 Linux"`.
    pub fn name(&self) -> String {
        format!(
            "{} {} {}",
            self.test_kind.id_segment(),
            ids::segment(&self.runtime),
            self.execution_class.id_segment()
        )
    }

    /// Id segment derived from the spec alone, e.g. `"QuickJdk17Linux"`.
    pub fn id_segment(&self) -> String {
        format!(
            "{}{}{}",
            self.test_kind.id_segment(),
            ids::segment(&self.runtime),
            self.execution_class.id_segment()
        )
    }

    /// Stage-spanning aggregate id, derived from the spec alone.
    ///
    /// Used for top-level coverage, which keeps one identity regardless of
    /// the stage that declares it.
    pub fn aggregate_id(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.id_segment())
    }

    /// Stage-qualified id for fan-out coverage.
    pub fn stage_id(&self, prefix: &str, stage: &StageName) -> String {
        format!("{}Stage_{}_{}", prefix, stage.id_segment(), self.id_segment())
    }
}
