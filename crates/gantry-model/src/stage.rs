//! Stage and pipeline descriptors.

use serde::{Deserialize, Serialize};

use crate::builds::SpecificBuildKind;
use crate::coverage::CoverageSpec;
use crate::ids;
use crate::performance::PerformanceSpec;

/// Name and description of a stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageName {
    /// Human-readable stage name, e.g. `"Quick Checks"`.
    pub name: String,

    /// One-line description shown by the hosting CI system.
    pub description: String,
}

impl StageName {
    /// Create a stage name.
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    /// Stable id segment, e.g. `"QuickChecks"`.
    pub fn id_segment(&self) -> String {
        ids::segment(&self.name)
    }
}

/// One ordered phase of the pipeline.
///
/// Immutable once constructed; consumed exactly once by the pipeline
/// builder. The two policy flags control how this stage's fan-out
/// functional tests are gated:
///
/// - `functional_tests_depend_on_specific_builds`: fan-out tests on the
///   gating execution class depend on this stage's own specific builds.
/// - `depends_on_previous_sanity_check`: fan-out tests depend on the
///   previous stage's sanity check, unless superseded by the flag above
///   together with a sanity check declared in this stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageDescriptor {
    /// Stage identity.
    pub stage_name: StageName,

    /// One-off builds this stage requires.
    pub specific_builds: Vec<SpecificBuildKind>,

    /// Functional test coverage groups, in declared order.
    pub functional_test_coverage: Vec<CoverageSpec>,

    /// Performance test runs, in declared order.
    pub performance_tests: Vec<PerformanceSpec>,

    /// Gate fan-out tests on the previous stage's sanity check.
    pub depends_on_previous_sanity_check: bool,

    /// Gate fan-out tests on this stage's own specific builds.
    pub functional_tests_depend_on_specific_builds: bool,
}

impl StageDescriptor {
    /// Create an empty stage with both policy flags off.
    pub fn new(stage_name: StageName) -> Self {
        Self {
            stage_name,
            specific_builds: Vec::new(),
            functional_test_coverage: Vec::new(),
            performance_tests: Vec::new(),
            depends_on_previous_sanity_check: false,
            functional_tests_depend_on_specific_builds: false,
        }
    }

    /// Declare specific builds.
    pub fn with_specific_builds(mut self, builds: Vec<SpecificBuildKind>) -> Self {
        self.specific_builds = builds;
        self
    }

    /// Declare functional test coverage.
    pub fn with_functional_tests(mut self, coverage: Vec<CoverageSpec>) -> Self {
        self.functional_test_coverage = coverage;
        self
    }

    /// Declare performance tests.
    pub fn with_performance_tests(mut self, tests: Vec<PerformanceSpec>) -> Self {
        self.performance_tests = tests;
        self
    }

    /// Gate fan-out tests on the previous stage's sanity check.
    pub fn depends_on_previous_sanity_check(mut self) -> Self {
        self.depends_on_previous_sanity_check = true;
        self
    }

    /// Gate fan-out tests on this stage's own specific builds.
    pub fn functional_tests_depend_on_specific_builds(mut self) -> Self {
        self.functional_tests_depend_on_specific_builds = true;
        self
    }

    /// Whether this stage declares the designated sanity-check build.
    pub fn has_sanity_check(&self) -> bool {
        self.specific_builds.iter().any(|b| b.is_sanity_check())
    }
}

/// The whole declared pipeline: an ordered stage list plus identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineDescriptor {
    /// Root display name of the generated pipeline.
    pub name: String,

    /// Id prefix applied to every generated job, e.g. `"Gantry_"`.
    pub prefix: String,

    /// Stages in declared order.
    pub stages: Vec<StageDescriptor>,
}

impl PipelineDescriptor {
    /// Create a pipeline descriptor.
    pub fn new(name: &str, prefix: &str, stages: Vec<StageDescriptor>) -> Self {
        Self {
            name: name.to_string(),
            prefix: prefix.to_string(),
            stages,
        }
    }
}
