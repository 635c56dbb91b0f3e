//! The standard pipeline descriptor.

use crate::builds::SpecificBuildKind;
use crate::coverage::{CoverageSpec, ExecutionClass, TestKind};
use crate::performance::{PerformanceSpec, PerformanceTestKind};
use crate::stage::{PipelineDescriptor, StageDescriptor, StageName};

impl PipelineDescriptor {
    /// The standard five-stage pipeline: gating-class quick feedback,
    /// cross-platform quick feedback, merge gate, nightly, release.
    pub fn standard() -> Self {
        let stages = vec![
            StageDescriptor::new(StageName::new(
                "Quick Checks",
                "Fast feedback on the gating execution class",
            ))
            .with_specific_builds(vec![
                SpecificBuildKind::CompileAll,
                SpecificBuildKind::SanityCheck,
            ])
            .with_functional_tests(vec![CoverageSpec::new(
                TestKind::Quick,
                ExecutionClass::Linux,
                "jdk17",
            )]),
            StageDescriptor::new(StageName::new(
                "Portability Checks",
                "Quick feedback on the remaining execution classes",
            ))
            .with_functional_tests(vec![
                CoverageSpec::new(TestKind::Quick, ExecutionClass::Windows, "jdk17"),
                CoverageSpec::new(TestKind::Quick, ExecutionClass::MacOs, "jdk17"),
            ])
            .depends_on_previous_sanity_check(),
            StageDescriptor::new(StageName::new(
                "Full Checks",
                "Everything that must pass before merging",
            ))
            .with_specific_builds(vec![
                SpecificBuildKind::PackageDistributions,
                SpecificBuildKind::SmokeTests,
            ])
            .with_functional_tests(vec![
                CoverageSpec::new(TestKind::Platform, ExecutionClass::Linux, "jdk17"),
                CoverageSpec::new(TestKind::Platform, ExecutionClass::Windows, "jdk17"),
            ])
            .with_performance_tests(vec![PerformanceSpec::new(PerformanceTestKind::Regression)])
            .functional_tests_depend_on_specific_builds(),
            StageDescriptor::new(StageName::new(
                "Nightly Checks",
                "Slow coverage run on a nightly cadence",
            ))
            .with_functional_tests(vec![
                CoverageSpec::new(TestKind::CrossVersion, ExecutionClass::Linux, "jdk17"),
                CoverageSpec::new(TestKind::Parallel, ExecutionClass::Linux, "jdk17"),
                CoverageSpec::new(TestKind::NoDaemon, ExecutionClass::Windows, "jdk17"),
            ])
            .with_performance_tests(vec![PerformanceSpec::new(PerformanceTestKind::Historical)]),
            StageDescriptor::new(StageName::new(
                "Release Checks",
                "Exhaustive coverage gating a release",
            ))
            .with_functional_tests(vec![
                CoverageSpec::new(TestKind::Soak, ExecutionClass::Linux, "jdk17"),
                CoverageSpec::new(TestKind::Soak, ExecutionClass::Windows, "jdk17"),
                CoverageSpec::new(
                    TestKind::AllVersionsCrossVersion,
                    ExecutionClass::Linux,
                    "jdk17",
                ),
            ])
            .with_performance_tests(vec![
                PerformanceSpec::new(PerformanceTestKind::Experiment),
                PerformanceSpec::new(PerformanceTestKind::FlakinessDetection),
            ]),
        ];

        PipelineDescriptor::new("Gantry", "Gantry_", stages)
    }
}
