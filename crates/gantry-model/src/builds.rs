//! One-off specific build kinds.

use serde::{Deserialize, Serialize};

/// Closed set of one-off, non-parallelized builds a stage may declare.
///
/// Adding a variant forces every dispatch site to handle it explicitly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SpecificBuildKind {
    /// Compile every subproject without running tests.
    CompileAll,

    /// API compatibility and lint sanity check. Completion of this build
    /// can gate later stages' functional tests.
    SanityCheck,

    /// Assemble the distribution archives.
    PackageDistributions,

    /// End-to-end smoke tests against the packaged distribution.
    SmokeTests,
}

impl SpecificBuildKind {
    /// Stable id segment for this build kind.
    pub fn id_segment(&self) -> &'static str {
        match self {
            SpecificBuildKind::CompileAll => "CompileAll",
            SpecificBuildKind::SanityCheck => "SanityCheck",
            SpecificBuildKind::PackageDistributions => "PackageDistributions",
            SpecificBuildKind::SmokeTests => "SmokeTests",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            SpecificBuildKind::CompileAll => "Compile All",
            SpecificBuildKind::SanityCheck => "Sanity Check",
            SpecificBuildKind::PackageDistributions => "Package Distributions",
            SpecificBuildKind::SmokeTests => "Smoke Tests",
        }
    }

    /// Whether this kind is the designated gating build whose completion
    /// downstream stages may depend on.
    pub fn is_sanity_check(&self) -> bool {
        matches!(self, SpecificBuildKind::SanityCheck)
    }
}
