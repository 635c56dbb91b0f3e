//! Performance test specs.

use serde::{Deserialize, Serialize};

/// Kind of performance test run a stage declares.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum PerformanceTestKind {
    /// Regression run against the current baseline.
    Regression,

    /// Experimental run, results not compared to the baseline.
    Experiment,

    /// Historical run across past releases.
    Historical,

    /// Repeated runs hunting for flaky scenarios.
    FlakinessDetection,
}

impl PerformanceTestKind {
    /// Stable id segment for this kind.
    pub fn id_segment(&self) -> &'static str {
        match self {
            PerformanceTestKind::Regression => "PerformanceRegression",
            PerformanceTestKind::Experiment => "PerformanceExperiment",
            PerformanceTestKind::Historical => "PerformanceHistorical",
            PerformanceTestKind::FlakinessDetection => "PerformanceFlakinessDetection",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PerformanceTestKind::Regression => "Performance Regression",
            PerformanceTestKind::Experiment => "Performance Experiment",
            PerformanceTestKind::Historical => "Performance Historical",
            PerformanceTestKind::FlakinessDetection => "Performance Flakiness Detection",
        }
    }
}

/// One declared performance test run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PerformanceSpec {
    /// Run kind.
    pub kind: PerformanceTestKind,
}

impl PerformanceSpec {
    /// Create a performance spec.
    pub fn new(kind: PerformanceTestKind) -> Self {
        Self { kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_segments_are_unique() {
        let kinds = [
            PerformanceTestKind::Regression,
            PerformanceTestKind::Experiment,
            PerformanceTestKind::Historical,
            PerformanceTestKind::FlakinessDetection,
        ];
        let mut segments: Vec<&str> = kinds.iter().map(|k| k.id_segment()).collect();
        segments.sort_unstable();
        segments.dedup();
        assert_eq!(segments.len(), kinds.len(), "id segments must be unique");
    }

    #[test]
    fn test_unknown_performance_kind_fails_deserialization() {
        let result = serde_json::from_str::<PerformanceTestKind>("\"stress\"");
        assert!(result.is_err());
    }
}
