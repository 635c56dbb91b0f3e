//! Coverage partitioning.

use gantry_model::CoverageSpec;

/// A stage's coverage split into its two identity groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoveragePartition {
    /// Stage-spanning aggregate coverage (soak). Not fanned out, identity
    /// derived from the spec alone, receives no automatic edges.
    pub top_level: Vec<CoverageSpec>,

    /// Everything else: fanned out per stage with stage-qualified identity.
    pub fan_out: Vec<CoverageSpec>,
}

/// Partition coverage into top-level and fan-out groups.
///
/// Pure; relative order within each group matches the input order. Empty
/// input yields two empty groups.
pub fn split_coverage(coverage: &[CoverageSpec]) -> CoveragePartition {
    let (top_level, fan_out) = coverage
        .iter()
        .cloned()
        .partition(|spec| spec.test_kind.is_top_level());
    CoveragePartition { top_level, fan_out }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_model::{ExecutionClass, TestKind};

    fn spec(kind: TestKind, runtime: &str) -> CoverageSpec {
        CoverageSpec::new(kind, ExecutionClass::Linux, runtime)
    }

    #[test]
    fn test_empty_input_yields_empty_partitions() {
        let partition = split_coverage(&[]);
        assert!(partition.top_level.is_empty());
        assert!(partition.fan_out.is_empty());
    }

    #[test]
    fn test_soak_goes_top_level() {
        let partition = split_coverage(&[spec(TestKind::Soak, "jdk17")]);
        assert_eq!(partition.top_level.len(), 1);
        assert!(partition.fan_out.is_empty());
    }

    #[test]
    fn test_partition_preserves_relative_order() {
        let input = vec![
            spec(TestKind::Quick, "jdk11"),
            spec(TestKind::Soak, "jdk11"),
            spec(TestKind::Platform, "jdk17"),
            spec(TestKind::Soak, "jdk17"),
            spec(TestKind::Parallel, "jdk17"),
        ];
        let partition = split_coverage(&input);

        let top: Vec<String> = partition.top_level.iter().map(|s| s.name()).collect();
        let fan: Vec<String> = partition.fan_out.iter().map(|s| s.name()).collect();
        assert_eq!(top, vec!["Soak Jdk11 Linux", "Soak Jdk17 Linux"]);
        assert_eq!(
            fan,
            vec!["Quick Jdk11 Linux", "Platform Jdk17 Linux", "Parallel Jdk17 Linux"]
        );
    }

    #[test]
    fn test_partition_loses_and_duplicates_nothing() {
        let input = vec![
            spec(TestKind::Quick, "jdk11"),
            spec(TestKind::Soak, "jdk17"),
            spec(TestKind::NoDaemon, "jdk17"),
        ];
        let partition = split_coverage(&input);
        assert_eq!(
            partition.top_level.len() + partition.fan_out.len(),
            input.len()
        );
        for spec in &input {
            let in_top = partition.top_level.contains(spec);
            let in_fan = partition.fan_out.contains(spec);
            assert!(in_top ^ in_fan, "{} must land in exactly one group", spec.name());
        }
    }
}
