//! Report tab registration.
//!
//! Purely a side channel toward the hosting CI system: tab registration
//! never affects graph shape.

use serde::{Deserialize, Serialize};

use gantry_model::StageDescriptor;

/// A report tab the hosting CI system should show for a stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportTab {
    /// Tab title.
    pub title: String,

    /// Artifact path the tab renders.
    pub artifact_path: String,
}

impl ReportTab {
    /// Create a report tab.
    pub fn new(title: &str, artifact_path: &str) -> Self {
        Self {
            title: title.to_string(),
            artifact_path: artifact_path.to_string(),
        }
    }
}

/// Collaborator notified of a stage's report tabs, once per stage that has
/// any.
pub trait ReportRegistrar {
    fn register_tabs(&mut self, stage: &StageDescriptor, tabs: &[ReportTab]);
}

/// Registrar that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRegistrar;

impl ReportRegistrar for NullRegistrar {
    fn register_tabs(&mut self, _stage: &StageDescriptor, _tabs: &[ReportTab]) {}
}

/// Registrar that records registrations, keyed by stage name.
#[derive(Debug, Clone, Default)]
pub struct RecordingRegistrar {
    /// (stage name, tab) pairs in registration order.
    pub registered: Vec<(String, ReportTab)>,
}

impl ReportRegistrar for RecordingRegistrar {
    fn register_tabs(&mut self, stage: &StageDescriptor, tabs: &[ReportTab]) {
        for tab in tabs {
            self.registered
                .push((stage.stage_name.name.clone(), tab.clone()));
        }
    }
}

/// Tabs a stage warrants: compatibility reports when it runs the sanity
/// check, a performance report when it declares performance tests.
pub fn stage_report_tabs(stage: &StageDescriptor) -> Vec<ReportTab> {
    let mut tabs = Vec::new();
    if stage.has_sanity_check() {
        tabs.push(ReportTab::new(
            "API Compatibility",
            "reports/api-compatibility/index.html",
        ));
        tabs.push(ReportTab::new(
            "Incubating APIs",
            "reports/incubation/all.html",
        ));
    }
    if !stage.performance_tests.is_empty() {
        tabs.push(ReportTab::new(
            "Performance",
            "reports/performance/index.html",
        ));
    }
    tabs
}
