//! Per-cycle reporting
//!
//! The scheduler supplies the data; how it is rendered is a reporter concern.

use crate::prober::CheckResult;
use crate::stats::DomainAvailability;
use chrono::{DateTime, Utc};
use tracing::info;

/// One endpoint observation within a cycle
#[derive(Debug, Clone)]
pub struct Observation {
    pub name: String,
    pub domain: String,
    pub result: CheckResult,
}

/// Everything one completed cycle produced
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// 1-based cycle number
    pub cycle: u64,

    /// Wall-clock time the cycle began
    pub started_at: DateTime<Utc>,

    /// Per-endpoint results, in configured order
    pub observations: Vec<Observation>,

    /// Cumulative availability per domain, in first-seen order
    pub availability: Vec<DomainAvailability>,
}

/// Sink for per-cycle output
pub trait CycleReporter: Send + Sync {
    fn cycle_started(&self, cycle: u64);
    fn endpoint_checked(&self, observation: &Observation);
    fn cycle_completed(&self, report: &CycleReport);
}

/// Reporter that writes cycle output as log lines
#[derive(Debug, Default)]
pub struct LogReporter;

impl CycleReporter for LogReporter {
    fn cycle_started(&self, cycle: u64) {
        info!("--- Starting check cycle {} ---", cycle);
    }

    fn endpoint_checked(&self, observation: &Observation) {
        info!(
            "[{}] ({}) status: {}",
            observation.name, observation.domain, observation.result
        );
    }

    fn cycle_completed(&self, report: &CycleReport) {
        info!("--- Availability summary ---");
        for entry in &report.availability {
            info!("{}: {}% availability", entry.domain, entry.percent);
        }
        info!("--- End of check cycle {} ---", report.cycle);
    }
}
