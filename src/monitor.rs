//! Cycle scheduler driving the prober, tracker, and reporter
//!
//! One cycle probes every configured endpoint in order, updates the
//! cumulative domain counters, and emits a summary. Cycles repeat on a fixed
//! cadence floor: a fast cycle is padded with sleep, a slow cycle rolls
//! straight into the next one.

use crate::config::{Config, EndpointSpec};
use crate::errors::{MonitorError, Result};
use crate::prober::{HttpProber, Prober};
use crate::report::{CycleReport, CycleReporter, LogReporter, Observation};
use crate::stats::{domain_of, AvailabilityTracker};
use async_trait::async_trait;
use chrono::Utc;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

/// Minimum wall-clock duration of one check cycle
pub const CYCLE_CADENCE: Duration = Duration::from_secs(15);

/// Time source and sleep capability for the scheduling loop
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by the tokio runtime
#[derive(Debug, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Monitor loop state: endpoint list plus owned collaborators.
///
/// The availability tracker lives here for the whole run; nothing is global
/// and nothing resets between cycles.
pub struct EndpointMonitor {
    endpoints: Vec<EndpointSpec>,
    prober: Box<dyn Prober>,
    reporter: Box<dyn CycleReporter>,
    clock: Box<dyn Clock>,
    tracker: AvailabilityTracker,
    monitor_id: String,
    cycles_completed: u64,
}

impl EndpointMonitor {
    /// Create a monitor over the configured endpoints with the default
    /// HTTP prober, log reporter, and system clock
    pub fn new(config: Config) -> Result<Self> {
        config.validate().map_err(MonitorError::Config)?;

        let prober = HttpProber::new()?;

        Ok(Self::with_parts(
            config.endpoints,
            Box::new(prober),
            Box::new(LogReporter),
            Box::new(SystemClock),
        ))
    }

    /// Assemble a monitor from explicit collaborators
    pub fn with_parts(
        endpoints: Vec<EndpointSpec>,
        prober: Box<dyn Prober>,
        reporter: Box<dyn CycleReporter>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            endpoints,
            prober,
            reporter,
            clock,
            tracker: AvailabilityTracker::new(),
            monitor_id: Uuid::new_v4().to_string(),
            cycles_completed: 0,
        }
    }

    /// Run check cycles until the surrounding task is cancelled
    pub async fn run(&mut self) {
        info!(
            "Monitor {} watching {} endpoints every {}s",
            self.monitor_id,
            self.endpoints.len(),
            CYCLE_CADENCE.as_secs()
        );

        loop {
            self.cycle_and_wait().await;
        }
    }

    /// One cycle followed by the cadence-floor wait
    async fn cycle_and_wait(&mut self) {
        let started = self.clock.now();
        self.run_cycle().await;

        let elapsed = self.clock.now().saturating_duration_since(started);
        let wait = CYCLE_CADENCE.saturating_sub(elapsed);

        debug!(
            "Cycle {} took {}ms, waiting {}ms",
            self.cycles_completed,
            elapsed.as_millis(),
            wait.as_millis()
        );

        self.clock.sleep(wait).await;
    }

    /// Probe every endpoint once and emit the cycle summary
    pub async fn run_cycle(&mut self) -> CycleReport {
        let cycle = self.cycles_completed + 1;
        let started_at = Utc::now();

        self.reporter.cycle_started(cycle);

        let mut observations = Vec::with_capacity(self.endpoints.len());

        for endpoint in &self.endpoints {
            let domain = domain_of(&endpoint.url);
            let result = self.prober.check(endpoint).await;

            self.tracker.record(&domain, result);

            let observation = Observation {
                name: endpoint.display_name().to_string(),
                domain,
                result,
            };
            self.reporter.endpoint_checked(&observation);
            observations.push(observation);
        }

        let report = CycleReport {
            cycle,
            started_at,
            observations,
            availability: self.tracker.snapshot(),
        };
        self.reporter.cycle_completed(&report);

        self.cycles_completed = cycle;
        report
    }

    /// Current monitor statistics
    pub fn stats(&self) -> MonitorStats {
        MonitorStats {
            monitor_id: self.monitor_id.clone(),
            endpoints: self.endpoints.len(),
            cycles_completed: self.cycles_completed,
            domains_tracked: self.tracker.domain_count(),
        }
    }
}

/// Snapshot of monitor state
#[derive(Debug, Clone)]
pub struct MonitorStats {
    pub monitor_id: String,
    pub endpoints: usize,
    pub cycles_completed: u64,
    pub domains_tracked: usize,
}
