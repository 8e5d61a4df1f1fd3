//! Per-domain availability accounting

use crate::prober::CheckResult;
use std::collections::HashMap;

/// Extract the aggregation domain from an endpoint URL.
///
/// Takes the substring after the scheme separator, up to the next path
/// separator, with any trailing `:port` stripped. Does not validate URL
/// syntax; a malformed URL yields whatever falls out of the splits.
pub fn domain_of(url: &str) -> String {
    let after_scheme = match url.rsplit_once("//") {
        Some((_, rest)) => rest,
        None => url,
    };
    let host = after_scheme.split('/').next().unwrap_or(after_scheme);
    host.split(':').next().unwrap_or(host).to_string()
}

/// Cumulative up/total counters for one domain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainStats {
    pub up: u64,
    pub total: u64,
}

impl DomainStats {
    /// Availability as a truncated integer percentage
    pub fn availability_percent(&self) -> u8 {
        if self.total > 0 {
            (100 * self.up / self.total) as u8
        } else {
            0
        }
    }
}

/// Availability of one domain at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainAvailability {
    pub domain: String,
    pub up: u64,
    pub total: u64,
    pub percent: u8,
}

/// Cumulative per-domain availability for the life of the process.
///
/// Domains are created lazily on first observation and never removed.
/// Summaries iterate in first-seen order.
#[derive(Debug, Default)]
pub struct AvailabilityTracker {
    order: Vec<String>,
    stats: HashMap<String, DomainStats>,
}

impl AvailabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one probe observation for a domain
    pub fn record(&mut self, domain: &str, result: CheckResult) {
        if !self.stats.contains_key(domain) {
            self.order.push(domain.to_string());
        }

        let entry = self.stats.entry(domain.to_string()).or_default();
        entry.total += 1;
        if result == CheckResult::Up {
            entry.up += 1;
        }
    }

    /// Counters for a single domain, if it has been observed
    pub fn get(&self, domain: &str) -> Option<DomainStats> {
        self.stats.get(domain).copied()
    }

    /// Number of distinct domains observed so far
    pub fn domain_count(&self) -> usize {
        self.order.len()
    }

    /// Current availability of every observed domain, in first-seen order
    pub fn snapshot(&self) -> Vec<DomainAvailability> {
        self.order
            .iter()
            .map(|domain| {
                let stats = self.stats.get(domain).copied().unwrap_or_default();
                DomainAvailability {
                    domain: domain.clone(),
                    up: stats.up,
                    total: stats.total,
                    percent: stats.availability_percent(),
                }
            })
            .collect()
    }
}
