use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::{HealthStatus, PhysicalDisk, ReliabilityCounters};

/// Weighted contribution of each wear factor to the combined score. The
/// weights sum to 1.0 and are not configurable.
const TEMPERATURE_WEIGHT: f64 = 0.30;
const READ_ERROR_WEIGHT: f64 = 0.25;
const WRITE_ERROR_WEIGHT: f64 = 0.25;
const POWER_ON_WEIGHT: f64 = 0.20;

/// Temperatures at or below the baseline carry no penalty; above it the
/// factor loses 2 points per degree.
const TEMPERATURE_BASELINE_C: f64 = 30.0;
const TEMPERATURE_PENALTY_PER_DEGREE: f64 = 2.0;

/// Error counts decay the factor logarithmically, 10 points per doubling.
const ERROR_LOG_PENALTY: f64 = 10.0;

/// Power-on wear costs 10 points per year of continuous operation.
const HOURS_PER_YEAR: f64 = 8760.0;
const POWER_ON_PENALTY_PER_YEAR: f64 = 10.0;

/// Health score for one disk, in `[0, 100]` with two-decimal precision.
///
/// Total function: it never fails and never panics. With counters present
/// the score is a weighted combination of four wear factors; without them
/// it falls back to a fixed mapping from the disk's coarse health status.
/// Counters that produce a non-finite result are treated as "no usable
/// data" and score 0 with a non-fatal warning.
pub fn health_score(disk: &PhysicalDisk, counters: Option<&ReliabilityCounters>) -> f64 {
    let Some(counters) = counters else {
        return fallback_score(disk.health_status);
    };

    if !counters.temperature_c.is_finite() {
        warn!(
            device_id = disk.device_id,
            "reliability counters carry a non-finite temperature; treating as no data"
        );
        return 0.0;
    }

    let combined = TEMPERATURE_WEIGHT * temperature_factor(counters.temperature_c)
        + READ_ERROR_WEIGHT * error_factor(counters.read_errors_total)
        + WRITE_ERROR_WEIGHT * error_factor(counters.write_errors_total)
        + POWER_ON_WEIGHT * power_on_factor(counters.power_on_hours);

    if !combined.is_finite() {
        warn!(
            device_id = disk.device_id,
            "reliability counters produced an unusable score; treating as no data"
        );
        return 0.0;
    }

    (combined * 100.0).round() / 100.0
}

/// Fixed status-to-score table used when no counters are available.
pub fn fallback_score(status: HealthStatus) -> f64 {
    match status {
        HealthStatus::Healthy => 100.0,
        HealthStatus::Warning => 50.0,
        HealthStatus::Unhealthy => 10.0,
        HealthStatus::Unknown => 0.0,
    }
}

/// A reading of 0 or below means the sensor gave no value, not a cold disk.
fn temperature_factor(temperature_c: f64) -> f64 {
    if temperature_c <= 0.0 {
        return 100.0;
    }
    let penalty = ((temperature_c - TEMPERATURE_BASELINE_C) * TEMPERATURE_PENALTY_PER_DEGREE)
        .max(0.0);
    (100.0 - penalty).clamp(0.0, 100.0)
}

/// Exactly zero errors is hard-coded to 100 so the log path is never taken
/// for a clean disk; log2(0 + 1) would otherwise also yield 100 here, but
/// the zero case is a policy, not an arithmetic coincidence.
fn error_factor(errors: u64) -> f64 {
    if errors == 0 {
        return 100.0;
    }
    let penalty = ((errors as f64) + 1.0).log2() * ERROR_LOG_PENALTY;
    (100.0 - penalty).clamp(0.0, 100.0)
}

fn power_on_factor(hours: u64) -> f64 {
    if hours == 0 {
        return 100.0;
    }
    let penalty = (hours as f64 / HOURS_PER_YEAR) * POWER_ON_PENALTY_PER_YEAR;
    (100.0 - penalty).clamp(0.0, 100.0)
}

/// Severity tier for a health score, with inclusive lower bounds.
/// Classification is pure so it can be tested without a terminal; the
/// renderer owns the tier-to-color mapping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Nominal,
    Caution,
    Elevated,
    Warning,
    Critical,
}

pub fn classify_severity(score: f64) -> Severity {
    if score >= 80.0 {
        Severity::Nominal
    } else if score >= 60.0 {
        Severity::Caution
    } else if score >= 40.0 {
        Severity::Elevated
    } else if score >= 20.0 {
        Severity::Warning
    } else {
        Severity::Critical
    }
}
