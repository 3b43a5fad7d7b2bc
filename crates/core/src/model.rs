use serde::{Deserialize, Serialize};

/// Immutable snapshot of one physical storage device, materialized once per
/// run by a [`crate::provider::DeviceDataProvider`] and discarded at exit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhysicalDisk {
    pub device_id: u32,
    pub friendly_name: String,
    pub serial_number: Option<String>,
    pub media_type: MediaType,
    pub bus_type: Option<String>,
    pub size_bytes: u64,
    pub health_status: HealthStatus,
    pub operational_status: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Hdd,
    Ssd,
    #[default]
    Unknown,
}

/// Coarse device-reported health state. Drives the fallback score when
/// reliability counters are unavailable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Unhealthy,
    #[default]
    Unknown,
}

/// SMART-like telemetry for one disk. Zero-or-one record per disk; absence
/// is an expected state, not an error, and every consumer handles it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReliabilityCounters {
    pub temperature_c: f64,
    pub read_errors_total: u64,
    pub write_errors_total: u64,
    pub power_on_hours: u64,
}

/// A partition keyed back to its disk by `device_id`. The relationship is
/// lookup, not ownership.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Partition {
    pub partition_number: u32,
    pub device_id: u32,
}

/// A mounted/formatted filesystem on a partition. `free_bytes` never
/// exceeds `size_bytes`; providers clamp on construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Volume {
    pub mount_label: String,
    pub filesystem_label: String,
    pub filesystem: String,
    pub size_bytes: u64,
    pub free_bytes: u64,
}

impl Volume {
    pub fn used_bytes(&self) -> u64 {
        self.size_bytes.saturating_sub(self.free_bytes)
    }

    /// Percentage of the volume in use, rounded to the nearest integer.
    /// Zero-sized volumes report 0.
    pub fn percent_used(&self) -> u64 {
        if self.size_bytes == 0 {
            return 0;
        }
        (self.used_bytes() as f64 / self.size_bytes as f64 * 100.0).round() as u64
    }
}
