use std::collections::HashMap;

use sysinfo::{DiskKind as SysDiskKind, Disks};
use thiserror::Error;
use tracing::debug;

use crate::model::{
    HealthStatus, MediaType, Partition, PhysicalDisk, ReliabilityCounters, Volume,
};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("storage enumeration failed: {0}")]
    Enumeration(String),
}

/// Seam to the platform storage APIs. Everything above this trait is pure;
/// everything below it is a pass-through over whatever the host exposes.
///
/// Absence of counters or of a volume is a normal outcome on every
/// implementation, never an error.
pub trait DeviceDataProvider {
    /// Capability precondition: false in environments where physical-disk
    /// enumeration is not possible (virtualized, unprivileged, no storage
    /// subsystem support).
    fn is_available(&self) -> bool;

    /// Zero-or-more disk snapshots, sortable by device id.
    fn physical_disks(&self) -> Result<Vec<PhysicalDisk>, ProviderError>;

    fn reliability_counters(&self, device_id: u32) -> Option<ReliabilityCounters>;

    fn partitions(&self, device_id: u32) -> Vec<Partition>;

    fn volume(&self, partition: &Partition) -> Option<Volume>;
}

/// Default provider over `sysinfo`'s mounted-disk list. Each mounted disk
/// maps to one disk snapshot carrying a single partition and volume.
///
/// `sysinfo` exposes no SMART telemetry, so `reliability_counters` always
/// resolves to `None` here and scoring takes the status-fallback path.
pub struct SysinfoProvider {
    disks: Disks,
}

impl SysinfoProvider {
    pub fn new() -> Self {
        Self {
            disks: Disks::new_with_refreshed_list(),
        }
    }
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceDataProvider for SysinfoProvider {
    fn is_available(&self) -> bool {
        !self.disks.list().is_empty()
    }

    fn physical_disks(&self) -> Result<Vec<PhysicalDisk>, ProviderError> {
        let disks = self
            .disks
            .list()
            .iter()
            .enumerate()
            .map(|(index, disk)| {
                let media_type = match disk.kind() {
                    SysDiskKind::HDD => MediaType::Hdd,
                    SysDiskKind::SSD => MediaType::Ssd,
                    _ => MediaType::Unknown,
                };
                let name = disk.name().to_string_lossy().to_string();
                let mount = disk.mount_point().to_string_lossy().to_string();

                // sysinfo carries no device health; a disk that mounted and
                // reports capacity is taken as healthy rather than unknown,
                // which would score it 0 on the fallback path.
                let health_status = if disk.total_space() > 0 {
                    HealthStatus::Healthy
                } else {
                    HealthStatus::Unknown
                };

                PhysicalDisk {
                    device_id: index as u32,
                    friendly_name: if name.is_empty() { mount } else { name },
                    serial_number: None,
                    media_type,
                    bus_type: None,
                    size_bytes: disk.total_space(),
                    health_status,
                    operational_status: "OK".to_string(),
                }
            })
            .collect::<Vec<_>>();
        debug!(count = disks.len(), "enumerated mounted disks via sysinfo");
        Ok(disks)
    }

    fn reliability_counters(&self, _device_id: u32) -> Option<ReliabilityCounters> {
        None
    }

    fn partitions(&self, device_id: u32) -> Vec<Partition> {
        if (device_id as usize) < self.disks.list().len() {
            vec![Partition {
                partition_number: 1,
                device_id,
            }]
        } else {
            Vec::new()
        }
    }

    fn volume(&self, partition: &Partition) -> Option<Volume> {
        let disk = self.disks.list().get(partition.device_id as usize)?;
        let size_bytes = disk.total_space();
        Some(Volume {
            mount_label: disk.mount_point().to_string_lossy().to_string(),
            filesystem_label: disk.name().to_string_lossy().to_string(),
            filesystem: disk.file_system().to_string_lossy().to_string(),
            size_bytes,
            free_bytes: disk.available_space().min(size_bytes),
        })
    }
}

/// Fixture-backed provider for tests: every record is supplied up front and
/// every absence branch can be exercised deterministically.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    pub available: bool,
    pub disks: Vec<PhysicalDisk>,
    pub counters: HashMap<u32, ReliabilityCounters>,
    pub partitions: Vec<Partition>,
    pub volumes: HashMap<(u32, u32), Volume>,
}

impl StaticProvider {
    pub fn available(disks: Vec<PhysicalDisk>) -> Self {
        Self {
            available: true,
            disks,
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn with_counters(mut self, device_id: u32, counters: ReliabilityCounters) -> Self {
        self.counters.insert(device_id, counters);
        self
    }

    pub fn with_partition(mut self, partition: Partition, volume: Option<Volume>) -> Self {
        if let Some(volume) = volume {
            self.volumes
                .insert((partition.device_id, partition.partition_number), volume);
        }
        self.partitions.push(partition);
        self
    }
}

impl DeviceDataProvider for StaticProvider {
    fn is_available(&self) -> bool {
        self.available
    }

    fn physical_disks(&self) -> Result<Vec<PhysicalDisk>, ProviderError> {
        Ok(self.disks.clone())
    }

    fn reliability_counters(&self, device_id: u32) -> Option<ReliabilityCounters> {
        self.counters.get(&device_id).cloned()
    }

    fn partitions(&self, device_id: u32) -> Vec<Partition> {
        self.partitions
            .iter()
            .filter(|partition| partition.device_id == device_id)
            .cloned()
            .collect()
    }

    fn volume(&self, partition: &Partition) -> Option<Volume> {
        self.volumes
            .get(&(partition.device_id, partition.partition_number))
            .cloned()
    }
}
