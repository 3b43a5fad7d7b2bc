use std::env;
use std::io::Write;

use anyhow::{Context, Result};
use colored::{Color, Colorize};

use crate::format::{format_bytes, proportion_bar_default};
use crate::model::{HealthStatus, MediaType, PhysicalDisk, ReliabilityCounters};
use crate::provider::DeviceDataProvider;
use crate::score::{classify_severity, health_score, Severity};

const SECTION_SEPARATOR: &str =
    "------------------------------------------------------------";

/// Render the full diagnostic report for every disk the provider exposes,
/// in ascending device-id order.
///
/// The capability-unavailable path prints a diagnostic and returns `Ok`;
/// it is a benign no-op, not a failure, and performs no partition or
/// volume queries.
pub fn render_report(provider: &dyn DeviceDataProvider, out: &mut dyn Write) -> Result<()> {
    if !provider.is_available() {
        render_unavailable_diagnostic(out).context("failed to write diagnostic")?;
        return Ok(());
    }

    let mut disks = provider
        .physical_disks()
        .context("failed to enumerate physical disks")?;
    disks.sort_by_key(|disk| disk.device_id);

    writeln!(out, "Physical disk health report")?;
    if disks.is_empty() {
        writeln!(out, "No physical disks detected.")?;
        return Ok(());
    }

    for disk in &disks {
        // Counters are resolved once here at the report layer and shared
        // with the scorer, so the raw breakdown is shown whenever the
        // provider had any.
        let counters = provider.reliability_counters(disk.device_id);
        render_disk(provider, disk, counters.as_ref(), out)?;
    }

    Ok(())
}

fn render_disk(
    provider: &dyn DeviceDataProvider,
    disk: &PhysicalDisk,
    counters: Option<&ReliabilityCounters>,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "{SECTION_SEPARATOR}")?;
    writeln!(out, "Disk {}: {}", disk.device_id, disk.friendly_name)?;
    writeln!(
        out,
        "  Serial number:      {}",
        disk.serial_number.as_deref().unwrap_or("n/a")
    )?;
    writeln!(out, "  Media type:         {}", media_label(disk.media_type))?;
    writeln!(
        out,
        "  Bus:                {}",
        disk.bus_type.as_deref().unwrap_or("n/a")
    )?;
    writeln!(out, "  Operational status: {}", disk.operational_status)?;
    writeln!(out, "  Capacity:           {}", format_bytes(disk.size_bytes))?;
    writeln!(
        out,
        "  Health status:      {}",
        status_label(disk.health_status)
    )?;

    let score = health_score(disk, counters);
    let severity = classify_severity(score);
    let color = severity_color(severity);
    writeln!(
        out,
        "  Health score:       {} {}",
        format!("{score:.2}").color(color),
        proportion_bar_default(score).color(color)
    )?;

    if let Some(counters) = counters {
        writeln!(
            out,
            "  Reliability:        temperature {:.1} C, read errors {}, write errors {}, power-on hours {}",
            counters.temperature_c,
            counters.read_errors_total,
            counters.write_errors_total,
            counters.power_on_hours
        )?;
    }

    let partitions = provider.partitions(disk.device_id);
    if partitions.is_empty() {
        writeln!(out, "  No partitions detected.")?;
        return Ok(());
    }

    writeln!(out, "  Partitions:")?;
    for partition in &partitions {
        // Partitions without a resolvable volume are skipped on purpose.
        let Some(volume) = provider.volume(partition) else {
            continue;
        };
        let percent_used = volume.percent_used();
        writeln!(
            out,
            "    Partition {} ({}, {}): size {}, free {}, used {}% {}",
            partition.partition_number,
            volume.mount_label,
            volume.filesystem,
            format_bytes(volume.size_bytes),
            format_bytes(volume.free_bytes),
            percent_used,
            proportion_bar_default(percent_used as f64)
        )?;
    }

    Ok(())
}

fn render_unavailable_diagnostic(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "Physical disk enumeration is not available here.")?;
    writeln!(out, "Likely causes:")?;
    writeln!(
        out,
        "  - virtualized or containerized environment without storage passthrough"
    )?;
    writeln!(out, "  - missing administrative privilege")?;
    writeln!(out, "  - no storage subsystem support on this host")?;
    writeln!(
        out,
        "Environment: {} ({}), disk-doctor v{}",
        env::consts::OS,
        env::consts::ARCH,
        env!("CARGO_PKG_VERSION")
    )
}

fn media_label(media: MediaType) -> &'static str {
    match media {
        MediaType::Hdd => "HDD",
        MediaType::Ssd => "SSD",
        MediaType::Unknown => "Unknown",
    }
}

fn status_label(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Healthy => "Healthy",
        HealthStatus::Warning => "Warning",
        HealthStatus::Unhealthy => "Unhealthy",
        HealthStatus::Unknown => "Unknown",
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Nominal => Color::Green,
        Severity::Caution => Color::Cyan,
        Severity::Elevated => Color::Yellow,
        Severity::Warning => Color::BrightRed,
        Severity::Critical => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Partition, Volume};
    use crate::provider::{ProviderError, StaticProvider};

    fn render_to_string(provider: &dyn DeviceDataProvider) -> String {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        render_report(provider, &mut buffer).expect("report renders");
        String::from_utf8(buffer).expect("report is valid utf-8")
    }

    fn healthy_disk(device_id: u32) -> PhysicalDisk {
        PhysicalDisk {
            device_id,
            friendly_name: format!("Fixture Disk {device_id}"),
            serial_number: Some(format!("SER{device_id:04}")),
            media_type: MediaType::Ssd,
            bus_type: Some("NVMe".to_string()),
            size_bytes: 2_147_483_648,
            health_status: HealthStatus::Healthy,
            operational_status: "OK".to_string(),
        }
    }

    #[test]
    fn zero_partition_disk_prints_explicit_notice() {
        let provider = StaticProvider::available(vec![healthy_disk(0)]);
        let report = render_to_string(&provider);
        assert!(report.contains("No partitions detected."));
        assert!(!report.contains("Partitions:"));
    }

    #[test]
    fn partition_without_volume_is_silently_skipped() {
        let provider = StaticProvider::available(vec![healthy_disk(0)]).with_partition(
            Partition {
                partition_number: 1,
                device_id: 0,
            },
            None,
        );
        let report = render_to_string(&provider);
        assert!(report.contains("Partitions:"));
        assert!(!report.contains("Partition 1"));
        assert!(!report.contains("No partitions detected."));
    }

    #[test]
    fn counters_breakdown_appears_whenever_the_provider_had_any() {
        let provider = StaticProvider::available(vec![healthy_disk(0)]).with_counters(
            0,
            ReliabilityCounters {
                temperature_c: 34.0,
                read_errors_total: 2,
                write_errors_total: 0,
                power_on_hours: 4380,
            },
        );
        let report = render_to_string(&provider);
        assert!(report.contains("temperature 34.0 C"));
        assert!(report.contains("read errors 2"));
        assert!(report.contains("power-on hours 4380"));
    }

    #[test]
    fn counters_breakdown_is_absent_without_counters() {
        let provider = StaticProvider::available(vec![healthy_disk(0)]);
        let report = render_to_string(&provider);
        assert!(!report.contains("Reliability:"));
        // No counters, Healthy status: fallback score is a flat 100.
        assert!(report.contains("100.00"));
    }

    #[test]
    fn disks_render_in_ascending_device_id_order() {
        let provider = StaticProvider::available(vec![healthy_disk(2), healthy_disk(0)]);
        let report = render_to_string(&provider);
        let first = report.find("Disk 0:").expect("disk 0 present");
        let second = report.find("Disk 2:").expect("disk 2 present");
        assert!(first < second);
    }

    #[test]
    fn empty_disk_list_renders_a_single_notice() {
        let provider = StaticProvider::available(Vec::new());
        let report = render_to_string(&provider);
        assert!(report.contains("No physical disks detected."));
        assert!(!report.contains(SECTION_SEPARATOR));
    }

    /// Provider that proves the unavailable path never queries further.
    struct UnavailableGuard;

    impl DeviceDataProvider for UnavailableGuard {
        fn is_available(&self) -> bool {
            false
        }

        fn physical_disks(&self) -> Result<Vec<PhysicalDisk>, ProviderError> {
            panic!("physical_disks must not be called when unavailable");
        }

        fn reliability_counters(&self, _device_id: u32) -> Option<ReliabilityCounters> {
            panic!("reliability_counters must not be called when unavailable");
        }

        fn partitions(&self, _device_id: u32) -> Vec<Partition> {
            panic!("partitions must not be called when unavailable");
        }

        fn volume(&self, _partition: &Partition) -> Option<Volume> {
            panic!("volume must not be called when unavailable");
        }
    }

    #[test]
    fn unavailable_provider_yields_diagnostic_and_no_queries() {
        let report = render_to_string(&UnavailableGuard);
        assert!(report.contains("Physical disk enumeration is not available here."));
        assert!(report.contains("missing administrative privilege"));
        assert!(report.contains(env::consts::OS));
    }
}
