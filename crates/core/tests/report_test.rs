use disk_doctor_core::{
    render_report, DeviceDataProvider, HealthStatus, MediaType, Partition, PhysicalDisk,
    StaticProvider, Volume,
};

fn render(provider: &dyn DeviceDataProvider) -> String {
    colored::control::set_override(false);
    let mut buffer = Vec::new();
    render_report(provider, &mut buffer).expect("report renders");
    String::from_utf8(buffer).expect("report is valid utf-8")
}

#[test]
fn healthy_disk_with_half_used_volume_renders_full_section() {
    let disk = PhysicalDisk {
        device_id: 0,
        friendly_name: "Fixture SSD".to_string(),
        serial_number: Some("FIX-0001".to_string()),
        media_type: MediaType::Ssd,
        bus_type: Some("SATA".to_string()),
        size_bytes: 2_147_483_648,
        health_status: HealthStatus::Healthy,
        operational_status: "OK".to_string(),
    };
    let partition = Partition {
        partition_number: 1,
        device_id: 0,
    };
    let volume = Volume {
        mount_label: "C:".to_string(),
        filesystem_label: "System".to_string(),
        filesystem: "ntfs".to_string(),
        size_bytes: 2_147_483_648,
        free_bytes: 1_073_741_824,
    };
    let provider = StaticProvider::available(vec![disk]).with_partition(partition, Some(volume));

    let report = render(&provider);

    // No counters and a Healthy status: score falls back to a flat 100.
    assert!(report.contains("Health score:       100.00"), "{report}");
    assert!(report.contains("size 2.00 GB"), "{report}");
    assert!(report.contains("free 1.00 GB"), "{report}");
    assert!(report.contains("used 50%"), "{report}");
    let half_bar = format!("[{}{}]", "█".repeat(10), "░".repeat(10));
    assert!(report.contains(&half_bar), "{report}");
    assert!(report.contains("Fixture SSD"));
    assert!(report.contains("Serial number:      FIX-0001"));
}

#[test]
fn report_isolates_disks_and_keeps_separators_between_sections() {
    let healthy = PhysicalDisk {
        device_id: 0,
        friendly_name: "Good Disk".to_string(),
        serial_number: None,
        media_type: MediaType::Hdd,
        bus_type: None,
        size_bytes: 1_099_511_627_776,
        health_status: HealthStatus::Healthy,
        operational_status: "OK".to_string(),
    };
    let failing = PhysicalDisk {
        device_id: 1,
        friendly_name: "Tired Disk".to_string(),
        serial_number: None,
        media_type: MediaType::Hdd,
        bus_type: None,
        size_bytes: 1_099_511_627_776,
        health_status: HealthStatus::Unhealthy,
        operational_status: "Degraded".to_string(),
    };
    let provider = StaticProvider::available(vec![healthy, failing]);

    let report = render(&provider);

    let separators = report
        .lines()
        .filter(|line| !line.is_empty() && line.chars().all(|c| c == '-'))
        .count();
    assert_eq!(separators, 2, "one separator per disk section: {report}");
    assert!(report.contains("Health score:       100.00"));
    assert!(report.contains("Health score:       10.00"));
    assert!(report.contains("Operational status: Degraded"));
    // Both disks lack partitions entirely.
    assert_eq!(report.matches("No partitions detected.").count(), 2);
}
