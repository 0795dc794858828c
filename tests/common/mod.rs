// Shared test helpers

#![allow(dead_code)]

use chrono::TimeZone;
use hwdiag::models::*;
use hwdiag::report::Report;

pub fn sample_system() -> SystemInfo {
    SystemInfo {
        os: "Linux 6.1.0".into(),
        os_version: "Linux (Debian 12)".into(),
        machine: "x86_64".into(),
        processor: "Test CPU @ 3.00GHz".into(),
        hostname: "box".into(),
    }
}

pub fn sample_cpu() -> CpuInfo {
    CpuInfo {
        physical_cores: Some(2),
        logical_cores: 4,
        max_frequency_mhz: Some(3000.0),
        current_frequency_mhz: None,
        usage_percent: 12.5,
        per_core_usage: vec![10.0, 20.0, 0.0, 100.0],
    }
}

pub fn sample_memory() -> MemoryInfo {
    MemoryInfo {
        total: 8 * 1024 * 1024 * 1024,
        available: 6 * 1024 * 1024 * 1024,
        used: 2 * 1024 * 1024 * 1024,
        percent: 25.0,
        swap_total: 0,
        swap_free: 0,
        swap_used: 0,
        swap_percent: 0.0,
    }
}

pub fn raw_partition(device: &str, mountpoint: &str, usage: Option<DiskUsage>) -> RawPartition {
    RawPartition {
        device: device.into(),
        mountpoint: mountpoint.into(),
        fstype: "ext4".into(),
        usage,
    }
}

pub fn usage(total: u64, used: u64, free: u64) -> DiskUsage {
    DiskUsage { total, used, free }
}

pub fn sample_gpu(name: &str) -> GpuDevice {
    GpuDevice {
        index: 0,
        uuid: "GPU-1234".into(),
        name: name.into(),
        load_percent: Some(35.0),
        memory_total_mb: Some(8192.0),
        memory_used_mb: Some(1024.0),
        memory_free_mb: Some(7168.0),
        temperature_c: None,
    }
}

pub fn sample_report(disks: Vec<RawPartition>, gpu: GpuReport) -> Report {
    Report {
        title: "Hardware Diagnostic Tool".into(),
        generated_at: chrono::Local
            .with_ymd_and_hms(2026, 10, 15, 9, 30, 0)
            .single()
            .expect("unambiguous local time"),
        system: sample_system(),
        cpu: sample_cpu(),
        memory: sample_memory(),
        disks: DiskInfo {
            partitions: filter_readable(disks),
        },
        gpu,
    }
}
