// System, CPU, memory and disk inspection via sysinfo

mod linux;
#[cfg(unix)]
mod unix;

pub use linux::parse_cpu_model;

use crate::models::*;
use std::sync::Arc;
use std::time::Duration;
use sysinfo::{Disks, System};
use tracing::instrument;

pub struct SysinfoRepo {
    sys: Arc<std::sync::Mutex<System>>,
    /// Separate handle so the blocking CPU sample does not hold up memory/system reads.
    cpu: Arc<std::sync::Mutex<System>>,
    disks: Arc<std::sync::Mutex<Disks>>,
    cpu_interval: Duration,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

/// Non-empty value or [`UNKNOWN`]. Accepts both `String` and `Option<String>` provider results.
fn or_unknown(value: impl Into<Option<String>>) -> String {
    value
        .into()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN.into())
}

/// Platform family as `uname -s` names it (`Linux`, `Darwin`, `Windows`), not the distribution.
pub fn os_family() -> String {
    match std::env::consts::OS {
        "linux" | "android" => "Linux".into(),
        "macos" | "ios" => "Darwin".into(),
        "windows" => "Windows".into(),
        "freebsd" => "FreeBSD".into(),
        "netbsd" => "NetBSD".into(),
        "openbsd" => "OpenBSD".into(),
        other => other.into(),
    }
}

#[cfg(unix)]
fn partition_usage(disk: &sysinfo::Disk) -> Option<DiskUsage> {
    unix::read_disk_usage(disk.mount_point())
}

/// Without statvfs, reserved blocks cannot be told apart, so `used` is `total - available`.
#[cfg(not(unix))]
fn partition_usage(disk: &sysinfo::Disk) -> Option<DiskUsage> {
    let total = disk.total_space();
    if total == 0 || std::fs::metadata(disk.mount_point()).is_err() {
        return None;
    }
    let available = disk.available_space();
    Some(DiskUsage {
        total,
        used: total.saturating_sub(available),
        free: available,
    })
}

impl SysinfoRepo {
    /// `cpu_interval` is the utilization sample window; it is raised to
    /// `sysinfo::MINIMUM_CPU_UPDATE_INTERVAL` when shorter.
    pub fn new(cpu_interval: Duration) -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();
        let disks = Disks::new_with_refreshed_list();
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            cpu: Arc::new(std::sync::Mutex::new(System::new())),
            disks: Arc::new(std::sync::Mutex::new(disks)),
            cpu_interval: cpu_interval.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    /// Effective CPU sample window.
    pub fn cpu_interval(&self) -> Duration {
        self.cpu_interval
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_system_info"))]
    pub async fn get_system_info(&self) -> anyhow::Result<SystemInfo> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            let os = match System::kernel_version().filter(|r| !r.trim().is_empty()) {
                Some(release) => format!("{} {}", os_family(), release.trim()),
                None => os_family(),
            };
            let processor = linux::read_cpu_model_linux().or_else(|| {
                sys.cpus()
                    .first()
                    .map(|c| c.brand().trim().to_string())
                    .filter(|s| !s.is_empty())
            });
            Ok(SystemInfo {
                os,
                os_version: or_unknown(System::long_os_version()),
                machine: or_unknown(System::cpu_arch()),
                processor: or_unknown(processor),
                hostname: or_unknown(System::host_name()),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// Blocks a worker thread for [`SysinfoRepo::cpu_interval`] while utilization is sampled.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_cpu_info"))]
    pub async fn get_cpu_info(&self) -> anyhow::Result<CpuInfo> {
        let cpu = self.cpu.clone();
        let interval = self.cpu_interval;
        tokio::task::spawn_blocking(move || {
            let mut sys = cpu
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_cpu_all();
            std::thread::sleep(interval);
            sys.refresh_cpu_all();

            let logical = sys.cpus().len();
            anyhow::ensure!(logical > 0, "no CPUs reported by the OS");

            let per_core_usage: Vec<f32> = sys
                .cpus()
                .iter()
                .map(|c| c.cpu_usage().clamp(0.0, 100.0))
                .collect();
            let freqs: Vec<u64> = sys
                .cpus()
                .iter()
                .map(|c| c.frequency())
                .filter(|f| *f > 0)
                .collect();
            let current_frequency_mhz = if freqs.is_empty() {
                None
            } else {
                Some(freqs.iter().sum::<u64>() as f64 / freqs.len() as f64)
            };

            Ok(CpuInfo {
                physical_cores: System::physical_core_count(),
                logical_cores: logical,
                max_frequency_mhz: linux::read_max_frequency_mhz_linux(),
                current_frequency_mhz,
                usage_percent: sys.global_cpu_usage().clamp(0.0, 100.0),
                per_core_usage,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_memory_info"))]
    pub async fn get_memory_info(&self) -> anyhow::Result<MemoryInfo> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();

            let total = sys.total_memory();
            let available = sys.available_memory();
            let swap_total = sys.total_swap();
            let swap_used = sys.used_swap();

            Ok(MemoryInfo {
                total,
                available,
                used: sys.used_memory(),
                percent: usage_ratio(total.saturating_sub(available), total),
                swap_total,
                swap_free: sys.free_swap(),
                swap_used,
                swap_percent: usage_ratio(swap_used, swap_total),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// Every mounted partition, with `usage: None` where it could not be read.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "list_partitions"))]
    pub async fn list_partitions(&self) -> anyhow::Result<Vec<RawPartition>> {
        let disks = self.disks.clone();
        tokio::task::spawn_blocking(move || {
            let mut disks_guard = disks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo disks lock poisoned: {}", e))?;
            disks_guard.refresh(true);
            let partitions = disks_guard
                .list()
                .iter()
                .map(|d| RawPartition {
                    device: d.name().to_string_lossy().into_owned(),
                    mountpoint: d.mount_point().to_string_lossy().into_owned(),
                    fstype: d.file_system().to_string_lossy().into_owned(),
                    usage: partition_usage(d),
                })
                .collect();
            Ok(partitions)
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// Readable partitions only; unreadable ones are dropped without error.
    pub async fn get_disk_info(&self) -> anyhow::Result<DiskInfo> {
        let raw = self.list_partitions().await?;
        Ok(DiskInfo {
            partitions: filter_readable(raw),
        })
    }
}
