// System identity, CPU and memory models

use super::MetricSection;
use crate::units::{format_mhz, format_percent, get_size};

/// Placeholder for identity fields the platform could not resolve.
pub const UNKNOWN: &str = "Unknown";

/// Static host identity; never fails to build, unresolved fields hold [`UNKNOWN`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub os: String,
    pub os_version: String,
    pub machine: String,
    pub processor: String,
    pub hostname: String,
}

impl From<&SystemInfo> for MetricSection {
    fn from(info: &SystemInfo) -> Self {
        MetricSection::new()
            .with("OS", info.os.as_str())
            .with("OS Version", info.os_version.as_str())
            .with("Machine", info.machine.as_str())
            .with("Processor", info.processor.as_str())
            .with("Hostname", info.hostname.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CpuInfo {
    pub physical_cores: Option<usize>,
    pub logical_cores: usize,
    pub max_frequency_mhz: Option<f64>,
    pub current_frequency_mhz: Option<f64>,
    /// Aggregate usage over the sample interval, 0..=100.
    pub usage_percent: f32,
    /// One entry per logical core, same interval, 0..=100.
    pub per_core_usage: Vec<f32>,
}

impl From<&CpuInfo> for MetricSection {
    fn from(cpu: &CpuInfo) -> Self {
        let physical = cpu
            .physical_cores
            .map(|n| n.to_string())
            .unwrap_or_else(|| "N/A".into());
        let mut section = MetricSection::new()
            .with("Physical Cores", physical)
            .with("Total Cores", cpu.logical_cores.to_string())
            .with("Max Frequency", format_mhz(cpu.max_frequency_mhz))
            .with("Current Frequency", format_mhz(cpu.current_frequency_mhz))
            .with("CPU Usage", format_percent(cpu.usage_percent as f64));
        for (i, usage) in cpu.per_core_usage.iter().enumerate() {
            section.insert(format!("Core {} Usage", i), format_percent(*usage as f64));
        }
        section
    }
}

/// RAM and swap counters in bytes. Percentages follow the OS utilization ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryInfo {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub percent: f64,
    pub swap_total: u64,
    pub swap_free: u64,
    pub swap_used: u64,
    pub swap_percent: f64,
}

impl From<&MemoryInfo> for MetricSection {
    fn from(mem: &MemoryInfo) -> Self {
        MetricSection::new()
            .with("Total Memory", get_size(mem.total))
            .with("Available Memory", get_size(mem.available))
            .with("Used Memory", get_size(mem.used))
            .with("Memory Usage", format_percent(mem.percent))
            .with("Total Swap", get_size(mem.swap_total))
            .with("Free Swap", get_size(mem.swap_free))
            .with("Used Swap", get_size(mem.swap_used))
            .with("Swap Usage", format_percent(mem.swap_percent))
    }
}

/// `part / total * 100`, or 0 for an empty total.
pub fn usage_ratio(part: u64, total: u64) -> f64 {
    if total > 0 {
        ((part as f64 / total as f64) * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}
