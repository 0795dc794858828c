// GPU models and the tagged enumeration result

use super::MetricSection;
use crate::units::format_percent;

pub const GPU_UNAVAILABLE_MESSAGE: &str =
    "GPU information unavailable - nvidia-smi not installed or supported";

#[derive(Debug, Clone, PartialEq)]
pub struct GpuDevice {
    pub index: u32,
    pub uuid: String,
    pub name: String,
    /// Utilization, 0..=100. `None` when the driver does not report it.
    pub load_percent: Option<f64>,
    pub memory_total_mb: Option<f64>,
    pub memory_used_mb: Option<f64>,
    pub memory_free_mb: Option<f64>,
    pub temperature_c: Option<f64>,
}

/// Outcome of GPU enumeration. The renderer dispatches on the variant, never on labels.
#[derive(Debug, Clone, PartialEq)]
pub enum GpuReport {
    /// No GPU facility on this host (or disabled in config).
    Unavailable,
    /// Facility present but enumeration failed.
    Error(String),
    Devices(Vec<GpuDevice>),
}

impl GpuReport {
    /// Status line for the non-data outcomes.
    pub fn status_line(&self) -> Option<String> {
        match self {
            GpuReport::Unavailable => Some(GPU_UNAVAILABLE_MESSAGE.to_string()),
            GpuReport::Error(message) => {
                Some(format!("Failed to get GPU information: {}", message))
            }
            GpuReport::Devices(_) => None,
        }
    }
}

fn or_na(value: Option<f64>, fmt: impl Fn(f64) -> String) -> String {
    value.map(fmt).unwrap_or_else(|| "N/A".into())
}

impl From<&GpuDevice> for MetricSection {
    fn from(gpu: &GpuDevice) -> Self {
        MetricSection::new()
            .with("Name", gpu.name.as_str())
            .with("ID", gpu.index.to_string())
            .with("Load", or_na(gpu.load_percent, format_percent))
            .with("Free Memory", or_na(gpu.memory_free_mb, |v| format!("{:.1}MB", v)))
            .with("Used Memory", or_na(gpu.memory_used_mb, |v| format!("{:.1}MB", v)))
            .with("Total Memory", or_na(gpu.memory_total_mb, |v| format!("{:.1}MB", v)))
            .with("Temperature", or_na(gpu.temperature_c, |v| format!("{:.1} °C", v)))
            .with("UUID", gpu.uuid.as_str())
    }
}

/// One nested group per GPU keyed `GPU <position>`; empty for the status outcomes.
impl From<&GpuReport> for MetricSection {
    fn from(report: &GpuReport) -> Self {
        let mut section = MetricSection::new();
        if let GpuReport::Devices(devices) = report {
            for (i, gpu) in devices.iter().enumerate() {
                section.insert(format!("GPU {}", i), MetricSection::from(gpu));
            }
        }
        section
    }
}
