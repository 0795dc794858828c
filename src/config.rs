use serde::Deserialize;
use std::time::Duration;

/// Config file read when `CONFIG_FILE` is unset. Its absence is not an error.
pub const DEFAULT_CONFIG_FILE: &str = "hwdiag.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sampling: SamplingConfig,
    pub gpu: GpuConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Window over which CPU utilization is measured. The CPU section blocks for this long.
    pub cpu_interval_ms: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            cpu_interval_ms: 1000,
        }
    }
}

impl SamplingConfig {
    pub fn cpu_interval(&self) -> Duration {
        Duration::from_millis(self.cpu_interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GpuConfig {
    pub enabled: bool,
    /// Bare name is searched on PATH; anything with a separator is used as-is.
    pub nvidia_smi_path: String,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            nvidia_smi_path: "nvidia-smi".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Hardware Diagnostic Tool".into(),
        }
    }
}

impl AppConfig {
    /// Load from `CONFIG_FILE`, or from [`DEFAULT_CONFIG_FILE`] if present, else defaults.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => {
                let s = std::fs::read_to_string(&path)
                    .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
                Self::load_from_str(&s)
            }
            Err(_) => match std::fs::read_to_string(DEFAULT_CONFIG_FILE) {
                Ok(s) => Self::load_from_str(&s),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    let config = Self::default();
                    config.validate()?;
                    Ok(config)
                }
                Err(e) => Err(anyhow::anyhow!(
                    "reading config {}: {}",
                    DEFAULT_CONFIG_FILE,
                    e
                )),
            },
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.sampling.cpu_interval_ms > 0,
            "sampling.cpu_interval_ms must be > 0, got {}",
            self.sampling.cpu_interval_ms
        );
        anyhow::ensure!(
            !self.gpu.nvidia_smi_path.trim().is_empty(),
            "gpu.nvidia_smi_path must be non-empty"
        );
        anyhow::ensure!(
            !self.report.title.trim().is_empty(),
            "report.title must be non-empty"
        );
        Ok(())
    }
}
