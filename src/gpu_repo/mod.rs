// GPU telemetry via nvidia-smi: one capability probe at startup, then a tagged query result

mod nvidia_smi;

pub use nvidia_smi::parse_query_output;

use crate::config::GpuConfig;
use crate::models::GpuReport;
use std::path::{Path, PathBuf};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("could not run {path}: {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("nvidia-smi exited with {status}: {stderr}")]
    ExitStatus {
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("unexpected nvidia-smi output on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Result of the startup capability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpuProbe {
    Unavailable,
    NvidiaSmi(PathBuf),
}

impl GpuProbe {
    pub fn detect(config: &GpuConfig) -> Self {
        if !config.enabled {
            tracing::info!("GPU inspection disabled by config");
            return GpuProbe::Unavailable;
        }
        match resolve_executable(&config.nvidia_smi_path) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "found nvidia-smi");
                GpuProbe::NvidiaSmi(path)
            }
            None => {
                tracing::info!(tool = %config.nvidia_smi_path, "nvidia-smi not found; GPU section unavailable");
                GpuProbe::Unavailable
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, GpuProbe::NvidiaSmi(_))
    }

    /// Enumerate GPUs. Never fails: errors are folded into [`GpuReport::Error`].
    #[instrument(skip(self), fields(repo = "gpu", operation = "query"))]
    pub async fn query(&self) -> GpuReport {
        let path = match self {
            GpuProbe::Unavailable => return GpuReport::Unavailable,
            GpuProbe::NvidiaSmi(path) => path,
        };
        match nvidia_smi::query(path).await {
            Ok(devices) => GpuReport::Devices(devices),
            Err(e) => {
                tracing::warn!(error = %e, "GPU enumeration failed");
                GpuReport::Error(e.to_string())
            }
        }
    }
}

/// Resolve `tool` to an executable file: paths are checked directly, bare names via PATH.
pub fn resolve_executable(tool: &str) -> Option<PathBuf> {
    let candidate = Path::new(tool);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let search = std::env::var_os("PATH")?;
    std::env::split_paths(&search).find_map(|dir| {
        let full = dir.join(tool);
        if full.is_file() {
            return Some(full);
        }
        #[cfg(windows)]
        {
            let exe = dir.join(format!("{}.exe", tool));
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}
