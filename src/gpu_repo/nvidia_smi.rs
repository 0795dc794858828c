// nvidia-smi invocation and CSV parsing

use super::GpuError;
use crate::models::GpuDevice;
use std::path::Path;

/// `name` goes last: it is the only field that may contain commas.
const QUERY_FIELDS: &str = "index,uuid,utilization.gpu,memory.total,memory.used,memory.free,temperature.gpu,name";
const FIELD_COUNT: usize = 8;

pub(super) async fn query(path: &Path) -> Result<Vec<GpuDevice>, GpuError> {
    let output = tokio::process::Command::new(path)
        .arg(format!("--query-gpu={}", QUERY_FIELDS))
        .arg("--format=csv,noheader,nounits")
        .output()
        .await
        .map_err(|source| GpuError::Spawn {
            path: path.display().to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(GpuError::ExitStatus {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    parse_query_output(&String::from_utf8_lossy(&output.stdout))
}

/// `[N/A]`, `[Not Supported]` and similar placeholders become `None`.
fn optional_number(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse `--format=csv,noheader,nounits` output for [`QUERY_FIELDS`], one GPU per line.
pub fn parse_query_output(stdout: &str) -> Result<Vec<GpuDevice>, GpuError> {
    let mut devices = Vec::new();
    for (n, line) in stdout.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.splitn(FIELD_COUNT, ',').map(str::trim).collect();
        if fields.len() < FIELD_COUNT {
            return Err(GpuError::Parse {
                line: n + 1,
                reason: format!("expected {} fields, got {}", FIELD_COUNT, fields.len()),
            });
        }
        let index = fields[0].parse::<u32>().map_err(|e| GpuError::Parse {
            line: n + 1,
            reason: format!("invalid index {:?}: {}", fields[0], e),
        })?;
        devices.push(GpuDevice {
            index,
            uuid: fields[1].to_string(),
            load_percent: optional_number(fields[2]).map(|v| v.clamp(0.0, 100.0)),
            memory_total_mb: optional_number(fields[3]),
            memory_used_mb: optional_number(fields[4]),
            memory_free_mb: optional_number(fields[5]),
            temperature_c: optional_number(fields[6]),
            name: fields[7].to_string(),
        });
    }
    Ok(devices)
}
