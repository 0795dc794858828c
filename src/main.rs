use anyhow::Result;
use hwdiag::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the report; diagnostics go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let app_config = config::AppConfig::load()?;

    let sysinfo_repo = sysinfo_repo::SysinfoRepo::new(app_config.sampling.cpu_interval());
    let gpu_probe = gpu_repo::GpuProbe::detect(&app_config.gpu);
    tracing::debug!(
        cpu_interval_ms = sysinfo_repo.cpu_interval().as_millis() as u64,
        gpu = gpu_probe.is_available(),
        "collecting report"
    );

    let report = report::Report::collect(&sysinfo_repo, &gpu_probe, &app_config.report.title)
        .await
        .map_err(|e| anyhow::anyhow!("collecting report: {}", e))?;

    let stdout = std::io::stdout();
    report::render(&report, &mut stdout.lock())?;
    Ok(())
}
