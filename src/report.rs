// Report assembly and grid-table rendering

use crate::gpu_repo::GpuProbe;
use crate::models::*;
use crate::sysinfo_repo::SysinfoRepo;
use chrono::{DateTime, Local};
use std::io::{self, Write};

const HEADERS: [&str; 2] = ["Property", "Value"];

/// Everything one run prints. Built once, rendered once, then dropped.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub generated_at: DateTime<Local>,
    pub system: SystemInfo,
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    pub disks: DiskInfo,
    pub gpu: GpuReport,
}

impl Report {
    /// Run all inspectors concurrently and wait for every one before returning.
    /// Takes at least the repo's CPU sample interval.
    pub async fn collect(
        sysinfo_repo: &SysinfoRepo,
        gpu_probe: &GpuProbe,
        title: &str,
    ) -> anyhow::Result<Self> {
        let generated_at = Local::now();
        let (system, cpu, memory, disks, gpu) = tokio::join!(
            sysinfo_repo.get_system_info(),
            sysinfo_repo.get_cpu_info(),
            sysinfo_repo.get_memory_info(),
            sysinfo_repo.get_disk_info(),
            gpu_probe.query(),
        );
        let disks = disks.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "disk enumeration failed; disk section left empty");
            DiskInfo::default()
        });
        Ok(Self {
            title: title.to_string(),
            generated_at,
            system: system?,
            cpu: cpu?,
            memory: memory?,
            disks,
            gpu,
        })
    }
}

fn grid_rule(fill: char, widths: [usize; 2]) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.extend(std::iter::repeat_n(fill, w + 2));
        line.push('+');
    }
    line
}

fn grid_row(cells: &[&str; 2], widths: [usize; 2]) -> String {
    let mut line = String::from("|");
    for (cell, w) in cells.iter().zip(widths) {
        line.push(' ');
        line.push_str(cell);
        line.extend(std::iter::repeat_n(' ', w - cell.chars().count() + 1));
        line.push('|');
    }
    line
}

/// Two-column grid table (`Property`, `Value`) for the text entries of `section`.
/// Nested groups are skipped; see [`render`] for how those are printed.
pub fn render_table(section: &MetricSection) -> String {
    let rows: Vec<[&str; 2]> = section
        .iter()
        .filter_map(|(label, value)| match value {
            MetricValue::Text(text) => Some([label, text.as_str()]),
            MetricValue::Section(_) => None,
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut lines = vec![
        grid_rule('-', widths),
        grid_row(&HEADERS, widths),
        grid_rule('=', widths),
    ];
    for row in &rows {
        lines.push(grid_row(row, widths));
        lines.push(grid_rule('-', widths));
    }
    lines.join("\n")
}

/// One `<key>:` heading plus table per nested group.
fn write_groups(out: &mut impl Write, groups: &MetricSection) -> io::Result<()> {
    for (key, value) in groups.iter() {
        if let MetricValue::Section(section) = value {
            writeln!(out)?;
            writeln!(out, "{}:", key)?;
            writeln!(out, "{}", render_table(section))?;
        }
    }
    Ok(())
}

/// Write the full report: title, timestamp, then System, CPU, Memory, Disk, GPU.
pub fn render(report: &Report, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== {} ===", report.title)?;
    writeln!(
        out,
        "Report generated on: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(out)?;

    writeln!(out)?;
    writeln!(out, "--- System Information ---")?;
    writeln!(out, "{}", render_table(&MetricSection::from(&report.system)))?;

    writeln!(out)?;
    writeln!(out, "--- CPU Information ---")?;
    writeln!(out, "{}", render_table(&MetricSection::from(&report.cpu)))?;

    writeln!(out)?;
    writeln!(out, "--- Memory Information ---")?;
    writeln!(out, "{}", render_table(&MetricSection::from(&report.memory)))?;

    writeln!(out)?;
    writeln!(out, "--- Disk Information ---")?;
    write_groups(out, &MetricSection::from(&report.disks))?;

    writeln!(out)?;
    writeln!(out, "--- GPU Information ---")?;
    match report.gpu.status_line() {
        Some(line) => writeln!(out, "{}", line)?,
        None => write_groups(out, &MetricSection::from(&report.gpu))?,
    }
    out.flush()
}
