// Human-readable unit formatting (bytes, percentages, frequencies)

/// Binary unit prefixes, smallest first. Scaling stops at the last entry.
pub const UNITS: [&str; 6] = ["", "K", "M", "G", "T", "P"];

/// Format a byte count with a 1024-based unit suffix and two decimals, e.g. `1.50KB`.
///
/// Counts at or above 1024 PiB stay on the `P` scale (`u64::MAX` is `16384.00PB`).
pub fn get_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2}{}B", value, UNITS[unit])
}

pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Clock frequency in MHz, or "N/A" when the platform does not report it.
pub fn format_mhz(mhz: Option<f64>) -> String {
    match mhz {
        Some(v) => format!("{:.2}Mhz", v),
        None => "N/A".into(),
    }
}
