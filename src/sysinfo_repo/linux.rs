// Linux-specific helpers: /proc and /sys reads sysinfo does not cover.

/// Read first "model name" from /proc/cpuinfo (Linux). Prefer over sysinfo when it returns "cpu0" etc.
pub(super) fn read_cpu_model_linux() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        parse_cpu_model(&content)
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// First usable `model name` value in /proc/cpuinfo content.
pub fn parse_cpu_model(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .filter(|line| line.starts_with("model name"))
        .find_map(|line| {
            line.split_once(':')
                .map(|(_, v)| v.trim())
                .filter(|s| !s.is_empty() && *s != "cpu0")
                .map(str::to_string)
        })
}

/// Maximum clock of cpu0 in MHz from cpufreq (reported in kHz). `None` on VMs without cpufreq.
pub(super) fn read_max_frequency_mhz_linux() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        let content =
            std::fs::read_to_string("/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq").ok()?;
        let khz = content.trim().parse::<u64>().ok().filter(|k| *k > 0)?;
        Some(khz as f64 / 1000.0)
    }
    #[cfg(not(target_os = "linux"))]
    None
}
