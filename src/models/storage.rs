// Partition models and the readable-partition filter

use super::MetricSection;
use super::system::usage_ratio;
use crate::units::{format_percent, get_size};

/// Capacity of a mounted filesystem, in bytes.
///
/// `used` excludes root-reserved blocks and `free` is what unprivileged users
/// can allocate, so `used + free` may be less than `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

impl DiskUsage {
    /// Build from statvfs counters: fragment size, total, free and available blocks.
    /// `None` for a zero-capacity filesystem.
    pub fn from_blocks(
        fragment_size: u64,
        blocks: u64,
        blocks_free: u64,
        blocks_available: u64,
    ) -> Option<Self> {
        let total = blocks.saturating_mul(fragment_size);
        if total == 0 {
            return None;
        }
        Some(Self {
            total,
            used: total.saturating_sub(blocks_free.saturating_mul(fragment_size)),
            free: blocks_available.saturating_mul(fragment_size),
        })
    }

    /// Share of the user-visible capacity in use: `used / (used + free)`.
    pub fn percent(&self) -> f64 {
        usage_ratio(self.used, self.used.saturating_add(self.free))
    }
}

/// A partition as enumerated, before its usage is known to be readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPartition {
    pub device: String,
    pub mountpoint: String,
    pub fstype: String,
    /// `None` when usage could not be read (no medium, unmounted, denied).
    pub usage: Option<DiskUsage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartitionInfo {
    /// Unique within a [`DiskInfo`].
    pub key: String,
    pub device: String,
    pub mountpoint: String,
    pub fstype: String,
    pub usage: DiskUsage,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskInfo {
    pub partitions: Vec<PartitionInfo>,
}

/// Keep only partitions whose usage was readable, keyed `Device <device>`.
///
/// A device seen twice (bind mounts, subvolumes) gets its mountpoint appended;
/// further repeats of the same pair get ` #2`, ` #3`, ... so every key stays unique.
pub fn filter_readable(raw: Vec<RawPartition>) -> Vec<PartitionInfo> {
    let mut partitions: Vec<PartitionInfo> = Vec::with_capacity(raw.len());
    for p in raw {
        let Some(usage) = p.usage else {
            tracing::debug!(device = %p.device, mountpoint = %p.mountpoint, "skipping unreadable partition");
            continue;
        };
        let taken = |key: &str| partitions.iter().any(|existing| existing.key == key);
        let mut key = format!("Device {}", p.device);
        if taken(&key) {
            let base = format!("Device {} ({})", p.device, p.mountpoint);
            key = base.clone();
            let mut n = 2;
            while taken(&key) {
                key = format!("{} #{}", base, n);
                n += 1;
            }
        }
        partitions.push(PartitionInfo {
            key,
            device: p.device,
            mountpoint: p.mountpoint,
            fstype: p.fstype,
            usage,
        });
    }
    partitions
}

impl From<&PartitionInfo> for MetricSection {
    fn from(p: &PartitionInfo) -> Self {
        MetricSection::new()
            .with("Mountpoint", p.mountpoint.as_str())
            .with("File System", p.fstype.as_str())
            .with("Total Size", get_size(p.usage.total))
            .with("Used", get_size(p.usage.used))
            .with("Free", get_size(p.usage.free))
            .with("Usage", format_percent(p.usage.percent()))
    }
}

impl From<&DiskInfo> for MetricSection {
    fn from(disks: &DiskInfo) -> Self {
        let mut section = MetricSection::new();
        for p in &disks.partitions {
            section.insert(p.key.as_str(), MetricSection::from(p));
        }
        section
    }
}
