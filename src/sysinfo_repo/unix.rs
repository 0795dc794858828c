// statvfs-backed partition usage (free vs. available blocks, which sysinfo merges).

use crate::models::DiskUsage;
use std::path::Path;

/// Usage of the filesystem mounted at `mount`; `None` when statvfs fails or reports no capacity.
pub(super) fn read_disk_usage(mount: &Path) -> Option<DiskUsage> {
    use nix::sys::statvfs::statvfs;

    let stats = match statvfs(mount) {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!(mountpoint = %mount.display(), error = %e, "statvfs failed");
            return None;
        }
    };
    // Block counts are in fragment units; some filesystems leave f_frsize at 0.
    let fragment_size = match stats.fragment_size() as u64 {
        0 => stats.block_size() as u64,
        n => n,
    };
    DiskUsage::from_blocks(
        fragment_size,
        stats.blocks() as u64,
        stats.blocks_free() as u64,
        stats.blocks_available() as u64,
    )
}
