// Report models: typed inspector results and the generic metric section

mod gpu;
mod section;
mod storage;
mod system;

pub use gpu::{GPU_UNAVAILABLE_MESSAGE, GpuDevice, GpuReport};
pub use section::{MetricSection, MetricValue};
pub use storage::{DiskInfo, DiskUsage, PartitionInfo, RawPartition, filter_readable};
pub use system::{CpuInfo, MemoryInfo, SystemInfo, UNKNOWN, usage_ratio};
