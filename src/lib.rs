// Library for tests to access modules

pub mod config;
pub mod gpu_repo;
pub mod models;
pub mod report;
pub mod sysinfo_repo;
pub mod units;
