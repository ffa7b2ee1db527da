mod parser;
mod system;

use std::path::PathBuf;

pub use system::ProcfsResourceSource;

/// Configuration for procfs and filesystem paths (useful for Docker mounts)
#[derive(Debug, Clone)]
pub struct ProcfsConfig {
    pub proc_path: PathBuf,
    pub disk_path: PathBuf,
}

impl ProcfsConfig {
    pub fn new(proc_path: impl Into<PathBuf>, disk_path: impl Into<PathBuf>) -> Self {
        Self {
            proc_path: proc_path.into(),
            disk_path: disk_path.into(),
        }
    }
}
