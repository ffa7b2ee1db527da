use std::fs;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{round_metric, ResourceKind};
use crate::ports::{ResourceSource, SourceError};

use super::parser::{self, CpuStat};
use super::ProcfsConfig;

/// Resource source implementation using procfs and statvfs
pub struct ProcfsResourceSource {
    config: ProcfsConfig,
    cpu_window: Duration,
}

impl ProcfsResourceSource {
    pub fn new(config: ProcfsConfig, cpu_window: Duration) -> Self {
        Self { config, cpu_window }
    }

    fn read_cpu_stat(&self) -> Result<CpuStat, SourceError> {
        let content = fs::read_to_string(self.config.proc_path.join("stat"))?;
        Ok(parser::parse_cpu_stat(&content)?)
    }

    async fn cpu_percent(&self) -> Result<f64, SourceError> {
        let before = self.read_cpu_stat()?;
        tokio::time::sleep(self.cpu_window).await;
        let after = self.read_cpu_stat()?;
        Ok(after.usage_since(&before))
    }

    fn memory_percent(&self) -> Result<f64, SourceError> {
        let content = fs::read_to_string(self.config.proc_path.join("meminfo"))?;
        let meminfo = parser::parse_meminfo(&content);
        Ok(parser::memory_usage_percent(&meminfo)?)
    }

    fn disk_percent(&self) -> Result<f64, SourceError> {
        let stat = nix::sys::statvfs::statvfs(self.config.disk_path.as_path())?;
        let fragment = stat.fragment_size() as u64;
        let total_bytes = stat.blocks() as u64 * fragment;
        let free_bytes = stat.blocks_free() as u64 * fragment;
        let available_bytes = stat.blocks_available() as u64 * fragment;
        Ok(parser::disk_usage_percent(total_bytes, free_bytes, available_bytes))
    }

    fn process_count(&self) -> Result<f64, SourceError> {
        let mut count = 0u64;
        for entry in fs::read_dir(&self.config.proc_path)? {
            let entry = entry?;
            if parser::is_pid_entry(&entry.file_name().to_string_lossy()) {
                count += 1;
            }
        }
        Ok(count as f64)
    }
}

#[async_trait]
impl ResourceSource for ProcfsResourceSource {
    async fn sample(&self, kind: ResourceKind) -> Result<f64, SourceError> {
        let value = match kind {
            ResourceKind::Cpu => self.cpu_percent().await?,
            ResourceKind::Memory => self.memory_percent()?,
            ResourceKind::Disk => self.disk_percent()?,
            ResourceKind::Processes => self.process_count()?,
        };
        debug!(%kind, value, "sampled resource");
        Ok(round_metric(value))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn fake_proc() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stat"), "cpu  100 0 50 800 50 0 0 0\n").unwrap();
        fs::write(
            dir.path().join("meminfo"),
            "MemTotal:  2000 kB\nMemFree:  500 kB\nMemAvailable:  1500 kB\n",
        )
        .unwrap();
        for pid in ["1", "42", "1337"] {
            fs::create_dir(dir.path().join(pid)).unwrap();
        }
        fs::create_dir(dir.path().join("self")).unwrap();
        dir
    }

    fn source(dir: &TempDir) -> ProcfsResourceSource {
        let config = ProcfsConfig::new(dir.path(), dir.path());
        ProcfsResourceSource::new(config, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_memory_from_meminfo() {
        let dir = fake_proc();
        let value = source(&dir).sample(ResourceKind::Memory).await.unwrap();
        assert_eq!(value, 25.0);
    }

    #[tokio::test]
    async fn test_process_count_ignores_non_pid_entries() {
        let dir = fake_proc();
        let value = source(&dir).sample(ResourceKind::Processes).await.unwrap();
        assert_eq!(value, 3.0);
    }

    #[tokio::test]
    async fn test_cpu_without_progress_is_idle() {
        let dir = fake_proc();
        let value = source(&dir).sample(ResourceKind::Cpu).await.unwrap();
        assert_eq!(value, 0.0);
    }

    #[tokio::test]
    async fn test_disk_usage_is_a_percentage() {
        let dir = fake_proc();
        let value = source(&dir).sample(ResourceKind::Disk).await.unwrap();
        assert!((0.0..=100.0).contains(&value));
    }

    #[tokio::test]
    async fn test_missing_files_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let source = source(&dir);
        assert!(matches!(
            source.sample(ResourceKind::Memory).await,
            Err(SourceError::Io(_))
        ));
        assert!(source.sample(ResourceKind::Cpu).await.is_err());
    }
}
