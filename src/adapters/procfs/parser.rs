use std::collections::HashMap;

use thiserror::Error;

use crate::ports::SourceError;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Missing field: {0}")]
    MissingField(String),
}

impl From<ParseError> for SourceError {
    fn from(err: ParseError) -> Self {
        SourceError::Parse(err.to_string())
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// CPU stats from /proc/stat
#[derive(Debug, Clone, Default)]
pub struct CpuStat {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuStat {
    pub fn total(&self) -> u64 {
        self.user + self.nice + self.system + self.idle + self.iowait + self.irq + self.softirq + self.steal
    }

    pub fn busy(&self) -> u64 {
        self.total() - self.idle - self.iowait
    }

    /// Busy share of the time elapsed between `earlier` and `self`, in percent
    pub fn usage_since(&self, earlier: &CpuStat) -> f64 {
        let total_delta = self.total().saturating_sub(earlier.total());
        if total_delta == 0 {
            return 0.0;
        }
        let busy_delta = self.busy().saturating_sub(earlier.busy());
        (busy_delta as f64 / total_delta as f64) * 100.0
    }
}

/// Parse /proc/stat (first line only for aggregate CPU)
pub fn parse_cpu_stat(content: &str) -> ParseResult<CpuStat> {
    let first_line = content
        .lines()
        .next()
        .ok_or_else(|| ParseError::Parse("Empty stat file".to_string()))?;

    if !first_line.starts_with("cpu ") {
        return Err(ParseError::MissingField("cpu".to_string()));
    }

    let parts: Vec<&str> = first_line.split_whitespace().skip(1).collect();
    if parts.len() < 8 {
        return Err(ParseError::Parse("Incomplete cpu stat".to_string()));
    }

    let field = |idx: usize, name: &str| -> ParseResult<u64> {
        parts[idx]
            .parse()
            .map_err(|e| ParseError::Parse(format!("{}: {}", name, e)))
    };

    Ok(CpuStat {
        user: field(0, "user")?,
        nice: field(1, "nice")?,
        system: field(2, "system")?,
        idle: field(3, "idle")?,
        iowait: field(4, "iowait")?,
        irq: field(5, "irq")?,
        softirq: field(6, "softirq")?,
        steal: field(7, "steal")?,
    })
}

/// Parse /proc/meminfo into a map of bytes
pub fn parse_meminfo(content: &str) -> HashMap<String, u64> {
    let mut map = HashMap::new();

    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value_str = value.trim().trim_end_matches(" kB");

        if let Ok(value) = value_str.parse::<u64>() {
            map.insert(key.trim().to_string(), value * 1024); // kB to bytes
        }
    }

    map
}

/// Used memory in percent, as (MemTotal - MemAvailable) / MemTotal
pub fn memory_usage_percent(meminfo: &HashMap<String, u64>) -> ParseResult<f64> {
    let total = *meminfo
        .get("MemTotal")
        .ok_or_else(|| ParseError::MissingField("MemTotal".to_string()))?;
    let available = *meminfo
        .get("MemAvailable")
        .ok_or_else(|| ParseError::MissingField("MemAvailable".to_string()))?;

    if total == 0 {
        return Ok(0.0);
    }
    Ok((total.saturating_sub(available) as f64 / total as f64) * 100.0)
}

/// Disk usage in percent of the space available to unprivileged users
pub fn disk_usage_percent(total_bytes: u64, free_bytes: u64, available_bytes: u64) -> f64 {
    let used = total_bytes.saturating_sub(free_bytes);
    let usable = used + available_bytes;
    if usable == 0 {
        return 0.0;
    }
    (used as f64 / usable as f64) * 100.0
}

/// True for /proc entries that name a process
pub fn is_pid_entry(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}
