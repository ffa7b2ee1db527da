use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

/// Local OS resource that can be sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Cpu,
    Memory,
    Disk,
    Processes,
}

impl ResourceKind {
    /// Sampling order used by the resource monitor
    pub const ALL: [ResourceKind; 4] = [Self::Cpu, Self::Memory, Self::Disk, Self::Processes];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Disk => "disk",
            Self::Processes => "processes",
        }
    }

    /// Prefix of the alert message raised when the threshold is exceeded
    pub fn alert_label(&self) -> &'static str {
        match self {
            Self::Cpu => "High CPU Usage",
            Self::Memory => "High Memory Usage",
            Self::Disk => "High Disk Usage",
            Self::Processes => "High Process Count",
        }
    }

    /// Label used in the per-cycle summary line
    pub fn summary_label(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Memory => "Memory",
            Self::Disk => "Disk",
            Self::Processes => "Processes",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Processes => "",
            _ => "%",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a check observes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckSpec {
    HttpEndpoint { url: String },
    LocalResource { kind: ResourceKind },
}

/// A named monitored entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorTarget {
    name: String,
    check_spec: CheckSpec,
}

impl MonitorTarget {
    pub fn new(name: impl Into<String>, check_spec: CheckSpec) -> Self {
        Self {
            name: name.into(),
            check_spec,
        }
    }

    pub fn http(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, CheckSpec::HttpEndpoint { url: url.into() })
    }

    pub fn resource(kind: ResourceKind) -> Self {
        Self::new(kind.as_str(), CheckSpec::LocalResource { kind })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check_spec(&self) -> &CheckSpec {
        &self.check_spec
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate target name: {0}")]
    Duplicate(String),

    #[error("Target name must not be empty")]
    EmptyName,
}

/// Static, ordered set of targets fixed at process start
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: Vec<MonitorTarget>,
}

impl TargetRegistry {
    pub fn new(targets: Vec<MonitorTarget>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for target in &targets {
            if target.name.trim().is_empty() {
                return Err(RegistryError::EmptyName);
            }
            if !seen.insert(target.name.as_str()) {
                return Err(RegistryError::Duplicate(target.name.clone()));
            }
        }
        Ok(Self { targets })
    }

    /// Registry of all local resources in sampling order
    pub fn local_resources() -> Self {
        Self {
            targets: ResourceKind::ALL.into_iter().map(MonitorTarget::resource).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonitorTarget> {
        self.targets.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|t| t.name())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
