use serde::Deserialize;

use super::ResourceKind;

/// Per-metric alert limits
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThresholdPolicy {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub processes: f64,
}

impl ThresholdPolicy {
    pub fn limit(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Cpu => self.cpu,
            ResourceKind::Memory => self.memory,
            ResourceKind::Disk => self.disk,
            ResourceKind::Processes => self.processes,
        }
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            cpu: 80.0,
            memory: 85.0,
            disk: 90.0,
            processes: 300.0,
        }
    }
}

/// True when `value` is strictly above the limit for `kind`
pub fn evaluate(kind: ResourceKind, value: f64, policy: &ThresholdPolicy) -> bool {
    value > policy.limit(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_to_limit_does_not_alert() {
        let policy = ThresholdPolicy::default();
        assert!(!evaluate(ResourceKind::Cpu, 80.0, &policy));
        assert!(evaluate(ResourceKind::Cpu, 81.0, &policy));
    }

    #[test]
    fn test_limits_are_independent() {
        let policy = ThresholdPolicy {
            cpu: 10.0,
            memory: 20.0,
            disk: 30.0,
            processes: 40.0,
        };
        assert!(evaluate(ResourceKind::Memory, 25.0, &policy));
        assert!(!evaluate(ResourceKind::Disk, 25.0, &policy));
        assert!(!evaluate(ResourceKind::Processes, 40.0, &policy));
        assert!(evaluate(ResourceKind::Processes, 41.0, &policy));
    }
}
