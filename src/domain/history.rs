use std::collections::{HashMap, VecDeque};

/// Number of outcomes kept per target
pub const DEFAULT_HISTORY_SIZE: usize = 10;

/// Bounded window of recent pass/fail outcomes, oldest first
#[derive(Debug, Clone)]
pub struct RollingHistory {
    outcomes: VecDeque<bool>,
    capacity: usize,
}

impl RollingHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            outcomes: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, ok: bool) {
        if self.outcomes.len() >= self.capacity {
            self.outcomes.pop_front();
        }
        self.outcomes.push_back(ok);
    }

    /// Share of successful outcomes in percent, 0.0 when empty
    pub fn uptime_percentage(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        let up = self.outcomes.iter().filter(|ok| **ok).count();
        (up as f64 / self.outcomes.len() as f64) * 100.0
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.outcomes.iter().copied()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl Default for RollingHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

/// Rolling histories for every registered target
#[derive(Debug, Clone, Default)]
pub struct HistoryTracker {
    histories: HashMap<String, RollingHistory>,
}

impl HistoryTracker {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>, capacity: usize) -> Self {
        Self {
            histories: names
                .into_iter()
                .map(|name| (name.to_string(), RollingHistory::new(capacity)))
                .collect(),
        }
    }

    /// Append an outcome to the target's window.
    ///
    /// # Panics
    ///
    /// Panics if `name` was not registered when the tracker was built.
    pub fn record(&mut self, name: &str, ok: bool) {
        match self.histories.get_mut(name) {
            Some(history) => history.push(ok),
            None => panic!("no history registered for target {:?}", name),
        }
    }

    /// # Panics
    ///
    /// Panics if `name` was not registered when the tracker was built.
    pub fn uptime_percentage(&self, name: &str) -> f64 {
        self.history(name).uptime_percentage()
    }

    /// # Panics
    ///
    /// Panics if `name` was not registered when the tracker was built.
    pub fn history(&self, name: &str) -> &RollingHistory {
        match self.histories.get(name) {
            Some(history) => history,
            None => panic!("no history registered for target {:?}", name),
        }
    }
}
