//! Connection configuration knobs.

use std::time::Duration;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings applied to every connection opened by [`super::open_db`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Turns on `PRAGMA foreign_keys` so SQLite rejects dangling
    /// `Employees.dept_id` values on its own.
    pub enforce_foreign_keys: bool,
    /// How long a statement waits on a locked database file.
    pub busy_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            enforce_foreign_keys: true,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

impl StoreOptions {
    pub fn with_foreign_keys(mut self, enabled: bool) -> Self {
        self.enforce_foreign_keys = enabled;
        self
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::StoreOptions;
    use std::time::Duration;

    #[test]
    fn defaults_enforce_foreign_keys() {
        let options = StoreOptions::default();
        assert!(options.enforce_foreign_keys);
        assert_eq!(options.busy_timeout, Duration::from_secs(5));
    }

    #[test]
    fn builder_overrides_fields() {
        let options = StoreOptions::default()
            .with_foreign_keys(false)
            .with_busy_timeout(Duration::from_millis(250));
        assert!(!options.enforce_foreign_keys);
        assert_eq!(options.busy_timeout, Duration::from_millis(250));
    }
}
