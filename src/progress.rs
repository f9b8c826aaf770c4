//! Event sinks for huffpress operations.
//!
//! The core emits log lines and progress percentages through callbacks
//! injected per operation rather than through ambient globals. A front-end
//! (CLI, GUI worker thread) installs its sinks on a [`Callbacks`] value and
//! passes it down; both sinks are invoked on the thread running the
//! operation, so the collaborator owns any marshalling to its UI thread.

/// Severity of a log event at the collaborator boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

/// Receives human-readable messages emitted during an operation.
pub type LogSink = Box<dyn Fn(LogLevel, &str) + Send + Sync>;

/// Receives progress percentages in `[0, 100]`. Deliveries within one
/// operation are monotonically non-decreasing.
pub type ProgressSink = Box<dyn Fn(f32) + Send + Sync>;

/// Callback points exposed to collaborators. Both sinks are optional; an
/// unset sink drops its events.
#[derive(Default)]
pub struct Callbacks {
    logger: Option<LogSink>,
    progress: Option<ProgressSink>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_logger<F>(&mut self, log_callback: F)
    where
        F: Fn(LogLevel, &str) + Send + Sync + 'static,
    {
        self.logger = Some(Box::new(log_callback));
    }

    pub fn set_progress_callback<F>(&mut self, progress_callback: F)
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(progress_callback));
    }

    pub(crate) fn info(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger(LogLevel::Info, message);
        }
    }

    pub(crate) fn error(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger(LogLevel::Error, message);
        }
    }

    pub(crate) fn percent(&self, percent: f32) {
        if let Some(progress) = &self.progress {
            progress(percent);
        }
    }
}

/// Tracks bytes processed against a known total and forwards the percentage
/// to the progress sink in roughly 1% steps, so subscribers are not flooded
/// with one event per chunk.
pub(crate) struct ProgressMeter<'a> {
    callbacks: &'a Callbacks,
    total: u64,
    done: u64,
    last_whole: u32,
}

impl<'a> ProgressMeter<'a> {
    pub(crate) fn new(callbacks: &'a Callbacks, total: u64) -> Self {
        callbacks.percent(0.0);
        Self {
            callbacks,
            total,
            done: 0,
            last_whole: 0,
        }
    }

    /// Record `n` more bytes processed, reporting when a whole percent has
    /// been crossed.
    pub(crate) fn add(&mut self, n: u64) {
        if self.total == 0 {
            return;
        }
        self.done = (self.done + n).min(self.total);
        let whole = (self.done * 100 / self.total) as u32;
        if whole > self.last_whole {
            self.last_whole = whole;
            self.callbacks.percent(whole as f32);
        }
    }

    /// Force a final 100% report, for operations that finish without their
    /// byte count landing exactly on the total.
    pub(crate) fn finish(&mut self) {
        if self.last_whole < 100 {
            self.last_whole = 100;
            self.callbacks.percent(100.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn collecting_callbacks() -> (Callbacks, Arc<Mutex<Vec<f32>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut callbacks = Callbacks::new();
        callbacks.set_progress_callback(move |p| sink.lock().unwrap().push(p));
        (callbacks, seen)
    }

    #[test]
    fn progress_is_monotonic_and_reaches_100() {
        let (callbacks, seen) = collecting_callbacks();
        let mut meter = ProgressMeter::new(&callbacks, 10_000);
        for _ in 0..10_000 {
            meter.add(1);
        }
        meter.finish();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.first(), Some(&0.0));
        assert_eq!(seen.last(), Some(&100.0));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn progress_updates_are_throttled_to_whole_percents() {
        let (callbacks, seen) = collecting_callbacks();
        let mut meter = ProgressMeter::new(&callbacks, 10_000);
        for _ in 0..10_000 {
            meter.add(1);
        }
        // 0% plus one event per whole percent, not one per byte.
        assert_eq!(seen.lock().unwrap().len(), 101);
    }

    #[test]
    fn finish_caps_short_runs() {
        let (callbacks, seen) = collecting_callbacks();
        let mut meter = ProgressMeter::new(&callbacks, 1_000);
        meter.add(10);
        meter.finish();
        assert_eq!(seen.lock().unwrap().last(), Some(&100.0));
    }
}
