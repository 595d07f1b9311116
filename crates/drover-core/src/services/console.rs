//! # Console Services
//!
//! Input, output and progress reporting for consumer objects.
//!
//! The core never writes to a terminal itself. [`Output`] buffers lines and
//! the binary drains them; this keeps every service testable in isolation.

use crate::Verbosity;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

// =============================================================================
// INPUT
// =============================================================================

/// Parsed command-line input for the current invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input {
    arguments: Vec<String>,
    options: BTreeMap<String, String>,
}

impl Input {
    /// Create input from positional arguments.
    #[must_use]
    pub fn new(arguments: Vec<String>) -> Self {
        Self {
            arguments,
            options: BTreeMap::new(),
        }
    }

    /// Add or replace an option.
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// All positional arguments.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// A positional argument by index.
    #[must_use]
    pub fn argument(&self, index: usize) -> Option<&str> {
        self.arguments.get(index).map(String::as_str)
    }

    /// An option by name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

/// Verbosity-gated line sink.
#[derive(Debug, Default)]
pub struct Output {
    verbosity: Verbosity,
    lines: Mutex<Vec<String>>,
}

impl Output {
    /// Create an output at the given verbosity.
    #[must_use]
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            lines: Mutex::new(Vec::new()),
        }
    }

    /// The configured verbosity.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Write a line at normal verbosity.
    pub fn writeln(&self, line: impl Into<String>) {
        self.writeln_at(Verbosity::Normal, line);
    }

    /// Write a line that is only kept when the output is at least `level`.
    /// Returns whether the line was kept.
    pub fn writeln_at(&self, level: Verbosity, line: impl Into<String>) -> bool {
        if self.verbosity < level {
            return false;
        }
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.into());
        true
    }

    /// Take every buffered line, leaving the buffer empty.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

// =============================================================================
// OUTPUT ADAPTER
// =============================================================================

/// Answers "is this verbose enough to show?" for consumers that carry their
/// own verbosity threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputAdapter {
    verbosity: Verbosity,
}

impl OutputAdapter {
    #[must_use]
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Check whether the current verbosity meets `threshold`.
    #[must_use]
    pub fn meets_threshold(&self, threshold: Verbosity) -> bool {
        self.verbosity >= threshold
    }
}

// =============================================================================
// PROGRESS INDICATOR
// =============================================================================

/// Step counter for long-running work. Shared by reference, so the position
/// is atomic.
#[derive(Debug)]
pub struct ProgressIndicator {
    total: usize,
    position: AtomicUsize,
}

impl ProgressIndicator {
    /// Create an indicator expecting `total` steps.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            position: AtomicUsize::new(0),
        }
    }

    /// Advance by `steps`, never past the total. Returns the new position.
    pub fn advance(&self, steps: usize) -> usize {
        let mut current = self.position.load(Ordering::Relaxed);
        loop {
            let next = current.saturating_add(steps).min(self.total);
            match self.position.compare_exchange_weak(
                current,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position.load(Ordering::Relaxed)
    }

    /// Expected number of steps.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Progress as a whole percentage (integer math only).
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.position() as u64).saturating_mul(100) / (self.total as u64)).min(100) as u8
    }

    /// Check whether every step is done.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.position() >= self.total
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_accessors() {
        let input = Input::new(vec!["status".into(), "--full".into()]).with_option("uri", "dev");
        assert_eq!(input.argument(0), Some("status"));
        assert_eq!(input.argument(5), None);
        assert_eq!(input.option("uri"), Some("dev"));
        assert_eq!(input.arguments().len(), 2);
    }

    #[test]
    fn output_respects_verbosity() {
        let output = Output::new(Verbosity::Normal);
        output.writeln("shown");
        assert!(!output.writeln_at(Verbosity::Verbose, "hidden"));

        assert_eq!(output.drain(), vec!["shown".to_string()]);
        assert!(output.drain().is_empty());
    }

    #[test]
    fn quiet_output_keeps_nothing() {
        let output = Output::new(Verbosity::Quiet);
        output.writeln("dropped");
        assert!(output.drain().is_empty());
    }

    #[test]
    fn output_adapter_threshold() {
        let adapter = OutputAdapter::new(Verbosity::Verbose);
        assert!(adapter.meets_threshold(Verbosity::Normal));
        assert!(adapter.meets_threshold(Verbosity::Verbose));
        assert!(!adapter.meets_threshold(Verbosity::Debug));
    }

    #[test]
    fn progress_saturates_at_total() {
        let progress = ProgressIndicator::new(4);
        assert_eq!(progress.advance(1), 1);
        assert_eq!(progress.percent(), 25);
        assert_eq!(progress.advance(10), 4);
        assert!(progress.is_complete());
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn empty_progress_is_complete() {
        let progress = ProgressIndicator::new(0);
        assert!(progress.is_complete());
        assert_eq!(progress.percent(), 100);
    }
}
