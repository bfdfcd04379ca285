//! The reporting contract shared by calculators, buffers and generators.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use metamodel_concepts::lint::{Diagnostic, Severity};

const TARGET: &str = "metamodel";

#[derive(Debug, Default)]
struct Counters {
    errors: AtomicUsize,
    warnings: AtomicUsize,
}

/// Reports informational, warning and error messages as `tracing` events.
///
/// Clones share the same counters, so a reporter handed to template helpers
/// and buffers still counts into the generator's totals. The reporter never
/// installs a subscriber; the binary decides where events go.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    counters: Arc<Counters>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&self, message: fmt::Arguments<'_>) {
        tracing::info!(target: TARGET, "{}", message);
    }

    pub fn warn(&self, message: fmt::Arguments<'_>) {
        self.counters.warnings.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(target: TARGET, "{}", message);
    }

    pub fn error(&self, message: fmt::Arguments<'_>) {
        self.counters.errors.fetch_add(1, Ordering::Relaxed);
        tracing::error!(target: TARGET, "{}", message);
    }

    /// Report a lint diagnostic with the level matching its severity.
    pub fn diagnostic(&self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error(format_args!("{}", diagnostic)),
            Severity::Warning => self.warn(format_args!("{}", diagnostic)),
            Severity::Info => self.info(format_args!("{}", diagnostic)),
        }
    }

    /// Number of errors reported so far.
    pub fn errors(&self) -> usize {
        self.counters.errors.load(Ordering::Relaxed)
    }

    /// Number of warnings reported so far.
    pub fn warnings(&self) -> usize {
        self.counters.warnings.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_counters() {
        let reporter = Reporter::new();
        let clone = reporter.clone();

        clone.error(format_args!("can't render '{}'", "cluster"));
        reporter.warn(format_args!("ambiguous locator"));
        reporter.info(format_args!("wrote {} files", 3));

        assert_eq!(reporter.errors(), 1);
        assert_eq!(clone.warnings(), 1);
    }

    #[test]
    fn test_diagnostic_severity() {
        let reporter = Reporter::new();
        reporter.diagnostic(&Diagnostic::error("unresolved-type", "no type"));
        reporter.diagnostic(&Diagnostic::info("empty-doc", "no documentation"));

        assert_eq!(reporter.errors(), 1);
        assert_eq!(reporter.warnings(), 0);
    }
}
