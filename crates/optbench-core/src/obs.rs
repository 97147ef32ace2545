//! Structured lifecycle events for sessions and submissions.
//!
//! Events carry an `event` field (`catalog.loaded`, `submission.sent`, ...)
//! so they can be filtered in JSON log output.

use std::fmt;

use tracing::{debug, info, warn};

/// Which submission form an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    Single,
    Multi,
}

impl TestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestKind::Single => "single",
            TestKind::Multi => "multi",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RAII guard that enters a session-scoped tracing span.
///
/// ```ignore
/// let _span = SessionSpan::enter("reports");
/// // every event below is tagged with session = "reports"
/// ```
pub struct SessionSpan {
    _span: tracing::span::EnteredSpan,
}

impl SessionSpan {
    pub fn enter(session: &str) -> Self {
        let span = tracing::info_span!("optbench.session", session = %session);
        Self {
            _span: span.entered(),
        }
    }
}

pub fn emit_catalog_loaded(algorithms: usize, functions: usize) {
    info!(
        event = "catalog.loaded",
        algorithms = algorithms,
        functions = functions
    );
}

/// Submit was requested while the form still had field errors.
pub fn emit_submission_blocked(kind: TestKind, error_count: usize) {
    debug!(event = "submission.blocked", kind = %kind, error_count = error_count);
}

pub fn emit_submission_sent(kind: TestKind, subject: &str, response: &str) {
    info!(
        event = "submission.sent",
        kind = %kind,
        subject = %subject,
        response = %response,
    );
}

pub fn emit_submission_failed(kind: TestKind, error: &dyn fmt::Display) {
    warn!(event = "submission.failed", kind = %kind, error = %error);
}

/// A gateway call failed and the caller substituted a default value.
pub fn emit_gateway_fallback(operation: &str, error: &dyn fmt::Display) {
    warn!(event = "gateway.fallback", operation = %operation, error = %error);
}
