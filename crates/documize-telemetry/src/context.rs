//! Process-level span guard.

use tracing::{Span, span::Entered};

use crate::init::build_sha;

/// Guard that keeps the process-level span entered for its lifetime.
pub struct GlobalContextGuard {
    _guard: Entered<'static>,
}

impl GlobalContextGuard {
    #[must_use]
    /// Enter the `documize` span tagged with the current phase and edition.
    pub fn new(phase: &str, edition: &str) -> Self {
        let span: &'static Span = Box::leak(Box::new(tracing::info_span!(
            "documize",
            phase = %phase,
            edition = %edition,
            build_sha = %build_sha(),
        )));
        Self {
            _guard: span.enter(),
        }
    }
}
