use cmo_core::errors::CmoError;

use crate::types::RefreshDomain;

/// Failure of a single refresh source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub domain: RefreshDomain,
    pub message: String,
}

/// Aggregate error of a refresh cycle.
///
/// The cycle fails loud - one failing source fails the batch - but every
/// source still runs to completion, and this error carries the per-source
/// outcome so callers can report which domains stayed fresh.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} of {total} refresh sources failed: {}", .failed.len(), failed_domains(.failed))]
pub struct RefreshError {
    /// Failed sources, in registration order.
    pub failed: Vec<SourceFailure>,
    /// Number of sources that ran this cycle.
    pub total: usize,
}

impl RefreshError {
    /// The domains that failed this cycle.
    pub fn domains(&self) -> Vec<RefreshDomain> {
        self.failed.iter().map(|f| f.domain).collect()
    }

    /// Number of sources that settled successfully.
    pub fn succeeded(&self) -> usize {
        self.total - self.failed.len()
    }
}

fn failed_domains(failed: &[SourceFailure]) -> String {
    failed
        .iter()
        .map(|f| f.domain.name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl CmoError for RefreshError {
    fn error_code(&self) -> &'static str {
        "REFRESH_SOURCES_FAILED"
    }
}
