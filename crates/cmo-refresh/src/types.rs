use std::sync::Arc;

use futures::future::BoxFuture;

use crate::errors::RefreshError;

/// The independently-owned data domains a dashboard refresh covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshDomain {
    Alertas,
    Transitos,
    Precintos,
    /// Overall system status (backend health, counters).
    Estado,
}

impl RefreshDomain {
    pub const TODOS: [RefreshDomain; 4] = [
        RefreshDomain::Alertas,
        RefreshDomain::Transitos,
        RefreshDomain::Precintos,
        RefreshDomain::Estado,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RefreshDomain::Alertas => "alertas",
            RefreshDomain::Transitos => "transitos",
            RefreshDomain::Precintos => "precintos",
            RefreshDomain::Estado => "estado",
        }
    }
}

impl std::fmt::Display for RefreshDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error a single refresh source can fail with. Sources are thin wrappers
/// over backend calls owned by their data-domain module; the coordinator
/// only needs something displayable.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// The future a refresh source resolves.
pub type SourceFuture = BoxFuture<'static, Result<(), SourceError>>;

/// A per-domain refresh callback: fetch that domain's data and apply it
/// to its store.
pub type SourceFn = Arc<dyn Fn() -> SourceFuture + Send + Sync>;

/// Result of one call to [`crate::RefreshCoordinator::refresh`].
#[derive(Debug)]
pub enum RefreshOutcome {
    /// All registered sources settled successfully.
    Completed,
    /// At least one source failed; per-source outcomes are in the error.
    Failed(RefreshError),
    /// A refresh was already in flight; nothing ran.
    AlreadyRunning,
}

impl RefreshOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RefreshOutcome::Completed)
    }

    pub fn is_already_running(&self) -> bool {
        matches!(self, RefreshOutcome::AlreadyRunning)
    }
}
