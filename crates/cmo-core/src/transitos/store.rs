//! In-memory pending-transit collection backing the transits table.

use std::cmp::Ordering;

use tracing::debug;

use super::types::TransitoPendiente;
use crate::query::{self, Page, PagedView, SortDirection};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltrosTransitos {
    /// Substring match on the customs declaration identifier.
    pub dua: String,
    /// Substring match against origin, destination, plate, or cargo.
    pub busqueda: String,
}

impl FiltrosTransitos {
    pub fn matches(&self, transito: &TransitoPendiente) -> bool {
        query::contains_ci(&transito.dua, &self.dua)
            && (query::contains_ci(&transito.origen, &self.busqueda)
                || query::contains_ci(&transito.destino, &self.busqueda)
                || query::contains_ci(&transito.matricula, &self.busqueda)
                || query::contains_ci(&transito.descripcion_carga, &self.busqueda))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitoSortKey {
    Fecha,
    Dua,
    Origen,
}

impl TransitoSortKey {
    fn compare(&self, a: &TransitoPendiente, b: &TransitoPendiente) -> Ordering {
        match self {
            TransitoSortKey::Fecha => a.fecha_solicitud.cmp(&b.fecha_solicitud),
            TransitoSortKey::Dua => a.dua.cmp(&b.dua),
            TransitoSortKey::Origen => a.origen.cmp(&b.origen),
        }
    }
}

#[derive(Debug, Default)]
pub struct TransitosStore {
    transitos: Vec<TransitoPendiente>,
}

impl TransitosStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.transitos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitos.is_empty()
    }

    pub fn all(&self) -> &[TransitoPendiente] {
        &self.transitos
    }

    pub fn apply_snapshot(&mut self, snapshot: Vec<TransitoPendiente>) {
        self.transitos = snapshot;
        debug!(
            event = "core.transitos.snapshot_applied",
            total = self.transitos.len()
        );
    }

    pub fn view(
        &self,
        filtros: &FiltrosTransitos,
        sort: TransitoSortKey,
        direction: SortDirection,
        page: Option<Page>,
    ) -> PagedView<TransitoPendiente> {
        query::derive_view(
            &self.transitos,
            |t| filtros.matches(t),
            |a, b| sort.compare(a, b),
            direction,
            page,
        )
    }
}
