//! In-memory seal snapshot collection backing the seals table.

use std::cmp::Ordering;

use tracing::debug;

use super::types::{EstadoEslinga, PrecintoActivo};
use crate::query::{self, Page, PagedView, SortDirection};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltrosPrecintos {
    pub eslinga: Option<EstadoEslinga>,
    /// Keep only seals at or below the low-battery threshold.
    pub solo_bateria_baja: bool,
    /// Substring match on the seal code.
    pub codigo: String,
}

impl FiltrosPrecintos {
    pub fn matches(&self, precinto: &PrecintoActivo) -> bool {
        if let Some(eslinga) = self.eslinga
            && precinto.eslinga != eslinga
        {
            return false;
        }
        if self.solo_bateria_baja && !precinto.bateria_baja() {
            return false;
        }
        query::contains_ci(&precinto.codigo, &self.codigo)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecintoSortKey {
    Codigo,
    Bateria,
    UltimoReporte,
}

impl PrecintoSortKey {
    fn compare(&self, a: &PrecintoActivo, b: &PrecintoActivo) -> Ordering {
        match self {
            PrecintoSortKey::Codigo => a.codigo.cmp(&b.codigo),
            PrecintoSortKey::Bateria => a.bateria_pct.cmp(&b.bateria_pct),
            PrecintoSortKey::UltimoReporte => a.ultimo_reporte.cmp(&b.ultimo_reporte),
        }
    }
}

/// Seal snapshots are pure display records: each refresh replaces the
/// collection wholesale, there is no local lifecycle to preserve.
#[derive(Debug, Default)]
pub struct PrecintosStore {
    precintos: Vec<PrecintoActivo>,
}

impl PrecintosStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.precintos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.precintos.is_empty()
    }

    pub fn all(&self) -> &[PrecintoActivo] {
        &self.precintos
    }

    pub fn get(&self, codigo: &str) -> Option<&PrecintoActivo> {
        self.precintos.iter().find(|p| p.codigo == codigo)
    }

    pub fn apply_snapshot(&mut self, snapshot: Vec<PrecintoActivo>) {
        self.precintos = snapshot;
        debug!(
            event = "core.precintos.snapshot_applied",
            total = self.precintos.len()
        );
    }

    pub fn view(
        &self,
        filtros: &FiltrosPrecintos,
        sort: PrecintoSortKey,
        direction: SortDirection,
        page: Option<Page>,
    ) -> PagedView<PrecintoActivo> {
        query::derive_view(
            &self.precintos,
            |p| filtros.matches(p),
            |a, b| sort.compare(a, b),
            direction,
            page,
        )
    }
}
