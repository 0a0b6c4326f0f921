//! In-memory operational log backing the novedades view.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::errors::NovedadError;
use super::filters::FiltrosNovedades;
use super::types::{Novedad, TipoNovedad};
use crate::query::{self, Page, PagedView, SortDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NovedadSortKey {
    Fecha,
    Tipo,
    Estado,
}

impl NovedadSortKey {
    fn compare(&self, a: &Novedad, b: &Novedad) -> Ordering {
        match self {
            NovedadSortKey::Fecha => a.fecha.cmp(&b.fecha),
            NovedadSortKey::Tipo => a.tipo.to_string().cmp(&b.tipo.to_string()),
            NovedadSortKey::Estado => a.estado().to_string().cmp(&b.estado().to_string()),
        }
    }
}

#[derive(Debug, Default)]
pub struct NovedadesStore {
    novedades: Vec<Novedad>,
}

impl NovedadesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.novedades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.novedades.is_empty()
    }

    pub fn all(&self) -> &[Novedad] {
        &self.novedades
    }

    pub fn get(&self, id: &str) -> Option<&Novedad> {
        self.novedades.iter().find(|n| n.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Novedad, NovedadError> {
        self.novedades
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| NovedadError::NotFound { id: id.to_string() })
    }

    /// Record a new entry; returns its id.
    pub fn crear(
        &mut self,
        tipo: TipoNovedad,
        descripcion: &str,
        usuario: &str,
        fecha: DateTime<Utc>,
    ) -> Result<String, NovedadError> {
        let novedad = Novedad::nueva(tipo, descripcion, usuario, fecha)?;
        let id = novedad.id.clone();
        self.novedades.push(novedad);
        debug!(event = "core.novedades.created", id = %id, tipo = %tipo);
        Ok(id)
    }

    /// Append a follow-up; returns the follow-up's id.
    pub fn agregar_seguimiento(
        &mut self,
        id: &str,
        usuario: &str,
        comentario: &str,
        fecha: DateTime<Utc>,
    ) -> Result<String, NovedadError> {
        self.get_mut(id)?.agregar_seguimiento(usuario, comentario, fecha)
    }

    pub fn resolver(
        &mut self,
        id: &str,
        usuario: &str,
        comentario: Option<String>,
        fecha: DateTime<Utc>,
    ) -> Result<(), NovedadError> {
        self.get_mut(id)?.resolver(usuario, comentario, fecha)
    }

    /// Replace the collection with a fresh fetch. Locally created entries
    /// not yet known to the backend are kept (appended after the
    /// snapshot).
    pub fn apply_snapshot(&mut self, snapshot: Vec<Novedad>) {
        let previas = std::mem::take(&mut self.novedades);
        let mut novedades = snapshot;
        for previa in previas {
            if !novedades.iter().any(|n| n.id == previa.id) {
                novedades.push(previa);
            }
        }
        self.novedades = novedades;
        debug!(
            event = "core.novedades.snapshot_applied",
            total = self.novedades.len()
        );
    }

    pub fn view(
        &self,
        filtros: &FiltrosNovedades,
        sort: NovedadSortKey,
        direction: SortDirection,
        page: Option<Page>,
    ) -> PagedView<Novedad> {
        query::derive_view(
            &self.novedades,
            |n| filtros.matches(n),
            |a, b| sort.compare(a, b),
            direction,
            page,
        )
    }
}
