//! In-memory alert collection backing the alerts table.
//!
//! Single-writer container: all readers and writers run on the same
//! logical thread of execution, last write wins. Refresh cycles replace
//! the base alert snapshot wholesale; locally accumulated lifecycle data
//! (assignment, comments, resolution, history) survives for alerts the
//! new snapshot still contains.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::errors::AlertaError;
use super::types::{Alerta, AlertaExtendida, Severidad, TipoAlarma};
use crate::query::{self, Page, PagedView, SortDirection};

/// Equality/substring filters for the alerts table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltrosAlertas {
    pub tipo: Option<TipoAlarma>,
    /// Keep alerts at or above this severity.
    pub severidad_minima: Option<Severidad>,
    pub atendida: Option<bool>,
    /// Substring match on the seal code.
    pub codigo_precinto: String,
}

impl FiltrosAlertas {
    pub fn matches(&self, alerta: &AlertaExtendida) -> bool {
        if let Some(tipo) = self.tipo
            && alerta.alerta.tipo != tipo
        {
            return false;
        }
        if let Some(minima) = self.severidad_minima
            && alerta.alerta.severidad < minima
        {
            return false;
        }
        if let Some(atendida) = self.atendida
            && alerta.alerta.atendida != atendida
        {
            return false;
        }
        query::contains_ci(&alerta.alerta.codigo_precinto, &self.codigo_precinto)
    }
}

/// The sortable columns of the alerts table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertaSortKey {
    Fecha,
    Severidad,
    Tipo,
    Precinto,
}

impl AlertaSortKey {
    fn compare(&self, a: &AlertaExtendida, b: &AlertaExtendida) -> Ordering {
        match self {
            AlertaSortKey::Fecha => a.alerta.timestamp.cmp(&b.alerta.timestamp),
            AlertaSortKey::Severidad => a.alerta.severidad.cmp(&b.alerta.severidad),
            AlertaSortKey::Tipo => a.alerta.tipo.codigo().cmp(b.alerta.tipo.codigo()),
            AlertaSortKey::Precinto => a.alerta.codigo_precinto.cmp(&b.alerta.codigo_precinto),
        }
    }
}

#[derive(Debug, Default)]
pub struct AlertasStore {
    alertas: Vec<AlertaExtendida>,
}

impl AlertasStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.alertas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alertas.is_empty()
    }

    pub fn all(&self) -> &[AlertaExtendida] {
        &self.alertas
    }

    pub fn get(&self, id: &str) -> Option<&AlertaExtendida> {
        self.alertas.iter().find(|a| a.alerta.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut AlertaExtendida, AlertaError> {
        self.alertas
            .iter_mut()
            .find(|a| a.alerta.id == id)
            .ok_or_else(|| AlertaError::NotFound { id: id.to_string() })
    }

    /// Replace the base alert snapshot with a fresh fetch.
    ///
    /// Alerts present in both keep their locally accumulated lifecycle
    /// data and take the snapshot's base fields (last write wins); new
    /// alerts are inserted bare; alerts missing from the snapshot are
    /// dropped.
    pub fn apply_snapshot(&mut self, snapshot: Vec<Alerta>) {
        let previas = std::mem::take(&mut self.alertas);
        self.alertas = snapshot
            .into_iter()
            .map(|alerta| {
                match previas.iter().find(|p| p.alerta.id == alerta.id) {
                    Some(previa) => {
                        let mut conservada = previa.clone();
                        conservada.alerta = alerta;
                        conservada
                    }
                    None => AlertaExtendida::nueva(alerta),
                }
            })
            .collect();
        debug!(event = "core.alerts.snapshot_applied", total = self.alertas.len());
    }

    pub fn atender(&mut self, id: &str, usuario: &str, fecha: DateTime<Utc>) -> Result<(), AlertaError> {
        self.get_mut(id)?.atender(usuario, fecha)
    }

    pub fn asignar(&mut self, id: &str, usuario: &str, fecha: DateTime<Utc>) -> Result<(), AlertaError> {
        self.get_mut(id)?.asignar(usuario, fecha)
    }

    /// Append a comment; returns the new comment's id.
    pub fn comentar(
        &mut self,
        id: &str,
        autor: &str,
        texto: &str,
        fecha: DateTime<Utc>,
    ) -> Result<String, AlertaError> {
        let comentario = self.get_mut(id)?.comentar(autor, texto, fecha)?;
        Ok(comentario.id.clone())
    }

    pub fn resolver(
        &mut self,
        id: &str,
        usuario: &str,
        motivo: &str,
        fecha: DateTime<Utc>,
    ) -> Result<(), AlertaError> {
        self.get_mut(id)?.resolver(usuario, motivo, fecha)
    }

    /// Derive the table view: filtered, sorted, paginated.
    pub fn view(
        &self,
        filtros: &FiltrosAlertas,
        sort: AlertaSortKey,
        direction: SortDirection,
        page: Option<Page>,
    ) -> PagedView<AlertaExtendida> {
        query::derive_view(
            &self.alertas,
            |a| filtros.matches(a),
            |a, b| sort.compare(a, b),
            direction,
            page,
        )
    }
}
