//! Filter state for the novedades view.
//!
//! Unlike the other tables, the novedades filters persist between
//! sessions: operators keep a working date window and state selection
//! across restarts. Stored as JSON under a fixed file name in the data
//! directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{EstadoNovedad, Novedad, TipoNovedad};
use crate::persistence::{self, PersistError};
use crate::query;

/// Fixed file name the filter state persists under.
pub const FILTROS_NOVEDADES_FILE: &str = "novedades_filters.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiltrosNovedades {
    /// Inclusive lower bound on the entry date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desde: Option<DateTime<Utc>>,

    /// Inclusive upper bound on the entry date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hasta: Option<DateTime<Utc>>,

    /// Keep entries in any of these states; empty means all states.
    #[serde(default)]
    pub estados: Vec<EstadoNovedad>,

    /// Keep entries with any of these type tags; empty means all types.
    #[serde(default)]
    pub tipos: Vec<TipoNovedad>,

    /// Substring match against description and recording operator.
    #[serde(default)]
    pub busqueda: String,
}

impl FiltrosNovedades {
    pub fn matches(&self, novedad: &Novedad) -> bool {
        if let Some(desde) = self.desde
            && novedad.fecha < desde
        {
            return false;
        }
        if let Some(hasta) = self.hasta
            && novedad.fecha > hasta
        {
            return false;
        }
        if !self.estados.is_empty() && !self.estados.contains(&novedad.estado()) {
            return false;
        }
        if !self.tipos.is_empty() && !self.tipos.contains(&novedad.tipo) {
            return false;
        }
        query::contains_ci(&novedad.descripcion, &self.busqueda)
            || query::contains_ci(&novedad.usuario, &self.busqueda)
    }

    /// Where the filter state lives by default.
    pub fn default_path() -> PathBuf {
        persistence::data_dir().join(FILTROS_NOVEDADES_FILE)
    }

    /// Load persisted filters; missing or corrupt files yield defaults.
    pub fn load(path: &Path) -> Self {
        persistence::load_json_or_default(path, "novedades filters")
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, "novedades filters", self)
    }
}
