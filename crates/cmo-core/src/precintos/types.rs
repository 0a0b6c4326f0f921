use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alerts::types::Ubicacion;

/// Battery percentage at or below which a seal counts as low-battery.
pub const UMBRAL_BATERIA_BAJA: u8 = 20;

/// Clasp state of a seal. A snapshot field reported by the device; the
/// dashboard does not guard transitions between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstadoEslinga {
    Cerrada,
    Abierta,
    Violada,
}

impl std::fmt::Display for EstadoEslinga {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EstadoEslinga::Cerrada => "cerrada",
            EstadoEslinga::Abierta => "abierta",
            EstadoEslinga::Violada => "violada",
        };
        f.write_str(label)
    }
}

/// Snapshot of an active seal device as last reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecintoActivo {
    pub codigo: String,
    pub bateria_pct: u8,
    pub gps_activo: bool,
    pub eslinga: EstadoEslinga,
    pub ultimo_reporte: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ubicacion: Option<Ubicacion>,
}

impl PrecintoActivo {
    pub fn bateria_baja(&self) -> bool {
        self.bateria_pct <= UMBRAL_BATERIA_BAJA
    }

    /// Minutes since the last device report. Negative values (a report
    /// timestamped in the future) clamp to zero.
    pub fn minutos_sin_reporte(&self, ahora: DateTime<Utc>) -> i64 {
        (ahora - self.ultimo_reporte).num_minutes().max(0)
    }
}
