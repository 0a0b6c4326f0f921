use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pending customs transit awaiting seal placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitoPendiente {
    pub id: String,
    /// Customs declaration identifier (DUA).
    pub dua: String,
    /// Vehicle plate.
    pub matricula: String,
    pub origen: String,
    pub destino: String,
    pub descripcion_carga: String,
    pub fecha_solicitud: DateTime<Utc>,
}
