use serde::{Deserialize, Serialize};

use crate::novedades::types::TipoNovedad;

/// All operator-initiated mutations that can be dispatched through the
/// store.
///
/// Each variant captures the parameters needed to execute the operation.
/// Commands use owned types (`String`) so they can be serialized, stored,
/// and sent across boundaries. Timestamps are stamped at dispatch time,
/// not carried by the command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Mark an alert as attended by an operator.
    AtenderAlerta { id: String, usuario: String },
    /// Assign an alert to an operator.
    AsignarAlerta { id: String, usuario: String },
    /// Append a comment to an alert's thread (minimum 10 characters).
    ComentarAlerta {
        id: String,
        autor: String,
        texto: String,
    },
    /// Resolve an alert. Terminal: the alert accepts no further mutation.
    ResolverAlerta {
        id: String,
        usuario: String,
        motivo: String,
    },
    /// Record a new operational log entry.
    CrearNovedad {
        tipo: TipoNovedad,
        descripcion: String,
        usuario: String,
    },
    /// Append a follow-up to a log entry.
    AgregarSeguimiento {
        id: String,
        usuario: String,
        comentario: String,
    },
    /// Resolve a log entry. Terminal.
    ResolverNovedad {
        id: String,
        usuario: String,
        comentario: Option<String>,
    },
}
