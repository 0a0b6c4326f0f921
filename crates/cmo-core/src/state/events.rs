use serde::{Deserialize, Serialize};

/// All business state changes that can result from a dispatched command
/// or an applied refresh snapshot.
///
/// Each variant describes _what happened_, not what should happen. Only
/// successful state changes produce events; failures use the `Result`
/// error channel, not the event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// An alert was marked as attended.
    AlertaAtendida { id: String },
    /// An alert was assigned to an operator.
    AlertaAsignada { id: String, usuario: String },
    /// A comment was appended to an alert's thread.
    AlertaComentada { id: String, comentario_id: String },
    /// An alert reached its terminal resolved state.
    AlertaResuelta { id: String },
    /// A new operational log entry was recorded.
    NovedadCreada { id: String },
    /// A follow-up was appended to a log entry.
    SeguimientoAgregado { id: String, seguimiento_id: String },
    /// A log entry reached its terminal resolved state.
    NovedadResuelta { id: String },

    /// A refresh cycle replaced the alert snapshot.
    AlertasRecargadas { total: usize },
    /// A refresh cycle replaced the pending-transit snapshot.
    TransitosRecargados { total: usize },
    /// A refresh cycle replaced the seal snapshot.
    PrecintosRecargados { total: usize },
}
