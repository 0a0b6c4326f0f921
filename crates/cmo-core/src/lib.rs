//! cmo-core: Core library for the CMO precinto monitoring dashboard
//!
//! This library holds the headless side of the Centro de Monitoreo de
//! Operaciones: the typed domain model (alertas, precintos, transitos,
//! novedades), the state container every interface dispatches through,
//! and the view plumbing (filtering, export, filter persistence).
//!
//! # Main Entry Points
//!
//! - [`state`] - Command dispatch and the event contract
//! - [`alerts`] - Seal alerts and their attention lifecycle
//! - [`novedades`] - Operational log entries and follow-ups
//! - [`query`] - Generic filter/sort/paginate view derivation
//! - [`export`] - CSV/JSON export of table views
//! - [`config`] - Configuration management

pub mod alerts;
pub mod config;
pub mod errors;
pub mod export;
pub mod logging;
pub mod novedades;
pub mod persistence;
pub mod precintos;
pub mod query;
pub mod state;
pub mod transitos;

// Re-export commonly used types at crate root for convenience
pub use alerts::store::{AlertaSortKey, AlertasStore, FiltrosAlertas};
pub use alerts::types::{
    Alerta, AlertaExtendida, Asignacion, Comentario, Resolucion, Severidad, TipoAlarma, Ubicacion,
};
pub use config::CmoConfig;
pub use novedades::filters::FiltrosNovedades;
pub use novedades::types::{EstadoNovedad, Novedad, Seguimiento, TipoNovedad};
pub use precintos::types::{EstadoEslinga, PrecintoActivo};
pub use query::{Page, PagedView, SortDirection};
pub use state::{Command, CoreStore, DispatchError, Event, Store};
pub use transitos::types::TransitoPendiente;

// Re-export logging initialization
pub use logging::init_logging;
