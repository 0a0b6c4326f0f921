pub mod errors;
pub mod store;
pub mod types;

pub use errors::AlertaError;
pub use store::{AlertaSortKey, AlertasStore, FiltrosAlertas};
pub use types::{
    Alerta, AlertaExtendida, Asignacion, Comentario, EntradaHistorial, Resolucion, Severidad,
    TipoAlarma, Ubicacion,
};
