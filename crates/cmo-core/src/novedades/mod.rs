pub mod errors;
pub mod filters;
pub mod store;
pub mod types;

pub use errors::NovedadError;
pub use filters::FiltrosNovedades;
pub use store::{NovedadSortKey, NovedadesStore};
pub use types::{
    Adjunto, EstadoNovedad, Novedad, ResolucionNovedad, Seguimiento, TipoNovedad,
};
