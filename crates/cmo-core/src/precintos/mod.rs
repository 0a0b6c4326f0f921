pub mod store;
pub mod types;

pub use store::{FiltrosPrecintos, PrecintoSortKey, PrecintosStore};
pub use types::{EstadoEslinga, PrecintoActivo, UMBRAL_BATERIA_BAJA};
