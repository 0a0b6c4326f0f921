pub mod store;
pub mod types;

pub use store::{FiltrosTransitos, TransitoSortKey, TransitosStore};
pub use types::TransitoPendiente;
