pub mod defaults;
pub mod loading;
pub mod types;

pub use loading::load_hierarchy;
pub use types::{CmoConfig, RefreshConfig, StorageConfig};
