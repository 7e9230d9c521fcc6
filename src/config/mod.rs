mod app;
mod cache;
mod selection;
mod show;

pub use app::{AppConfig, DefaultAppConfig};
pub use cache::{CacheStore, DefaultCacheStore};
pub use selection::{DefaultSelectionStore, SelectionStore};
pub use show::{ComponentSpec, ShowConfig, TypeSpec};

#[cfg(test)]
pub use cache::MockDefaultCacheStore;
