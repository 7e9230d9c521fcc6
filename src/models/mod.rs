mod asset_entry;
mod cache;
mod selection;

pub use asset_entry::AssetEntry;
pub use cache::{AssetCache, AssetKey, CacheLookupError};
pub use selection::Selection;
