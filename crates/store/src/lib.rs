//! Process-lifetime storage for assets.

mod asset_store;

pub use asset_store::AssetStore;
