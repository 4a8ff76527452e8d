//! In-memory asset store.
//!
//! Records live in a single `Vec` behind a `tokio::sync::RwLock`: mutations
//! take the write lock, list/count share the read lock. Nothing is persisted;
//! all state is lost when the process exits.

use assets_core::asset::{Asset, AssetFilter, AssetInput, NameCollator, ASSET_ENTITY};
use assets_core::error::CoreError;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct AssetStore {
    assets: RwLock<Vec<Asset>>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new asset under a freshly generated id.
    pub async fn create(&self, input: AssetInput) -> Asset {
        let asset = Asset {
            id: Uuid::new_v4(),
            name: input.name,
            serial: input.serial,
        };
        self.assets.write().await.push(asset.clone());
        tracing::debug!(asset_id = %asset.id, "Stored asset");
        asset
    }

    /// Replace the name and serial of an existing asset. The id never changes.
    pub async fn update(&self, id: Uuid, input: AssetInput) -> Result<Asset, CoreError> {
        let mut assets = self.assets.write().await;
        let asset = assets
            .iter_mut()
            .find(|asset| asset.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: ASSET_ENTITY,
                id: id.to_string(),
            })?;
        asset.name = input.name;
        asset.serial = input.serial;
        Ok(asset.clone())
    }

    /// Matching assets ordered by name, windowed to `[skip, skip + take)`.
    pub async fn list(&self, skip: usize, take: usize, filter: &AssetFilter) -> Vec<Asset> {
        let assets = self.assets.read().await;
        let mut matching: Vec<&Asset> = assets.iter().filter(|a| filter.matches(a)).collect();
        let collator = NameCollator::new();
        matching.sort_by(|a, b| collator.compare(&a.name, &b.name));
        matching
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .collect()
    }

    /// Number of assets matching `filter`, independent of pagination.
    pub async fn count(&self, filter: &AssetFilter) -> usize {
        self.assets
            .read()
            .await
            .iter()
            .filter(|a| filter.matches(a))
            .count()
    }
}
