//! The asset record and the types used to create, update and filter it.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{ObjectSchema, Schema};

/// Entity name used in not-found errors.
pub const ASSET_ENTITY: &str = "Asset";

/// Minimum length of an asset name after trimming.
pub const MIN_NAME_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
}

/// Caller-supplied fields of an asset, shared by create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetInput {
    pub name: String,
    #[serde(default)]
    pub serial: Option<String>,
}

/// Selection criteria for listing and counting assets.
///
/// Absent criteria match everything; present criteria are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetFilter {
    /// Case-insensitive substring of the asset name.
    pub name: Option<String>,
    /// Whether the asset must have (`true`) or lack (`false`) a serial.
    pub has_serial: Option<bool>,
}

impl AssetFilter {
    pub fn matches(&self, asset: &Asset) -> bool {
        if let Some(needle) = &self.name {
            if !asset.name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(has_serial) = self.has_serial {
            if asset.serial.is_some() != has_serial {
                return false;
            }
        }
        true
    }
}

/// Orders asset names with the Unicode collation algorithm using root
/// locale data: accents and case only break ties between otherwise equal
/// names, and lowercase sorts before uppercase.
pub struct NameCollator {
    collator: Option<Collator>,
}

impl NameCollator {
    pub fn new() -> Self {
        Self {
            collator: Collator::try_new(&Default::default(), CollatorOptions::new()).ok(),
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            // Collation data is compiled in; this only runs if it fails to load.
            None => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| b.cmp(a)),
        }
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new()
    }
}

/// Body accepted by the create and update endpoints.
pub fn asset_input_schema() -> ObjectSchema {
    ObjectSchema::new()
        .field(
            "name",
            Schema::string()
                .trim()
                .min_length(MIN_NAME_LENGTH)
                .example("My asset"),
        )
        .field(
            "serial",
            Schema::string().min_length(1).optional().example("A012345"),
        )
        .strict()
}

/// Shape of an asset as returned by the API.
pub fn asset_schema() -> Schema {
    Schema::object(
        ObjectSchema::new()
            .field("id", Schema::string().uuid())
            .field("name", Schema::string())
            .field("serial", Schema::string().optional()),
    )
}
