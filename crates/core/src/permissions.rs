//! Well-known permission tokens.
//!
//! Permissions travel inside access tokens as their snake_case names.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ReadAsset,
    CreateAsset,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ReadAsset => "read_asset",
            Permission::CreateAsset => "create_asset",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the subset of `required` that `held` does not contain, or `None`
/// when the holder satisfies the requirement.
///
/// Holding any single required permission is sufficient. An empty
/// requirement is always satisfied.
pub fn missing_permissions(required: &[Permission], held: &[Permission]) -> Option<Vec<Permission>> {
    if required.is_empty() || required.iter().any(|p| held.contains(p)) {
        return None;
    }
    Some(
        required
            .iter()
            .copied()
            .filter(|p| !held.contains(p))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&Permission::CreateAsset).unwrap();
        assert_eq!(json, "\"create_asset\"");
        let parsed: Permission = serde_json::from_str("\"read_asset\"").unwrap();
        assert_eq!(parsed, Permission::ReadAsset);
    }

    #[test]
    fn any_held_permission_is_enough() {
        let required = [Permission::ReadAsset, Permission::CreateAsset];
        assert_eq!(missing_permissions(&required, &[Permission::CreateAsset]), None);
    }

    #[test]
    fn reports_every_missing_permission() {
        let required = [Permission::ReadAsset, Permission::CreateAsset];
        assert_eq!(
            missing_permissions(&required, &[]),
            Some(vec![Permission::ReadAsset, Permission::CreateAsset])
        );
    }

    #[test]
    fn empty_requirement_is_satisfied() {
        assert_eq!(missing_permissions(&[], &[]), None);
    }
}
