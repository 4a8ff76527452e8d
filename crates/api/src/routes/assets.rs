//! Route definitions for the `/assets` resource.

use crate::endpoint::ApiRouter;
use crate::handlers::assets::{self, CreateAsset, ListAssets, UpdateAsset};

/// Routes mounted under `/api`.
///
/// ```text
/// POST   /assets            -> create
/// GET    /assets            -> list
/// PUT    /assets/{id}       -> update
/// ```
pub fn router() -> ApiRouter {
    ApiRouter::new()
        .endpoint::<CreateAsset, _, _>(assets::create)
        .endpoint::<ListAssets, _, _>(assets::list)
        .endpoint::<UpdateAsset, _, _>(assets::update)
}
